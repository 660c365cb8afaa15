use crate::{
    api::{
        AppService,
        callable::approve_group,
        middleware::{admin_middleware, auth_middleware, optional_user},
        models::*,
    },
    core::{
        directory::{DirectoryPage, DirectoryQuery},
        export::CSV_FILE_NAME,
        models::{
            announcement::{Announcement, AnnouncementInput},
            audit::{AppLog, GroupAudit},
            group::{Group, GroupRegistration, ModerationGroup},
            user::User,
        },
        services::GroupDetail,
    },
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use std::sync::Arc;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    let admin_routes = Router::new()
        .route("/admin/groups", get(list_moderation_groups))
        .route("/admin/groups/export", get(export_groups))
        .route("/admin/groups/{group_id}", axum::routing::delete(delete_group))
        .route("/admin/groups/{group_id}/status", post(update_group_status))
        .route("/admin/groups/{group_id}/audits", get(get_group_audits))
        .route("/admin/announcements", post(create_announcement))
        .route(
            "/admin/announcements/{announcement_id}",
            put(update_announcement).delete(delete_announcement),
        )
        .route("/admin/logs", get(get_app_logs))
        .route_layer(middleware::from_fn(admin_middleware));

    let protected_routes = Router::new()
        .route("/me", get(me))
        .route("/groups/{group_id}/join", post(join_group))
        .route("/groups/{group_id}/leave", post(leave_group))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/groups", get(list_directory))
        .route("/groups/register", post(register_group))
        .route("/groups/{group_id}", get(get_group))
        .route("/announcements", get(list_announcements))
        .route("/users", post(create_user))
        .route("/login", post(login))
        .route("/functions/approveGroup", post(approve_group))
        .merge(protected_routes)
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn login(
    State(service): State<Arc<AppService>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = service.authenticate(&req.email, &req.password).await?;
    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn create_user(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service.register_user(req.name, req.email, req.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}

#[utoipa::path(
    get,
    path = "/api/groups",
    params(DirectoryQuery),
    responses(
        (status = 200, description = "Active groups matching the filters, with announcements", body = DirectoryPage),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn list_directory(
    State(service): State<Arc<AppService>>,
    Query(query): Query<DirectoryQuery>,
) -> Result<Json<DirectoryPage>, ApiError> {
    let page = service.directory(&query).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Group with leader and members", body = GroupDetail),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Group is not active", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<GroupDetail>, ApiError> {
    let detail = service.group_detail(&group_id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/groups/register",
    request_body = GroupRegistration,
    responses(
        (status = 201, description = "Group submitted for approval", body = Group),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security((), ("Bearer" = []))
)]
pub(crate) async fn register_group(
    State(service): State<Arc<AppService>>,
    headers: HeaderMap,
    Json(req): Json<GroupRegistration>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let submitted_by = optional_user(&service, &headers).await?;
    let group = service.register_group(req, submitted_by.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/join",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Joined group", body = GroupDetail),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Group is full or not active", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn join_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<GroupDetail>, ApiError> {
    let detail = service.join_group(&group_id, &user).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/leave",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Left group", body = GroupDetail),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn leave_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<GroupDetail>, ApiError> {
    let detail = service.leave_group(&group_id, &user).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    get,
    path = "/api/announcements",
    responses(
        (status = 200, description = "Announcements, newest first", body = Vec<Announcement>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn list_announcements(
    State(service): State<Arc<AppService>>,
) -> Result<Json<Vec<Announcement>>, ApiError> {
    let announcements = service.list_announcements().await?;
    Ok(Json(announcements))
}

#[utoipa::path(
    get,
    path = "/api/admin/groups",
    responses(
        (status = 200, description = "Groups from both collections, tagged with their source", body = Vec<ModerationGroup>),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn list_moderation_groups(
    State(service): State<Arc<AppService>>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<ModerationGroup>>, ApiError> {
    let groups = service.list_moderation_groups(&user).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    post,
    path = "/api/admin/groups/{group_id}/status",
    request_body = UpdateStatusRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Status updated", body = ModerationGroup),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 404, description = "Group not found in the source collection", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn update_group_status(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Extension(user): Extension<User>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ModerationGroup>, ApiError> {
    let updated = service
        .update_status(&group_id, req.status, req.source_type, &user)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/admin/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group to delete"),
        CollectionQuery
    ),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 404, description = "Group not found in the collection", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn delete_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Query(query): Query<CollectionQuery>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, ApiError> {
    service.delete_group(&group_id, query.collection, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/admin/groups/export",
    responses(
        (status = 200, description = "CSV of every group", body = String, content_type = "text/csv"),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn export_groups(
    State(service): State<Arc<AppService>>,
    Extension(user): Extension<User>,
) -> Result<impl IntoResponse, ApiError> {
    let csv = service.export_groups_csv(&user).await?;
    let disposition = format!("attachment; filename=\"{}\"", CSV_FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/announcements",
    request_body = AnnouncementInput,
    responses(
        (status = 201, description = "Announcement created", body = Announcement),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn create_announcement(
    State(service): State<Arc<AppService>>,
    Extension(user): Extension<User>,
    Json(req): Json<AnnouncementInput>,
) -> Result<(StatusCode, Json<Announcement>), ApiError> {
    let announcement = service.create_announcement(req, &user).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

#[utoipa::path(
    put,
    path = "/api/admin/announcements/{announcement_id}",
    request_body = AnnouncementInput,
    params(
        ("announcement_id" = String, Path, description = "ID of the announcement")
    ),
    responses(
        (status = 200, description = "Announcement updated", body = Announcement),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 404, description = "Announcement not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn update_announcement(
    State(service): State<Arc<AppService>>,
    Path(announcement_id): Path<String>,
    Extension(user): Extension<User>,
    Json(req): Json<AnnouncementInput>,
) -> Result<Json<Announcement>, ApiError> {
    let announcement = service.update_announcement(&announcement_id, req, &user).await?;
    Ok(Json(announcement))
}

#[utoipa::path(
    delete,
    path = "/api/admin/announcements/{announcement_id}",
    params(
        ("announcement_id" = String, Path, description = "ID of the announcement")
    ),
    responses(
        (status = 204, description = "Announcement deleted"),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 404, description = "Announcement not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn delete_announcement(
    State(service): State<Arc<AppService>>,
    Path(announcement_id): Path<String>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, ApiError> {
    service.delete_announcement(&announcement_id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/admin/logs",
    responses(
        (status = 200, description = "Application logs retrieved successfully", body = Vec<AppLog>),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}

#[utoipa::path(
    get,
    path = "/api/admin/groups/{group_id}/audits",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Group audits retrieved successfully", body = Vec<GroupAudit>),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn get_group_audits(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<GroupAudit>>, ApiError> {
    let audits = service.get_group_audits(&group_id).await?;
    Ok(Json(audits))
}
