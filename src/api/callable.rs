use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::api::{
    AppService,
    middleware::optional_user,
    models::{CallableErrorBody, CallableErrorResponse, CallableRequest, CallableResponse},
};
use crate::core::errors::{ErrorCode, KleingroepeError};

/// Callable functions only surface these categories; anything else is reported as internal.
fn callable_code(code: ErrorCode) -> ErrorCode {
    match code {
        ErrorCode::Unauthenticated
        | ErrorCode::PermissionDenied
        | ErrorCode::InvalidArgument
        | ErrorCode::NotFound
        | ErrorCode::Internal => code,
        ErrorCode::AlreadyExists | ErrorCode::FailedPrecondition => ErrorCode::Internal,
    }
}

fn callable_error(err: &KleingroepeError) -> Response {
    let code = callable_code(err.code());
    let message = match err {
        KleingroepeError::StorageError(_) | KleingroepeError::LoggingError(_) | KleingroepeError::CacheError(_) => {
            error!("Callable failed: {}", err);
            "An internal error occurred.".to_string()
        }
        KleingroepeError::InternalServerError(message) => message.clone(),
        KleingroepeError::GroupNotFound(..) => "The pending group does not exist.".to_string(),
        other => other.to_string(),
    };
    (
        code.status_code(),
        Json(CallableErrorResponse {
            error: CallableErrorBody {
                status: code.as_str().to_string(),
                message,
            },
        }),
    )
        .into_response()
}

/// The group id from a `{"data": {"groupId": ...}}` body; a missing or malformed body yields `None`
/// so that authentication is still checked before the argument.
fn group_id_from_body(body: &[u8]) -> Option<String> {
    match serde_json::from_slice::<CallableRequest>(body) {
        Ok(req) => req.data.and_then(|d| d.group_id),
        Err(e) => {
            warn!("Unparseable callable body: {}", e);
            None
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/functions/approveGroup",
    request_body = CallableRequest,
    responses(
        (status = 200, description = "Group approved", body = CallableResponse),
        (status = 400, description = "Missing groupId", body = CallableErrorResponse),
        (status = 401, description = "Caller is not signed in", body = CallableErrorResponse),
        (status = 403, description = "Caller is not an administrator", body = CallableErrorResponse),
        (status = 404, description = "Pending group does not exist", body = CallableErrorResponse),
        (status = 500, description = "Internal error", body = CallableErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub(crate) async fn approve_group(State(service): State<Arc<AppService>>, headers: HeaderMap, body: Bytes) -> Response {
    let caller = match optional_user(&service, &headers).await {
        Ok(caller) => caller,
        Err(e) => {
            warn!("approveGroup rejected token: {}", e);
            None
        }
    };
    let group_id = group_id_from_body(&body);

    match service
        .approve_group(caller.as_ref().map(|u| u.id.as_str()), group_id.as_deref())
        .await
    {
        Ok(result) => (StatusCode::OK, Json(CallableResponse { result })).into_response(),
        Err(e) => callable_error(&e),
    }
}
