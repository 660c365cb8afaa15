use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    api::models::{
        ApproveGroupData, CallableErrorBody, CallableErrorResponse, CallableRequest, CallableResponse,
        CreateUserRequest, ErrorResponse, LoginRequest, LoginResponse, UpdateStatusRequest,
    },
    core::{
        directory::{ChildcareFilter, DirectoryPage, ViewMode},
        errors::FieldError,
        models::{
            announcement::{Announcement, AnnouncementInput},
            audit::{AppLog, GroupAudit},
            group::{
                Collection, FocusCategoryKey, Group, GroupRegistration, GroupStatus, MeetingDay, MeetingTime,
                MeetingType, ModerationGroup, TargetAudience,
            },
            user::{User, UserSummary},
        },
        services::{ApprovalResult, GroupDetail},
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::login,
        super::handlers::create_user,
        super::handlers::me,
        super::handlers::list_directory,
        super::handlers::get_group,
        super::handlers::register_group,
        super::handlers::join_group,
        super::handlers::leave_group,
        super::handlers::list_announcements,
        super::handlers::list_moderation_groups,
        super::handlers::update_group_status,
        super::handlers::delete_group,
        super::handlers::export_groups,
        super::handlers::create_announcement,
        super::handlers::update_announcement,
        super::handlers::delete_announcement,
        super::handlers::get_app_logs,
        super::handlers::get_group_audits,
        super::callable::approve_group
    ),
    components(schemas(
        CreateUserRequest,
        LoginRequest,
        LoginResponse,
        UpdateStatusRequest,
        ApproveGroupData,
        CallableRequest,
        CallableResponse,
        CallableErrorBody,
        CallableErrorResponse,
        ErrorResponse,
        FieldError,
        User,
        UserSummary,
        Group,
        GroupRegistration,
        GroupStatus,
        Collection,
        MeetingDay,
        MeetingTime,
        MeetingType,
        TargetAudience,
        FocusCategoryKey,
        ModerationGroup,
        GroupDetail,
        ApprovalResult,
        DirectoryPage,
        ChildcareFilter,
        ViewMode,
        Announcement,
        AnnouncementInput,
        AppLog,
        GroupAudit
    )),
    modifiers(&SecurityAddon),
    info(
        title = "Kleingroepe API",
        description = "Small-group directory: registration, moderation, membership and announcements",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
