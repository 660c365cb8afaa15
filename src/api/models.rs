use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::{ErrorCode, FieldError, KleingroepeError};
use crate::core::models::group::{Collection, GroupStatus};
use crate::core::services::ApprovalResult;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: GroupStatus,
    pub source_type: Collection,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CollectionQuery {
    /// `pendingGroups` or `groups`.
    pub collection: Collection,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveGroupData {
    pub group_id: Option<String>,
}

/// Body of a callable request: `{"data": {...}}`.
#[derive(Deserialize, ToSchema)]
pub struct CallableRequest {
    pub data: Option<ApproveGroupData>,
}

#[derive(Serialize, ToSchema)]
pub struct CallableResponse {
    pub result: ApprovalResult,
}

#[derive(Serialize, ToSchema)]
pub struct CallableErrorBody {
    pub status: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct CallableErrorResponse {
    pub error: CallableErrorBody,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldError>,
}

// Newtype wrapper for KleingroepeError to implement IntoResponse
pub struct ApiError(pub KleingroepeError);

impl From<KleingroepeError> for ApiError {
    fn from(err: KleingroepeError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let code = self.0.code();
        if code == ErrorCode::Internal {
            error!("Request failed: {}", self.0);
        }
        let (error_message, field) = match self.0 {
            KleingroepeError::InvalidInput(_, field) => (field.description.clone(), Some(field)),
            KleingroepeError::InternalServerError(_)
            | KleingroepeError::StorageError(_)
            | KleingroepeError::LoggingError(_)
            | KleingroepeError::CacheError(_) => ("Internal server error".to_string(), None),
            other => (other.to_string(), None),
        };
        (
            code.status_code(),
            Json(ErrorResponse {
                error: error_message,
                field,
            }),
        )
            .into_response()
    }
}
