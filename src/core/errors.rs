use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::core::models::group::Collection;

#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

/// Error categories shared by the REST routes and the callable endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Unauthenticated,
    PermissionDenied,
    InvalidArgument,
    NotFound,
    AlreadyExists,
    FailedPrecondition,
    Internal,
}

impl ErrorCode {
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists | ErrorCode::FailedPrecondition => StatusCode::CONFLICT,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wire name used in the callable error envelope.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::FailedPrecondition => "FAILED_PRECONDITION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCode::Unauthenticated => "unauthenticated",
            ErrorCode::PermissionDenied => "permission-denied",
            ErrorCode::InvalidArgument => "invalid-argument",
            ErrorCode::NotFound => "not-found",
            ErrorCode::AlreadyExists => "already-exists",
            ErrorCode::FailedPrecondition => "failed-precondition",
            ErrorCode::Internal => "internal",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug)]
pub enum KleingroepeError {
    #[error("{0}")]
    Unauthenticated(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    PermissionDenied(String),
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("Group {0} not found in {1}")]
    GroupNotFound(String, Collection),
    #[error("Group {0} is not publicly available")]
    GroupNotAvailable(String),
    #[error("Group {0} is full")]
    GroupFull(String),
    #[error("Announcement {0} not found")]
    AnnouncementNotFound(String),
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("Cache error: {0}")]
    CacheError(String),
}

impl KleingroepeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            KleingroepeError::Unauthenticated(_) | KleingroepeError::InvalidCredentials => ErrorCode::Unauthenticated,
            KleingroepeError::PermissionDenied(_) => ErrorCode::PermissionDenied,
            KleingroepeError::UserNotFound(_)
            | KleingroepeError::GroupNotFound(..)
            | KleingroepeError::AnnouncementNotFound(_) => ErrorCode::NotFound,
            KleingroepeError::GroupNotAvailable(_) | KleingroepeError::GroupFull(_) => ErrorCode::FailedPrecondition,
            KleingroepeError::EmailAlreadyRegistered(_) => ErrorCode::AlreadyExists,
            KleingroepeError::InvalidEmail(_)
            | KleingroepeError::InvalidInput(..)
            | KleingroepeError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            KleingroepeError::InternalServerError(_)
            | KleingroepeError::StorageError(_)
            | KleingroepeError::LoggingError(_)
            | KleingroepeError::CacheError(_) => ErrorCode::Internal,
        }
    }

    pub fn invalid_input(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        KleingroepeError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: title.into(),
                description: description.into(),
            },
        )
    }
}
