use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::warn;

use crate::api::{AppService, models::ApiError};
use crate::core::errors::KleingroepeError;
use crate::core::models::user::User;

fn bearer_token(headers: &HeaderMap) -> Option<Result<&str, KleingroepeError>> {
    let value = headers.get(header::AUTHORIZATION)?;
    let token = value
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| KleingroepeError::Unauthenticated("Invalid Authorization header".to_string()));
    Some(token)
}

/// Resolves the signed-in user when an Authorization header is present.
/// A malformed or expired token is an error rather than an anonymous caller.
pub async fn optional_user(service: &AppService, headers: &HeaderMap) -> Result<Option<User>, KleingroepeError> {
    match bearer_token(headers) {
        None => Ok(None),
        Some(token) => {
            let claims = service.validate_token(token?)?;
            service.require_user(&claims.sub).await.map(Some)
        }
    }
}

// Middleware to validate JWT
pub async fn auth_middleware(
    State(service): State<Arc<AppService>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(req.headers())
        .unwrap_or_else(|| Err(KleingroepeError::Unauthenticated("Missing Authorization header".to_string())))?;

    let claims = service.validate_token(token)?;
    let user = service.require_user(&claims.sub).await?;
    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Runs after `auth_middleware`; admin rights are read from the user record, not the token role.
pub async fn admin_middleware(req: Request, next: Next) -> Result<impl IntoResponse, ApiError> {
    let user = req
        .extensions()
        .get::<User>()
        .ok_or_else(|| KleingroepeError::Unauthenticated("Authentication required".to_string()))?;
    if !user.is_admin {
        warn!("Non-admin user {} denied access to {}", user.id, req.uri().path());
        return Err(KleingroepeError::PermissionDenied(format!("User {} is not an administrator", user.id)).into());
    }
    Ok(next.run(req).await)
}
