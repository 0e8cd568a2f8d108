//! Authentication middleware
//!
//! `require_auth` verifies the bearer token and attaches an
//! [`AuthenticatedIdentity`] to the request extensions. Handlers read it back
//! through the `AuthenticatedIdentity` extractor.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use task_manager_shared::{AuthError, Role};
use tracing::debug;

/// Literal, case-sensitive scheme prefix stripped from the header value
const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, valid for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user_id: i64,
    pub role: Role,
}

/// Pull the raw token out of the `Authorization` header
///
/// The `Bearer ` prefix is optional; without it the whole value is the token.
pub fn extract_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = match headers.get(AUTHORIZATION) {
        None => return Err(AuthError::MissingToken),
        Some(value) if value.is_empty() => return Err(AuthError::MissingToken),
        Some(value) => value.to_str().map_err(|_| AuthError::InvalidToken)?,
    };

    Ok(value.strip_prefix(BEARER_PREFIX).unwrap_or(value))
}

/// Middleware guarding every route that needs a caller identity
///
/// Runs before any access check; on failure the request never reaches the
/// handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())?;

    let claims = state.jwt().verify(token).map_err(|e| {
        debug!(reason = %e, "Rejected bearer token");
        AuthError::InvalidToken
    })?;

    request.extensions_mut().insert(AuthenticatedIdentity {
        user_id: claims.user_id,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absence means the route was registered without `require_auth`.
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .copied()
            .ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!(
                    "authenticated identity requested on a route without require_auth"
                ))
            })
    }
}
