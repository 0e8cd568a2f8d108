//! Role-based access control
//!
//! Each guarded route declares a fixed allow-list of roles. The check reads
//! the identity left by [`require_auth`](super::require_auth), so these
//! layers must sit inside it.

use super::AuthenticatedIdentity;
use crate::error::ApiError;
use axum::{extract::Request, middleware::Next, response::Response};
use task_manager_shared::{AuthError, Role};
use tracing::{debug, error};

/// Routes only administrators may call
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Routes open to every account
pub const ANY_ROLE: &[Role] = &[Role::Admin, Role::User];

/// Decide whether an identity may pass an allow-list
pub fn check_access(identity: Option<&AuthenticatedIdentity>, allowed: &[Role]) -> Result<(), ApiError> {
    let Some(identity) = identity else {
        error!("Access check ran before authentication; check route layer order");
        return Err(ApiError::Internal(anyhow::anyhow!(
            "access check without authenticated identity"
        )));
    };

    if identity.role.is_allowed(allowed) {
        Ok(())
    } else {
        debug!(user_id = identity.user_id, role = %identity.role, "Role not permitted");
        Err(AuthError::Forbidden.into())
    }
}

/// Middleware admitting only the roles in `allowed`
pub async fn require_roles(
    allowed: &'static [Role],
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    check_access(request.extensions().get::<AuthenticatedIdentity>(), allowed)?;
    Ok(next.run(request).await)
}

/// [`require_roles`] with [`ADMIN_ONLY`]
pub async fn admin_only(request: Request, next: Next) -> Result<Response, ApiError> {
    require_roles(ADMIN_ONLY, request, next).await
}

/// [`require_roles`] with [`ANY_ROLE`]
pub async fn any_role(request: Request, next: Next) -> Result<Response, ApiError> {
    require_roles(ANY_ROLE, request, next).await
}
