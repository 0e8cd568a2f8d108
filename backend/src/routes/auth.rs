//! Authentication routes
//!
//! Registration and login. Neither route requires a token.

use crate::auth::Claims;
use crate::error::{ApiError, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar},
    WithRejection,
};
use task_manager_shared::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};
use time::OffsetDateTime;

/// Cookie carrying the same token as the login response body
pub const TOKEN_COOKIE: &str = "token";

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /api/v1/auth/register
///
/// The caller picks the account role, `admin` included; omitted means
/// `user`. Any client can therefore create an admin account.
async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let profile = UserService::register(state.users(), req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Login with username and password
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let (token, claims) = UserService::login(state.users(), state.jwt(), &req.username, &req.password).await?;
    let cookie = token_cookie(&token, &claims)?;

    Ok((jar.add(cookie), Json(LoginResponse { token })))
}

/// Build the httpOnly login cookie, expiring with the token
fn token_cookie(token: &str, claims: &Claims) -> Result<Cookie<'static>, ApiError> {
    let expires = OffsetDateTime::from_unix_timestamp(claims.exp)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("token expiry out of range: {}", e)))?;

    Ok(Cookie::build((TOKEN_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .expires(expires)
        .build())
}
