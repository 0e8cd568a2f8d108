//! Friendship routes

use crate::auth::AuthenticatedIdentity;
use crate::error::{ApiError, ApiResult};
use crate::services::FriendshipService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use task_manager_shared::{FriendRequest, Friendship, FriendshipDecision};

/// Create friendship routes
pub fn friend_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(send_request))
        .route("/accept", post(accept_request))
        .route("/reject", post(reject_request))
}

/// POST /api/v1/friends
async fn send_request(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
    WithRejection(Json(req), _): WithRejection<Json<FriendRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Friendship>)> {
    let friendship = FriendshipService::request(state.db(), identity.user_id, req.friend_id).await?;
    Ok((StatusCode::CREATED, Json(friendship)))
}

/// POST /api/v1/friends/accept
async fn accept_request(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
    WithRejection(Json(req), _): WithRejection<Json<FriendshipDecision>, ApiError>,
) -> ApiResult<Json<Friendship>> {
    let friendship = FriendshipService::accept(state.db(), identity.user_id, req.user_id).await?;
    Ok(Json(friendship))
}

/// POST /api/v1/friends/reject
async fn reject_request(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
    WithRejection(Json(req), _): WithRejection<Json<FriendshipDecision>, ApiError>,
) -> ApiResult<Json<Friendship>> {
    let friendship = FriendshipService::reject(state.db(), identity.user_id, req.user_id).await?;
    Ok(Json(friendship))
}
