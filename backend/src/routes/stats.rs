//! Statistics routes

use crate::auth::AuthenticatedIdentity;
use crate::error::ApiResult;
use crate::services::StatsService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use task_manager_shared::UserStats;

/// Create user statistics routes
pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/stats", get(user_stats))
}

/// Task counts for the caller
///
/// GET /api/v1/user/stats
async fn user_stats(State(state): State<AppState>, identity: AuthenticatedIdentity) -> ApiResult<Json<UserStats>> {
    let stats = StatsService::for_user(state.db(), identity.user_id).await?;
    Ok(Json(stats))
}
