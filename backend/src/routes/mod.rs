//! Route definitions for the Task Manager API
//!
//! This module organizes all API routes and applies middleware.

use crate::auth::require_auth;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod friends;
mod health;
mod stats;
mod tasks;


pub use auth::{auth_routes, TOKEN_COOKIE};
pub use friends::friend_routes;
pub use stats::stats_routes;
pub use tasks::task_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes(state.clone()))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
///
/// Role checks are attached per route inside each router, so `require_auth`
/// added here wraps them and always runs first.
fn api_routes(state: AppState) -> Router<AppState> {
    let authenticated = middleware::from_fn_with_state(state, require_auth);

    Router::new()
        .route("/", get(|| async { "Task Manager API v1" }))
        .nest("/auth", auth::auth_routes())
        .nest("/tasks", tasks::task_routes().route_layer(authenticated.clone()))
        .nest("/user", stats::stats_routes().route_layer(authenticated.clone()))
        .nest("/friends", friends::friend_routes().route_layer(authenticated))
}
