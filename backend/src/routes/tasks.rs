//! Task routes
//!
//! Every route here sits behind `require_auth`. Writes are admin-only;
//! listing is open to both roles and scoped by role in the service.

use crate::auth::{access, AuthenticatedIdentity};
use crate::error::{ApiError, ApiResult};
use crate::services::TaskService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use task_manager_shared::{CreateTaskRequest, Task, UpdateTaskRequest};

/// Create task routes
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_task)
                .route_layer(middleware::from_fn(access::admin_only))
                .merge(get(list_tasks).route_layer(middleware::from_fn(access::any_role))),
        )
        .route(
            "/:task_id",
            put(update_task)
                .merge(delete(delete_task))
                .route_layer(middleware::from_fn(access::admin_only)),
        )
}

/// Create a task assigned to a user
///
/// POST /api/v1/tasks
async fn create_task(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
    WithRejection(Json(req), _): WithRejection<Json<CreateTaskRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = TaskService::create(state.db(), identity.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// List the caller's tasks
///
/// GET /api/v1/tasks
async fn list_tasks(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = TaskService::list_for(state.db(), identity).await?;
    Ok(Json(tasks))
}

/// Update a task
///
/// PUT /api/v1/tasks/:task_id
async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateTaskRequest>, ApiError>,
) -> ApiResult<Json<Task>> {
    let task = TaskService::update(state.db(), task_id, req).await?;
    Ok(Json(task))
}

/// Delete a task
///
/// DELETE /api/v1/tasks/:task_id
async fn delete_task(State(state): State<AppState>, Path(task_id): Path<i64>) -> ApiResult<Json<Value>> {
    TaskService::delete(state.db(), task_id).await?;
    Ok(Json(json!({ "message": "Task deleted" })))
}
