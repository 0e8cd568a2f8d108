//! Task service
//!
//! Admins create, edit and delete tasks and assign them to users. Listing
//! depends on the caller's role: admins see what they created, users see
//! what they were assigned.

use crate::auth::AuthenticatedIdentity;
use crate::error::ApiError;
use crate::repositories::{TaskFields, TaskRecord, TaskRepository, UserRepository};
use sqlx::PgPool;
use task_manager_shared::validation::{validate_task_title, validate_task_window};
use task_manager_shared::{CreateTaskRequest, Role, Task, TaskStatus, UpdateTaskRequest};
use tracing::info;

/// Task service for business logic
pub struct TaskService;

impl TaskService {
    /// Create a task owned by the calling admin
    pub async fn create(pool: &PgPool, created_by: i64, req: CreateTaskRequest) -> Result<Task, ApiError> {
        let fields = TaskFields {
            title: req.title.trim().to_string(),
            description: req.description,
            status: req.status.unwrap_or(TaskStatus::Pending),
            start_date: req.start_date,
            due_date: req.due_date,
            assigned_to: req.assigned_to,
        };
        validate_fields(&fields)?;
        ensure_assignee_exists(pool, fields.assigned_to).await?;

        let record = TaskRepository::create(pool, created_by, &fields)
            .await
            .map_err(ApiError::Internal)?;

        info!(task_id = record.id, user_id = created_by, assigned_to = record.assigned_to, "Task created");
        to_task(record)
    }

    /// Apply a partial update; fields absent from the request keep their value
    pub async fn update(pool: &PgPool, task_id: i64, req: UpdateTaskRequest) -> Result<Task, ApiError> {
        let current = TaskRepository::find_by_id(pool, task_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| task_not_found(task_id))?;

        let current = to_task(current)?;
        let reassigned = req.assigned_to.is_some_and(|id| id != current.assigned_to);
        let fields = merge_update(current, req);
        validate_fields(&fields)?;
        if reassigned {
            ensure_assignee_exists(pool, fields.assigned_to).await?;
        }

        let record = TaskRepository::update(pool, task_id, &fields)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| task_not_found(task_id))?;

        info!(task_id, "Task updated");
        to_task(record)
    }

    /// Delete a task
    pub async fn delete(pool: &PgPool, task_id: i64) -> Result<(), ApiError> {
        let deleted = TaskRepository::delete(pool, task_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(task_not_found(task_id));
        }

        info!(task_id, "Task deleted");
        Ok(())
    }

    /// List the tasks visible to the caller
    pub async fn list_for(pool: &PgPool, caller: AuthenticatedIdentity) -> Result<Vec<Task>, ApiError> {
        let records = match caller.role {
            Role::Admin => TaskRepository::list_created_by(pool, caller.user_id).await,
            Role::User => TaskRepository::list_assigned_to(pool, caller.user_id).await,
        }
        .map_err(ApiError::Internal)?;

        records.into_iter().map(to_task).collect()
    }
}

fn to_task(record: TaskRecord) -> Result<Task, ApiError> {
    Task::try_from(record).map_err(ApiError::Internal)
}

fn task_not_found(task_id: i64) -> ApiError {
    ApiError::NotFound(format!("Task {} not found", task_id))
}

async fn ensure_assignee_exists(pool: &PgPool, user_id: i64) -> Result<(), ApiError> {
    let exists = UserRepository::exists(pool, user_id)
        .await
        .map_err(ApiError::Internal)?;

    if exists {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("Assignee {} not found", user_id)))
    }
}

fn merge_update(current: Task, req: UpdateTaskRequest) -> TaskFields {
    TaskFields {
        title: req.title.map(|t| t.trim().to_string()).unwrap_or(current.title),
        description: req.description.unwrap_or(current.description),
        status: req.status.unwrap_or(current.status),
        start_date: req.start_date.unwrap_or(current.start_date),
        due_date: req.due_date.unwrap_or(current.due_date),
        assigned_to: req.assigned_to.unwrap_or(current.assigned_to),
    }
}

fn validate_fields(fields: &TaskFields) -> Result<(), ApiError> {
    validate_task_title(&fields.title).map_err(ApiError::Validation)?;
    validate_task_window(fields.start_date, fields.due_date).map_err(ApiError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn task() -> Task {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Task {
            id: 10,
            title: "Quarterly report".to_string(),
            description: "Draft and review".to_string(),
            status: TaskStatus::Pending,
            start_date: start,
            due_date: start + Duration::days(7),
            user_id: 1,
            assigned_to: 2,
        }
    }

    #[test]
    fn test_empty_update_keeps_every_field() {
        let current = task();
        let fields = merge_update(current.clone(), UpdateTaskRequest::default());
        assert_eq!(fields.title, current.title);
        assert_eq!(fields.description, current.description);
        assert_eq!(fields.status, current.status);
        assert_eq!(fields.start_date, current.start_date);
        assert_eq!(fields.due_date, current.due_date);
        assert_eq!(fields.assigned_to, current.assigned_to);
    }

    #[test]
    fn test_update_only_changes_provided_fields() {
        let current = task();
        let fields = merge_update(
            current.clone(),
            UpdateTaskRequest {
                status: Some(TaskStatus::Completed),
                title: Some("  Annual report ".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(fields.status, TaskStatus::Completed);
        assert_eq!(fields.title, "Annual report");
        assert_eq!(fields.due_date, current.due_date);
    }

    #[test]
    fn test_merged_window_is_validated() {
        let current = task();
        let fields = merge_update(
            current.clone(),
            UpdateTaskRequest {
                due_date: Some(current.start_date - Duration::hours(1)),
                ..Default::default()
            },
        );
        assert!(matches!(validate_fields(&fields), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut fields = merge_update(task(), UpdateTaskRequest::default());
        fields.title = "   ".to_string();
        assert!(matches!(validate_fields(&fields), Err(ApiError::Validation(_))));
    }
}
