//! Task repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use task_manager_shared::{Task, TaskStatus};

/// Task record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub user_id: i64,
    pub assigned_to: i64,
}

impl TryFrom<TaskRecord> for Task {
    type Error = anyhow::Error;

    fn try_from(record: TaskRecord) -> Result<Self> {
        let status = record
            .status
            .parse::<TaskStatus>()
            .map_err(|e| anyhow::anyhow!("Task {} has invalid status: {}", record.id, e))?;

        Ok(Task {
            id: record.id,
            title: record.title,
            description: record.description,
            status,
            start_date: record.start_date,
            due_date: record.due_date,
            user_id: record.user_id,
            assigned_to: record.assigned_to,
        })
    }
}

/// Input for creating or fully rewriting a task
#[derive(Debug, Clone)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub start_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub assigned_to: i64,
}

/// Task counts for one assignee
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct TaskCounts {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub in_progress: i64,
}

/// Task repository for database operations
pub struct TaskRepository;

impl TaskRepository {
    /// Create a new task owned by `created_by`
    pub async fn create(pool: &PgPool, created_by: i64, fields: &TaskFields) -> Result<TaskRecord> {
        let record = sqlx::query_as::<_, TaskRecord>(
            r#"
            INSERT INTO tasks (title, description, status, start_date, due_date, user_id, assigned_to)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, status, start_date, due_date, user_id, assigned_to
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.status.as_str())
        .bind(fields.start_date)
        .bind(fields.due_date)
        .bind(created_by)
        .bind(fields.assigned_to)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Find task by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<TaskRecord>> {
        let record = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, title, description, status, start_date, due_date, user_id, assigned_to
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Overwrite the editable fields of a task
    pub async fn update(pool: &PgPool, id: i64, fields: &TaskFields) -> Result<Option<TaskRecord>> {
        let record = sqlx::query_as::<_, TaskRecord>(
            r#"
            UPDATE tasks SET
                title = $2,
                description = $3,
                status = $4,
                start_date = $5,
                due_date = $6,
                assigned_to = $7
            WHERE id = $1
            RETURNING id, title, description, status, start_date, due_date, user_id, assigned_to
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.status.as_str())
        .bind(fields.start_date)
        .bind(fields.due_date)
        .bind(fields.assigned_to)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete a task, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Tasks created by an admin
    pub async fn list_created_by(pool: &PgPool, user_id: i64) -> Result<Vec<TaskRecord>> {
        let records = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, title, description, status, start_date, due_date, user_id, assigned_to
            FROM tasks
            WHERE user_id = $1
            ORDER BY due_date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Tasks assigned to a user
    pub async fn list_assigned_to(pool: &PgPool, user_id: i64) -> Result<Vec<TaskRecord>> {
        let records = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, title, description, status, start_date, due_date, user_id, assigned_to
            FROM tasks
            WHERE assigned_to = $1
            ORDER BY due_date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Count a user's assigned tasks by status in one round trip
    pub async fn count_for_assignee(pool: &PgPool, user_id: i64) -> Result<TaskCounts> {
        let counts = sqlx::query_as::<_, TaskCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress
            FROM tasks
            WHERE assigned_to = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }
}
