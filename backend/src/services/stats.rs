//! Per-user task statistics

use crate::error::ApiError;
use crate::repositories::{TaskCounts, TaskRepository};
use sqlx::PgPool;
use task_manager_shared::UserStats;

/// Statistics service
pub struct StatsService;

impl StatsService {
    /// Counts over the tasks assigned to `user_id`
    pub async fn for_user(pool: &PgPool, user_id: i64) -> Result<UserStats, ApiError> {
        let counts = TaskRepository::count_for_assignee(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(Self::summarize(user_id, counts))
    }

    pub fn summarize(user_id: i64, counts: TaskCounts) -> UserStats {
        UserStats {
            user_id,
            total_tasks: counts.total,
            completed_tasks: counts.completed,
            pending_tasks: counts.pending,
            in_progress_tasks: counts.in_progress,
            completion_rate: completion_rate(counts.completed, counts.total),
        }
    }
}

/// Share of completed tasks in `[0, 1]`; zero when there are no tasks
pub fn completion_rate(completed: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    completed as f64 / total as f64
}
