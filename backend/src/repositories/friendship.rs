//! Friendship repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use task_manager_shared::{Friendship, FriendshipStatus};

/// Friendship record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FriendshipRecord {
    pub id: i64,
    pub user_id: i64,
    pub friend_id: i64,
    pub status: String,
}

impl TryFrom<FriendshipRecord> for Friendship {
    type Error = anyhow::Error;

    fn try_from(record: FriendshipRecord) -> Result<Self> {
        let status = record
            .status
            .parse::<FriendshipStatus>()
            .map_err(|e| anyhow::anyhow!("Friendship {} has invalid status: {}", record.id, e))?;

        Ok(Friendship {
            id: record.id,
            user_id: record.user_id,
            friend_id: record.friend_id,
            status,
        })
    }
}

/// Friendship repository for database operations
pub struct FriendshipRepository;

impl FriendshipRepository {
    /// Record a pending request from `user_id` to `friend_id`
    pub async fn create_pending(pool: &PgPool, user_id: i64, friend_id: i64) -> Result<FriendshipRecord> {
        let record = sqlx::query_as::<_, FriendshipRecord>(
            r#"
            INSERT INTO friendships (user_id, friend_id, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, friend_id, status
            "#,
        )
        .bind(user_id)
        .bind(friend_id)
        .bind(FriendshipStatus::Pending.as_str())
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Move a request in state `from` to state `to`
    ///
    /// Only the addressee may decide, so the row is matched on both ends.
    /// Returns `None` when no request in state `from` exists.
    pub async fn transition(
        pool: &PgPool,
        requester_id: i64,
        addressee_id: i64,
        from: FriendshipStatus,
        to: FriendshipStatus,
    ) -> Result<Option<FriendshipRecord>> {
        let record = sqlx::query_as::<_, FriendshipRecord>(
            r#"
            UPDATE friendships
            SET status = $4, updated_at = NOW()
            WHERE user_id = $1 AND friend_id = $2 AND status = $3
            RETURNING id, user_id, friend_id, status
            "#,
        )
        .bind(requester_id)
        .bind(addressee_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
