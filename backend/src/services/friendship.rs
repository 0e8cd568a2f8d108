//! Friendship requests
//!
//! A request goes from the caller to another user and stays `pending` until
//! the addressee accepts or rejects it.

use crate::error::ApiError;
use crate::repositories::{is_unique_violation, FriendshipRepository, UserRepository};
use sqlx::PgPool;
use task_manager_shared::{Friendship, FriendshipStatus};
use tracing::info;

/// Friendship service
pub struct FriendshipService;

impl FriendshipService {
    /// Send a request from `user_id` to `friend_id`
    pub async fn request(pool: &PgPool, user_id: i64, friend_id: i64) -> Result<Friendship, ApiError> {
        if user_id == friend_id {
            return Err(ApiError::BadRequest("Cannot send a friend request to yourself".to_string()));
        }

        if !UserRepository::exists(pool, friend_id)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::NotFound(format!("User {} not found", friend_id)));
        }

        let record = FriendshipRepository::create_pending(pool, user_id, friend_id)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::Conflict("Friend request already exists".to_string())
                } else {
                    ApiError::Internal(e)
                }
            })?;

        info!(user_id, friend_id, "Friend request sent");
        Friendship::try_from(record).map_err(ApiError::Internal)
    }

    /// Accept the pending request `requester_id` sent to `addressee_id`
    pub async fn accept(pool: &PgPool, addressee_id: i64, requester_id: i64) -> Result<Friendship, ApiError> {
        Self::decide(pool, addressee_id, requester_id, FriendshipStatus::Accepted).await
    }

    /// Reject the pending request `requester_id` sent to `addressee_id`
    pub async fn reject(pool: &PgPool, addressee_id: i64, requester_id: i64) -> Result<Friendship, ApiError> {
        Self::decide(pool, addressee_id, requester_id, FriendshipStatus::Rejected).await
    }

    async fn decide(
        pool: &PgPool,
        addressee_id: i64,
        requester_id: i64,
        to: FriendshipStatus,
    ) -> Result<Friendship, ApiError> {
        let from = FriendshipStatus::Pending;
        debug_assert!(from.can_transition_to(to));

        let record = FriendshipRepository::transition(pool, requester_id, addressee_id, from, to)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                ApiError::NotFound(format!("No pending friend request from user {}", requester_id))
            })?;

        info!(user_id = addressee_id, requester_id, status = %to, "Friend request decided");
        Friendship::try_from(record).map_err(ApiError::Internal)
    }
}
