//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod friendship;
pub mod task;
pub mod user;

pub use friendship::{FriendshipRecord, FriendshipRepository};
pub use task::{TaskCounts, TaskFields, TaskRecord, TaskRepository};
pub use user::{
    is_unique_violation, CreateUser, CredentialStore, PgCredentialStore, UserRecord, UserRepository,
};
