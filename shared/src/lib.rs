//! Task Manager Shared Library
//!
//! This crate contains shared types, models, and utilities used by the
//! backend and by API clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{Friendship, FriendshipStatus, Role, Task, TaskStatus, UserStats};
pub use types::*;
