//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the auth primitives.

pub mod friendship;
pub mod stats;
pub mod task;
pub mod user;

pub use friendship::FriendshipService;
pub use stats::StatsService;
pub use task::TaskService;
pub use user::UserService;
