//! Authentication module
//!
//! Provides JWT-based authentication, argon2 password hashing and
//! role-based access control.

pub mod access;
mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, TokenError, TOKEN_TTL_HOURS};
pub use middleware::{extract_token, require_auth, AuthenticatedIdentity};
pub use password::PasswordService;
