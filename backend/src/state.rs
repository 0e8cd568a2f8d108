//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: JWT keys, DB pools are created once
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::{CredentialStore, PgCredentialStore};
use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// # Performance
///
/// - `db`: PgPool is internally Arc'd, cloning is O(1)
/// - `jwt`: Pre-computed keys wrapped in Arc, cloning is O(1)
/// - `users`: Trait object behind Arc, cloning is O(1)
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Credential lookups for login and registration
    pub users: Arc<dyn CredentialStore>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Fails when the configured signing secret is empty. Call once at
    /// startup; key derivation is not repeated per request.
    pub fn new(db: PgPool, config: &AppConfig) -> anyhow::Result<Self> {
        let jwt = JwtService::new(&config.jwt.secret).context("Invalid JWT configuration")?;
        let users: Arc<dyn CredentialStore> = Arc::new(PgCredentialStore::new(db.clone()));

        Ok(Self {
            db,
            jwt,
            users,
        })
    }

    /// Replace the credential store
    pub fn with_credential_store(mut self, users: Arc<dyn CredentialStore>) -> Self {
        self.users = users;
        self
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get a reference to the credential store
    #[inline]
    pub fn users(&self) -> &dyn CredentialStore {
        self.users.as_ref()
    }
}
