//! Shared fixtures for unit and router tests

use crate::config::{AppConfig, JwtConfig};
use crate::repositories::{CreateUser, CredentialStore, UserRecord};
use crate::state::AppState;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

pub const TEST_SECRET: &str = "router-test-secret";

/// In-memory [`CredentialStore`]
#[derive(Default)]
pub struct MemoryCredentialStore {
    users: Mutex<Vec<UserRecord>>,
}

impl MemoryCredentialStore {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, input: CreateUser) -> Result<UserRecord> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == input.username) {
            anyhow::bail!("duplicate username {}", input.username);
        }

        let record = UserRecord {
            id: users.len() as i64 + 1,
            username: input.username,
            password_hash: input.password_hash,
            role: input.role.as_str().to_string(),
            email: input.email,
            created_at: Utc::now(),
        };
        users.push(record.clone());
        Ok(record)
    }
}

/// App state over an unconnected pool and an in-memory credential store
pub fn test_state() -> AppState {
    let config = AppConfig {
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
        ..AppConfig::default()
    };
    let pool = PgPool::connect_lazy(&config.database.url).unwrap();

    AppState::new(pool, &config)
        .unwrap()
        .with_credential_store(Arc::new(MemoryCredentialStore::default()))
}
