//! User repository for database operations
//!
//! Also defines [`CredentialStore`], the narrow view of the user table that
//! the login and registration flow depends on.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use task_manager_shared::Role;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Parse the stored role; an unknown value is a data error
    pub fn role(&self) -> Result<Role> {
        self.role
            .parse::<Role>()
            .map_err(|e| anyhow::anyhow!("User {} has invalid role: {}", self.id, e))
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub email: Option<String>,
}

/// Lookup and insert of user credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a user by unique username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Insert a new user; a duplicate username surfaces as a unique violation
    async fn create(&self, input: CreateUser) -> Result<UserRecord>;
}

/// [`CredentialStore`] backed by the PostgreSQL `users` table
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        UserRepository::find_by_username(&self.pool, username).await
    }

    async fn create(&self, input: CreateUser) -> Result<UserRecord> {
        UserRepository::create(&self.pool, input).await
    }
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(pool: &PgPool, input: CreateUser) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, password_hash, role, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, role, email, created_at
            "#,
        )
        .bind(&input.username)
        .bind(&input.password_hash)
        .bind(input.role.as_str())
        .bind(&input.email)
        .fetch_one(pool)
        .await
        .context("Failed to insert user")?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, password_hash, role, email, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Check if a user id exists
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }
}

/// Whether an error from a store insert is a unique-constraint violation
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<sqlx::Error>())
        .filter_map(|e| e.as_database_error())
        .any(|db| db.is_unique_violation())
}
