//! User service for registration and login
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - JWT service is passed by reference (pre-computed keys)

use crate::auth::{Claims, JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{is_unique_violation, CreateUser, CredentialStore};
use task_manager_shared::validation::{validate_email, validate_password, validate_username};
use once_cell::sync::Lazy;
use task_manager_shared::{AuthError, RegisterRequest, UserProfile};
use tracing::{info, warn};

/// Argon2id hash checked against when the username is unknown, so that
/// branch costs one verification like the wrong-password branch
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| PasswordService::hash("unused-login-placeholder").ok());

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// The role defaults to `user` when the request omits it.
    pub async fn register(store: &dyn CredentialStore, req: RegisterRequest) -> Result<UserProfile, ApiError> {
        validate_username(&req.username).map_err(ApiError::Validation)?;
        validate_password(&req.password).map_err(ApiError::Validation)?;
        if let Some(email) = req.email.as_deref() {
            validate_email(email).map_err(ApiError::Validation)?;
        }

        if store
            .find_by_username(&req.username)
            .await
            .map_err(ApiError::Internal)?
            .is_some()
        {
            return Err(ApiError::Conflict("Username already taken".to_string()));
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let role = req.role.unwrap_or_default();
        let record = store
            .create(CreateUser {
                username: req.username,
                password_hash,
                role,
                email: req.email,
            })
            .await
            .map_err(|e| {
                // Lost a race with a concurrent registration of the same name.
                if is_unique_violation(&e) {
                    ApiError::Conflict("Username already taken".to_string())
                } else {
                    ApiError::Internal(e)
                }
            })?;

        info!(user_id = record.id, username = %record.username, role = %role, "User registered");

        Ok(UserProfile {
            id: record.id,
            username: record.username,
            role,
            email: record.email,
        })
    }

    /// Exchange a username and password for a signed token
    ///
    /// Unknown users, wrong passwords and unreadable stored hashes all yield
    /// the same `invalid credentials` rejection.
    pub async fn login(
        store: &dyn CredentialStore,
        jwt_service: &JwtService,
        username: &str,
        password: &str,
    ) -> Result<(String, Claims), ApiError> {
        let Some(user) = store
            .find_by_username(username)
            .await
            .map_err(ApiError::Internal)?
        else {
            let password = password.to_string();
            let _ = tokio::task::spawn_blocking(move || {
                DUMMY_HASH
                    .as_deref()
                    .map(|dummy| PasswordService::verify(&password, dummy))
            })
            .await;
            info!(username = %username, "Login rejected: unknown user");
            return Err(AuthError::InvalidCredentials.into());
        };

        // Verify password on blocking thread pool (CPU-intensive)
        let valid = match PasswordService::verify_async(password.to_string(), user.password_hash.clone()).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!(user_id = user.id, error = %e, "Stored password hash could not be verified");
                false
            }
        };

        if !valid {
            info!(user_id = user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let role = user.role().map_err(ApiError::Internal)?;
        let (token, claims) = jwt_service
            .issue_for(user.id, &user.username, role)
            .map_err(|e| ApiError::Internal(e.into()))?;

        info!(user_id = user.id, role = %role, "User logged in");
        Ok((token, claims))
    }
}
