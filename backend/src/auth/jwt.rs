//! JWT token issuance and verification
//!
//! Tokens are HS256 JWTs whose payload is `{username, userID, role, exp}`.
//! Keys are derived once from the signing secret and shared through
//! `AppState`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use task_manager_shared::Role;
use thiserror::Error;

/// Lifetime of every issued token
pub const TOKEN_TTL_HOURS: i64 = 24;

/// The only accepted signing algorithm
const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims expiring one TTL after `issued_at`
    pub fn new(user_id: i64, username: impl Into<String>, role: Role, issued_at: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            user_id,
            role,
            exp: (issued_at + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }

    /// A token is live strictly before its expiry second
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// Token codec failures
///
/// Middleware collapses every verification variant into the same
/// "invalid token" response; the variants exist for logs and tests.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("signing secret is empty")]
    EmptySecret,

    #[error("failed to encode token: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),

    #[error("token signature mismatch")]
    InvalidSignature,

    #[error("token algorithm is not HS256")]
    AlgorithmMismatch,

    #[error("token expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// JWT service for token operations
///
/// Immutable after construction; clones share the same keys.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
}

impl JwtService {
    /// Create a JWT service from the signing secret
    ///
    /// An empty secret is refused so nothing is ever signed with it.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Expiry is checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
        })
    }

    /// Issue a token for a user, expiring one TTL from now
    pub fn issue_for(&self, user_id: i64, username: &str, role: Role) -> Result<(String, Claims), TokenError> {
        let claims = Claims::new(user_id, username, role, Utc::now());
        let token = self.issue(&claims)?;
        Ok((token, claims))
    }

    /// Sign a claims set
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(TOKEN_ALGORITHM), claims, &self.keys.encoding).map_err(TokenError::Encoding)
    }

    /// Verify a token against the current time
    #[inline]
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature, algorithm and expiry as of `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.keys.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch,
                _ => TokenError::Malformed(e),
            }
        })?;

        if token_data.claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}
