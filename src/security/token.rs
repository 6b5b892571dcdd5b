use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::models::Role;

type SigningKey = Hmac<Sha256>;

/// Claims carried by the session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Signing key rejected: {0}")]
    InvalidKey(String),

    #[error("Failed to sign token: {0}")]
    Signing(#[source] jwt::Error),

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token uses an unexpected signing algorithm")]
    WrongAlgorithm,

    #[error("Token has expired")]
    Expired,

    #[error("Token is not yet valid")]
    NotYetValid,
}

/// Issues and verifies HS256 session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    key: SigningKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, TokenError> {
        let key = SigningKey::new_from_slice(secret.as_bytes())
            .map_err(|e| TokenError::InvalidKey(e.to_string()))?;
        Ok(Self { key, ttl })
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(
        &self,
        user_id: i32,
        username: &str,
        email: &str,
        role: Role,
    ) -> Result<String, TokenError> {
        self.issue_at(user_id, username, email, role, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        user_id: i32,
        username: &str,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        claims.sign_with_key(&self.key).map_err(TokenError::Signing)
    }

    /// Check signature, algorithm and validity window, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims: Claims = token.verify_with_key(&self.key).map_err(|e| match e {
            jwt::Error::AlgorithmMismatch(..) => TokenError::WrongAlgorithm,
            jwt::Error::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        })?;

        let now = Utc::now().timestamp();
        if claims.exp <= now {
            return Err(TokenError::Expired);
        }
        // One minute of leeway for clock skew between replicas.
        if claims.iat > now + 60 {
            return Err(TokenError::NotYetValid);
        }

        Ok(claims)
    }
}
