//! Bearer-token claims and verification failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::UserId;

/// Claim set carried by a bearer token. Times are seconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(user: UserId, issued_at_secs: i64, ttl_secs: i64) -> Self {
        Self {
            sub: user.to_string(),
            iat: issued_at_secs,
            exp: issued_at_secs.saturating_add(ttl_secs),
        }
    }

    pub fn subject(&self) -> Result<UserId, TokenError> {
        self.sub.parse::<UserId>().map_err(|_| TokenError::Malformed)
    }

    /// Strict comparison, no leeway: a token is dead from its `exp` second on.
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        now_secs >= self.exp
    }
}

/// Why a token was rejected. These distinctions are for logs only; callers
/// outside the token service see a single generic failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature mismatch")]
    BadSignature,

    #[error("token expired")]
    Expired,

    #[error("unexpected signing method")]
    UnknownSigningMethod,

    #[error("token codec failure: {0}")]
    Internal(String),
}
