use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use wc_core::User;

use super::credential_store::{CredentialError, CredentialStore};
use super::token_service::TokenService;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("authorization header is required")]
    MissingHeader,

    #[error("authorization header format must be Bearer {{token}}")]
    MalformedHeader,

    #[error("invalid or expired token")]
    InvalidToken,

    /// The token is genuine but its subject no longer exists.
    #[error("user not found")]
    UnknownUser,

    #[error("access gate failure: {0}")]
    Internal(String),
}

/// Resolves the `Authorization` header of a request to a live user.
pub struct AccessGate {
    tokens: Arc<TokenService>,
    credentials: Arc<CredentialStore>,
}

impl AccessGate {
    pub fn new(tokens: Arc<TokenService>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            tokens,
            credentials,
        }
    }

    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<User, AccessError> {
        let header = authorization.ok_or(AccessError::MissingHeader)?;
        let token = bearer_token(header).ok_or(AccessError::MalformedHeader)?;

        let user_id = self
            .tokens
            .verify(token)
            .map_err(|_| AccessError::InvalidToken)?;

        // Account existence is checked on every request.
        match self.credentials.find_by_id(user_id).await {
            Ok(user) => Ok(user),
            Err(CredentialError::NotFound) => {
                debug!(user_id = %user_id, "Valid token for unknown user");
                Err(AccessError::UnknownUser)
            }
            Err(err) => Err(AccessError::Internal(err.to_string())),
        }
    }
}

/// Extracts `<token>` from `Bearer <token>`: exact, case-sensitive scheme and
/// a single space.
fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix(BEARER_PREFIX)?;
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}
