use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use super::credential_store::{CredentialError, CredentialStore};
use super::token_service::TokenService;
use wc_core::User;

#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown user and wrong password are indistinguishable.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("login failed: {0}")]
    Internal(String),
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

pub struct Login {
    credentials: Arc<CredentialStore>,
    tokens: Arc<TokenService>,
}

impl Login {
    pub fn new(credentials: Arc<CredentialStore>, tokens: Arc<TokenService>) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    #[tracing::instrument(name = "usecase.login.execute", skip(self, password), fields(username = %username))]
    pub async fn execute(&self, username: &str, password: &str) -> Result<LoginOutcome, LoginError> {
        let user = match self.credentials.find_by_username(username).await {
            Ok(user) => user,
            Err(CredentialError::NotFound) => {
                self.credentials.verify_without_user(password).await;
                return Err(LoginError::InvalidCredentials);
            }
            Err(err) => return Err(LoginError::Internal(err.to_string())),
        };

        if !self.credentials.verify_password(&user, password).await {
            return Err(LoginError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.id)
            .map_err(|e| LoginError::Internal(e.to_string()))?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome { user, token })
    }
}
