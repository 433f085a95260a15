use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use super::credential_store::{CredentialError, CredentialStore};
use wc_core::User;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("registration is disabled")]
    Disabled,

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Self-service sign-up, gated by deployment configuration.
/// 自助注册，受部署配置控制。
pub struct RegisterUser {
    credentials: Arc<CredentialStore>,
    enabled: bool,
}

impl RegisterUser {
    pub fn new(credentials: Arc<CredentialStore>, enabled: bool) -> Self {
        Self {
            credentials,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Fails with [`RegistrationError::Disabled`] when sign-up is closed.
    /// Transports call this before looking at the request body.
    pub fn ensure_enabled(&self) -> Result<(), RegistrationError> {
        if self.enabled {
            Ok(())
        } else {
            info!("Registration attempt while disabled");
            Err(RegistrationError::Disabled)
        }
    }

    #[tracing::instrument(name = "usecase.register_user.execute", skip(self, password), fields(username = %username))]
    pub async fn execute(&self, username: &str, password: &str) -> Result<User, RegistrationError> {
        self.ensure_enabled()?;
        Ok(self.credentials.create_user(username, password).await?)
    }
}
