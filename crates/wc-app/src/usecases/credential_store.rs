use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use wc_core::ports::{ClockPort, PasswordHasherPort, RepositoryError, UserRepositoryPort};
use wc_core::user::MIN_PASSWORD_LEN;
use wc_core::{NewUser, PasswordHash, User, UserId, Username};

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("username must be between 3 and 50 characters")]
    InvalidUsername,

    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("user not found")]
    NotFound,

    #[error("credential store failure: {0}")]
    Internal(String),
}

impl From<RepositoryError> for CredentialError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => CredentialError::NotFound,
            RepositoryError::Conflict => CredentialError::UsernameTaken,
            RepositoryError::Storage(msg) => CredentialError::Internal(msg),
        }
    }
}

/// Owns user records: creation, lookup and password verification.
/// 用户记录：创建、查询与密码校验。
pub struct CredentialStore {
    users: Arc<dyn UserRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
    clock: Arc<dyn ClockPort>,
}

impl CredentialStore {
    pub fn from_ports(
        users: Arc<dyn UserRepositoryPort>,
        hasher: Arc<dyn PasswordHasherPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    /// Creates a user after hashing `password`.
    ///
    /// Uniqueness is enforced by the repository's unique index, there is no
    /// lookup beforehand.
    #[tracing::instrument(
        name = "usecase.credential_store.create_user",
        skip(self, password),
        fields(username = %username)
    )]
    pub async fn create_user(&self, username: &str, password: &str) -> Result<User, CredentialError> {
        let username = Username::parse(username).map_err(|_| CredentialError::InvalidUsername)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialError::PasswordTooShort);
        }

        // Pre-write step: the row only ever receives an encoded hash.
        let password_hash = self.hash_password(password).await?;

        let user = self
            .users
            .insert(NewUser {
                username,
                password_hash,
                created_at_ms: self.clock.now_ms(),
            })
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<User, CredentialError> {
        // A name that fails validation can never have been stored.
        let Ok(username) = Username::parse(username) else {
            return Err(CredentialError::NotFound);
        };
        self.users
            .find_by_username(&username)
            .await?
            .ok_or(CredentialError::NotFound)
    }

    pub async fn find_by_id(&self, id: UserId) -> Result<User, CredentialError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(CredentialError::NotFound)
    }

    /// Checks `candidate` against the user's stored hash. Neither value is
    /// logged.
    pub async fn verify_password(&self, user: &User, candidate: &str) -> bool {
        let hasher = self.hasher.clone();
        let hash = user.password_hash.clone();
        let candidate = candidate.to_owned();
        match tokio::task::spawn_blocking(move || hasher.verify(&candidate, &hash)).await {
            Ok(matches) => matches,
            Err(err) => {
                warn!(error = %err, "Password verification task failed");
                false
            }
        }
    }

    /// Burns the hashing work of a real check for a lookup that found no
    /// user, so a miss costs as much as a wrong password. Always `false`.
    pub async fn verify_without_user(&self, candidate: &str) -> bool {
        if let Err(err) = self.hash_password(candidate).await {
            debug!(error = %err, "Placeholder password hash failed");
        }
        false
    }

    async fn hash_password(&self, password: &str) -> Result<PasswordHash, CredentialError> {
        let hasher = self.hasher.clone();
        let plaintext = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| CredentialError::Internal(format!("hashing task failed: {e}")))?
            .map_err(|e| CredentialError::Internal(e.to_string()))
    }
}
