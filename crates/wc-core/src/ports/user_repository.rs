use async_trait::async_trait;

use super::errors::RepositoryError;
use crate::ids::UserId;
use crate::user::{NewUser, User, Username};

#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// Inserts a user and returns it with its assigned id.
    ///
    /// Username uniqueness is enforced atomically by storage; a duplicate
    /// yields [`RepositoryError::Conflict`].
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
}
