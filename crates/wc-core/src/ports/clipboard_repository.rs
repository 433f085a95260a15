use async_trait::async_trait;

use super::errors::RepositoryError;
use crate::clipboard::ClipboardItem;
use crate::ids::{ItemId, UserId};

#[async_trait]
pub trait ClipboardItemRepositoryPort: Send + Sync {
    async fn insert(&self, item: &ClipboardItem) -> Result<(), RepositoryError>;

    /// All items of `owner`, newest first (`created_at` desc, then id desc).
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<ClipboardItem>, RepositoryError>;

    /// First item of [`Self::list_by_owner`]'s ordering.
    async fn latest_by_owner(&self, owner: UserId) -> Result<Option<ClipboardItem>, RepositoryError>;

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<ClipboardItem>, RepositoryError>;

    /// Deletes the item only when it belongs to `owner`. Returns whether a
    /// row was removed.
    async fn delete_owned(&self, id: &ItemId, owner: UserId) -> Result<bool, RepositoryError>;
}
