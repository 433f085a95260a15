//! Clipboard content store / 剪贴板内容存储
//!
//! Every item operation is scoped by owner. Items owned by someone else are
//! reported exactly like missing ones, so no operation leaks existence
//! across users.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use wc_core::clipboard::mime;
use wc_core::ports::{
    BlobSource, BlobStoreError, BlobStorePort, ClipboardItemRepositoryPort, ClockPort, OpenedBlob,
    RepositoryError,
};
use wc_core::{
    BlobKind, ClipboardItem, ClipboardPayload, ItemId, LatestItem, StorageLocator, UserId,
};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("text content cannot be empty")]
    EmptyContent,

    #[error("clipboard item not found")]
    NotFound,

    #[error("item is not a file or image")]
    NotABlobType,

    #[error("file must be an image")]
    InvalidContentType,

    /// Metadata exists but the stored bytes are gone.
    #[error("file not found on server")]
    BlobMissing,

    #[error(transparent)]
    Blob(BlobStoreError),

    #[error("content store failure: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ContentError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ContentError::NotFound,
            other => ContentError::Internal(other.to_string()),
        }
    }
}

impl From<BlobStoreError> for ContentError {
    fn from(err: BlobStoreError) -> Self {
        match err {
            BlobStoreError::NotFound => ContentError::BlobMissing,
            other => ContentError::Blob(other),
        }
    }
}

/// Bytes to be stored as a new file or image item.
pub struct UploadRequest<'a> {
    pub display_name: String,
    pub content_type: Option<String>,
    pub kind: BlobKind,
    pub source: BlobSource<'a>,
}

/// Blob-facing view of an item: what the transport needs to serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    pub filename: String,
    pub locator: StorageLocator,
    pub kind: BlobKind,
}

pub struct ContentStore {
    items: Arc<dyn ClipboardItemRepositoryPort>,
    blobs: Arc<dyn BlobStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl ContentStore {
    pub fn from_ports(
        items: Arc<dyn ClipboardItemRepositoryPort>,
        blobs: Arc<dyn BlobStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            items,
            blobs,
            clock,
        }
    }

    /// All items of `owner`, newest first. Empty when there are none.
    pub async fn list(&self, owner: UserId) -> Result<Vec<ClipboardItem>, ContentError> {
        Ok(self.items.list_by_owner(owner).await?)
    }

    /// The most recently created item of `owner`.
    ///
    /// Items sharing a creation timestamp are ordered by id, so repeated
    /// calls agree.
    pub async fn latest(&self, owner: UserId) -> Result<ClipboardItem, ContentError> {
        self.items
            .latest_by_owner(owner)
            .await?
            .ok_or(ContentError::NotFound)
    }

    /// [`Self::latest`] shaped for delivery: text inline, blobs by reference.
    pub async fn latest_view(&self, owner: UserId) -> Result<LatestItem, ContentError> {
        Ok(self.latest(owner).await?.latest_view())
    }

    #[tracing::instrument(
        name = "usecase.content_store.add_text",
        skip(self, content),
        fields(owner = %owner, len = content.len())
    )]
    pub async fn add_text(&self, owner: UserId, content: String) -> Result<ClipboardItem, ContentError> {
        let payload = ClipboardPayload::text(content).map_err(|_| ContentError::EmptyContent)?;
        self.create(owner, payload).await
    }

    /// Records a blob that the storage collaborator has already persisted.
    #[tracing::instrument(name = "usecase.content_store.add_blob", skip(self, locator), fields(owner = %owner))]
    pub async fn add_blob(
        &self,
        owner: UserId,
        display_name: String,
        locator: StorageLocator,
        is_image: bool,
    ) -> Result<ClipboardItem, ContentError> {
        let payload = ClipboardPayload::blob(display_name, locator, BlobKind::from_is_image(is_image));
        self.create(owner, payload).await
    }

    /// Streams an upload into the blob store, then records it.
    ///
    /// Images must declare an `image/*` content type. An image name without
    /// an extension becomes `image<ext>` with the extension taken from the
    /// content type. If recording fails the stored bytes are removed again.
    #[tracing::instrument(
        name = "usecase.content_store.upload",
        skip(self, request),
        fields(owner = %owner, kind = ?request.kind)
    )]
    pub async fn upload(
        &self,
        owner: UserId,
        request: UploadRequest<'_>,
    ) -> Result<ClipboardItem, ContentError> {
        let UploadRequest {
            mut display_name,
            content_type,
            kind,
            source,
        } = request;

        let mut extension = mime::extension_of(&display_name);
        if kind == BlobKind::Image {
            let content_type = content_type.as_deref().unwrap_or_default();
            if !mime::is_image_content_type(content_type) {
                return Err(ContentError::InvalidContentType);
            }
            if extension.is_none() {
                let inferred = mime::image_extension_for(content_type);
                display_name = format!("image{inferred}");
                extension = Some(inferred.to_string());
            }
        }

        let suggested_name = extension.unwrap_or_default();
        let locator = self.blobs.store(source, &suggested_name).await?;

        let payload = ClipboardPayload::blob(display_name, locator.clone(), kind);
        match self.create(owner, payload).await {
            Ok(item) => Ok(item),
            Err(err) => {
                if let Err(remove_err) = self.blobs.remove(&locator).await {
                    warn!(error = %remove_err, "Failed to remove blob of failed upload");
                }
                Err(err)
            }
        }
    }

    pub async fn get_by_id(&self, id: &ItemId) -> Result<ClipboardItem, ContentError> {
        self.items.find_by_id(id).await?.ok_or(ContentError::NotFound)
    }

    /// Locates the blob behind `id` for its owner.
    pub async fn fetch_blob(&self, id: &ItemId, requester: UserId) -> Result<BlobRef, ContentError> {
        let item = self.get_owned(id, requester).await?;
        match item.payload {
            ClipboardPayload::Blob {
                filename,
                locator,
                kind,
            } => Ok(BlobRef {
                filename,
                locator,
                kind,
            }),
            ClipboardPayload::Text { .. } => Err(ContentError::NotABlobType),
        }
    }

    /// [`Self::fetch_blob`] followed by opening the bytes.
    pub async fn open_blob(
        &self,
        id: &ItemId,
        requester: UserId,
    ) -> Result<(BlobRef, OpenedBlob), ContentError> {
        let blob = self.fetch_blob(id, requester).await?;
        let opened = self.blobs.open(&blob.locator).await?;
        Ok((blob, opened))
    }

    /// Deletes an item of `requester`.
    ///
    /// The metadata row is authoritative: once it is gone the call succeeds,
    /// and a failure to remove the backing blob is only logged.
    #[tracing::instrument(name = "usecase.content_store.delete", skip(self), fields(item_id = %id, requester = %requester))]
    pub async fn delete(&self, id: &ItemId, requester: UserId) -> Result<(), ContentError> {
        let item = self.get_owned(id, requester).await?;

        if !self.items.delete_owned(id, requester).await? {
            return Err(ContentError::NotFound);
        }

        if let Some(locator) = item.storage_locator() {
            if let Err(err) = self.blobs.remove(locator).await {
                warn!(item_id = %id, error = %err, "Blob removal failed, leaving orphan");
            }
        }

        info!(item_id = %id, "Clipboard item deleted");
        Ok(())
    }

    async fn get_owned(&self, id: &ItemId, requester: UserId) -> Result<ClipboardItem, ContentError> {
        match self.items.find_by_id(id).await? {
            Some(item) if item.is_owned_by(requester) => Ok(item),
            _ => Err(ContentError::NotFound),
        }
    }

    async fn create(&self, owner: UserId, payload: ClipboardPayload) -> Result<ClipboardItem, ContentError> {
        let item = ClipboardItem::create(owner, payload, self.clock.now_ms());
        self.items.insert(&item).await?;
        info!(item_id = %item.id, item_type = %item.payload.item_type(), "Clipboard item created");
        Ok(item)
    }
}
