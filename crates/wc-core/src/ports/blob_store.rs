use async_trait::async_trait;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::AsyncRead;

use super::errors::BlobStoreError;
use crate::clipboard::StorageLocator;

/// Byte source handed to the store for persisting.
pub type BlobSource<'a> = Pin<Box<dyn AsyncRead + Send + 'a>>;

/// A blob opened for reading.
pub struct OpenedBlob {
    pub reader: BlobSource<'static>,
    pub size_bytes: u64,
}

/// Physical blob storage. The store never interprets the bytes.
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    /// Persists everything readable from `source` and returns a locator.
    ///
    /// Must abort with [`BlobStoreError::TooLarge`] as soon as the configured
    /// maximum is exceeded, leaving nothing behind.
    async fn store(
        &self,
        source: BlobSource<'_>,
        suggested_name: &str,
    ) -> Result<StorageLocator, BlobStoreError>;

    async fn open(&self, locator: &StorageLocator) -> Result<OpenedBlob, BlobStoreError>;

    async fn remove(&self, locator: &StorageLocator) -> Result<(), BlobStoreError>;
}

#[async_trait]
impl<T: BlobStorePort + ?Sized> BlobStorePort for Arc<T> {
    async fn store(
        &self,
        source: BlobSource<'_>,
        suggested_name: &str,
    ) -> Result<StorageLocator, BlobStoreError> {
        (**self).store(source, suggested_name).await
    }

    async fn open(&self, locator: &StorageLocator) -> Result<OpenedBlob, BlobStoreError> {
        (**self).open(locator).await
    }

    async fn remove(&self, locator: &StorageLocator) -> Result<(), BlobStoreError> {
        (**self).remove(locator).await
    }
}
