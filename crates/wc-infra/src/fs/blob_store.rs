//! Flat-directory blob storage / 文件系统 Blob 存储
//!
//! Every blob is one file directly under the root, named `<uuid><ext>`.
//! The locator handed out is that file name.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

use wc_core::ports::{BlobSource, BlobStoreError, BlobStorePort, OpenedBlob};
use wc_core::StorageLocator;

const MAX_EXTENSION_LEN: usize = 16;

pub struct FsBlobStore {
    root: PathBuf,
    max_bytes: u64,
}

impl FsBlobStore {
    /// Create a store rooted at `root` that refuses blobs larger than
    /// `max_bytes`. The directory is created lazily on first write.
    pub fn new(root: PathBuf, max_bytes: u64) -> Self {
        Self { root, max_bytes }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a locator to its file, refusing anything that is not a single
    /// plain file name (no separators, no `..`).
    fn resolve(&self, locator: &StorageLocator) -> Result<PathBuf, BlobStoreError> {
        let mut components = Path::new(locator.as_str()).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.root.join(name)),
            _ => Err(BlobStoreError::InvalidLocator),
        }
    }
}

/// Keeps `suggested` only if it is a short `.alnum` extension.
fn sanitize_extension(suggested: &str) -> &str {
    match suggested.strip_prefix('.') {
        Some(rest)
            if !rest.is_empty()
                && suggested.len() <= MAX_EXTENSION_LEN
                && rest.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            suggested
        }
        _ => "",
    }
}

fn not_found_or_io(err: std::io::Error) -> BlobStoreError {
    if err.kind() == ErrorKind::NotFound {
        BlobStoreError::NotFound
    } else {
        BlobStoreError::Io(err)
    }
}

#[async_trait]
impl BlobStorePort for FsBlobStore {
    async fn store(
        &self,
        source: BlobSource<'_>,
        suggested_name: &str,
    ) -> Result<StorageLocator, BlobStoreError> {
        fs::create_dir_all(&self.root).await?;

        let name = format!("{}{}", uuid::Uuid::new_v4(), sanitize_extension(suggested_name));
        let path = self.root.join(&name);
        let mut file = fs::File::create(&path).await?;

        // One byte past the limit is enough to know it was exceeded.
        let mut limited = source.take(self.max_bytes.saturating_add(1));
        let written = match tokio::io::copy(&mut limited, &mut file).await {
            Ok(n) => n,
            Err(err) => {
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(err.into());
            }
        };

        if written > self.max_bytes {
            drop(file);
            let _ = fs::remove_file(&path).await;
            debug!(limit = self.max_bytes, "Blob rejected, size limit exceeded");
            return Err(BlobStoreError::TooLarge {
                limit_bytes: self.max_bytes,
            });
        }

        file.flush().await?;
        debug!(locator = %name, size = written, "Blob stored");
        Ok(StorageLocator::new(name))
    }

    async fn open(&self, locator: &StorageLocator) -> Result<OpenedBlob, BlobStoreError> {
        let path = self.resolve(locator)?;
        let file = fs::File::open(&path).await.map_err(not_found_or_io)?;
        let size_bytes = file.metadata().await?.len();
        Ok(OpenedBlob {
            reader: Box::pin(file),
            size_bytes,
        })
    }

    async fn remove(&self, locator: &StorageLocator) -> Result<(), BlobStoreError> {
        let path = self.resolve(locator)?;
        fs::remove_file(&path).await.map_err(not_found_or_io)
    }
}
