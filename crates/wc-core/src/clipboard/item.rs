use super::payload::{BlobKind, ClipboardPayload, StorageLocator};
use crate::ids::{ItemId, UserId};

/// A single paste. Immutable once created: a new paste is a new item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    pub id: ItemId,
    pub owner: UserId,
    pub payload: ClipboardPayload,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// How the most recent item is handed to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatestItem {
    /// Text is returned directly.
    Inline { content: String },
    /// Blobs are fetched through a separate operation keyed by item id.
    Redirect { item_id: ItemId, kind: BlobKind },
}

impl ClipboardItem {
    /// Creates an item with a freshly assigned id.
    pub fn create(owner: UserId, payload: ClipboardPayload, now_ms: i64) -> Self {
        Self {
            id: ItemId::new(),
            owner,
            payload,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }

    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    /// Locator of the backing blob, if this item has one.
    pub fn storage_locator(&self) -> Option<&StorageLocator> {
        match &self.payload {
            ClipboardPayload::Text { .. } => None,
            ClipboardPayload::Blob { locator, .. } => Some(locator),
        }
    }

    pub fn latest_view(&self) -> LatestItem {
        match &self.payload {
            ClipboardPayload::Text { content } => LatestItem::Inline {
                content: content.clone(),
            },
            ClipboardPayload::Blob { kind, .. } => LatestItem::Redirect {
                item_id: self.id.clone(),
                kind: *kind,
            },
        }
    }
}
