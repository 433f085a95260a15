use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Type tag persisted alongside every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Text,
    File,
    Image,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Text => "text",
            ItemType::File => "file",
            ItemType::Image => "image",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown clipboard item type: {0}")]
pub struct UnknownItemType(pub String);

impl FromStr for ItemType {
    type Err = UnknownItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ItemType::Text),
            "file" => Ok(ItemType::File),
            "image" => Ok(ItemType::Image),
            other => Err(UnknownItemType(other.to_string())),
        }
    }
}

/// The two blob-backed item types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKind {
    File,
    Image,
}

impl BlobKind {
    pub fn from_is_image(is_image: bool) -> Self {
        if is_image {
            BlobKind::Image
        } else {
            BlobKind::File
        }
    }

    pub fn item_type(self) -> ItemType {
        match self {
            BlobKind::File => ItemType::File,
            BlobKind::Image => ItemType::Image,
        }
    }
}

/// Opaque handle produced by the blob store. Internal only; never serialized
/// towards clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageLocator(String);

impl StorageLocator {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("text content cannot be empty")]
pub struct EmptyContent;

/// What an item carries. Exactly one payload shape exists per item, selected
/// by its type: inline text, or a display name plus a blob locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    Text {
        content: String,
    },
    Blob {
        filename: String,
        locator: StorageLocator,
        kind: BlobKind,
    },
}

impl ClipboardPayload {
    pub fn text(content: impl Into<String>) -> Result<Self, EmptyContent> {
        let content = content.into();
        if content.is_empty() {
            return Err(EmptyContent);
        }
        Ok(ClipboardPayload::Text { content })
    }

    pub fn blob(filename: impl Into<String>, locator: StorageLocator, kind: BlobKind) -> Self {
        ClipboardPayload::Blob {
            filename: filename.into(),
            locator,
            kind,
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            ClipboardPayload::Text { .. } => ItemType::Text,
            ClipboardPayload::Blob { kind, .. } => kind.item_type(),
        }
    }
}
