//! Clipboard item domain / 剪贴板条目领域模型

mod item;
pub mod mime;
mod payload;

pub use item::{ClipboardItem, LatestItem};
pub use payload::{BlobKind, ClipboardPayload, EmptyContent, ItemType, StorageLocator, UnknownItemType};
