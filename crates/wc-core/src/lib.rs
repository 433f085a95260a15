//! # wc-core
//!
//! Core domain models and ports for weicopy.
//!
//! This crate contains pure business types without any infrastructure dependencies.

pub mod auth;
pub mod clipboard;
pub mod config;
pub mod ids;
pub mod ports;
pub mod user;

// Re-export commonly used types at the crate root
pub use auth::{TokenClaims, TokenError};
pub use clipboard::{BlobKind, ClipboardItem, ClipboardPayload, ItemType, LatestItem, StorageLocator};
pub use config::AppConfig;
pub use ids::{ItemId, UserId};
pub use user::{NewUser, PasswordHash, User, Username};
