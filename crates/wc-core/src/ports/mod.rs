//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `wc-app` and the
//! adapters in `wc-infra`. Use cases only ever see these traits.

mod blob_store;
mod clipboard_repository;
mod clock;
pub mod errors;
mod password_hasher;
mod token_codec;
mod user_repository;

pub use blob_store::{BlobSource, BlobStorePort, OpenedBlob};
pub use clipboard_repository::ClipboardItemRepositoryPort;
pub use clock::ClockPort;
pub use errors::{BlobStoreError, PasswordHashError, RepositoryError};
pub use password_hasher::PasswordHasherPort;
pub use token_codec::TokenCodecPort;
pub use user_repository::UserRepositoryPort;
