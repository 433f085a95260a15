use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint rejected the write.
    #[error("record conflicts with an existing one")]
    Conflict,

    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("blob not found")]
    NotFound,

    #[error("blob exceeds the maximum size of {limit_bytes} bytes")]
    TooLarge { limit_bytes: u64 },

    #[error("invalid storage locator")]
    InvalidLocator,

    #[error("blob io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(pub String);
