use super::errors::PasswordHashError;
use crate::user::PasswordHash;

/// Slow, salted, one-way password hashing.
pub trait PasswordHasherPort: Send + Sync {
    /// Hashes `plaintext` with a fresh random salt.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Constant-time check of `candidate` against `hash`.
    fn verify(&self, candidate: &str, hash: &PasswordHash) -> bool;
}
