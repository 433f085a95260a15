use crate::auth::{TokenClaims, TokenError};

/// Signs and decodes compact bearer tokens with a symmetric MAC.
///
/// `decode` checks the algorithm and signature only; expiry is judged by the
/// caller against its own clock.
pub trait TokenCodecPort: Send + Sync {
    fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError>;

    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
