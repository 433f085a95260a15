use std::fmt;

/// Minimum accepted plaintext password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

const PHC_PREFIX: &str = "$argon2";

/// An encoded password hash in PHC string format
/// (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`).
///
/// Only values that already look like a hash can be wrapped, so a plaintext
/// password can never be stored by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps `encoded` if it looks like a PHC hash, `None` otherwise.
    pub fn parse(encoded: impl Into<String>) -> Option<Self> {
        let encoded = encoded.into();
        Self::looks_hashed(&encoded).then_some(Self(encoded))
    }

    /// Format discriminator used before any write and when reading rows back.
    pub fn looks_hashed(candidate: &str) -> bool {
        if !candidate.starts_with(PHC_PREFIX) {
            return false;
        }
        // "", algorithm, [version], params, salt, hash
        let segments: Vec<&str> = candidate.split('$').collect();
        matches!(segments.len(), 5 | 6) && segments.iter().skip(1).all(|s| !s.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
