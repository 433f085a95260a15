use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use rand::RngCore;

use wc_core::ports::{PasswordHashError, PasswordHasherPort};
use wc_core::PasswordHash;

const SALT_LEN: usize = 16;

/// Argon2id with the crate's default cost parameters, encoded as a PHC string.
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let mut salt = [0u8; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);
        let salt = SaltString::encode_b64(&salt).map_err(|e| PasswordHashError(e.to_string()))?;

        let encoded = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordHashError(e.to_string()))?
            .to_string();

        PasswordHash::parse(encoded)
            .ok_or_else(|| PasswordHashError("argon2 produced an unexpected encoding".into()))
    }

    fn verify(&self, candidate: &str, hash: &PasswordHash) -> bool {
        match PhcString::new(hash.as_str()) {
            Ok(parsed) => self
                .argon2
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
