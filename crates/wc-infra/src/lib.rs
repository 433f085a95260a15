//! # wc-infra
//!
//! Adapters behind the `wc-core` ports: diesel/SQLite repositories, the
//! filesystem blob store, argon2 password hashing and HS256 tokens.

pub mod db;
pub mod fs;
pub mod security;
pub mod time;

pub use fs::FsBlobStore;
pub use security::{Argon2PasswordHasher, JwtTokenCodec};
pub use time::SystemClock;
