//! User accounts / 用户账户
//!
//! A user owns clipboard items. The password is only ever held as a salted
//! one-way hash; plaintext never reaches this module.

mod password;
mod username;

pub use password::{PasswordHash, MIN_PASSWORD_LEN};
pub use username::{InvalidUsername, Username, USERNAME_MAX_LEN, USERNAME_MIN_LEN};

use crate::ids::UserId;

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

/// A user that has not been persisted yet; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub created_at_ms: i64,
}
