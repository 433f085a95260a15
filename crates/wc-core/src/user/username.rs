use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters")]
pub struct InvalidUsername;

/// A validated, case-sensitive username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvalidUsername> {
        let raw = raw.into();
        let len = raw.chars().count();
        if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
            return Err(InvalidUsername);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
