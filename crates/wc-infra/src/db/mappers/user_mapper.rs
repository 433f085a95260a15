use anyhow::{anyhow, Result};
use wc_core::{NewUser, PasswordHash, User, UserId, Username};

use crate::db::models::{NewUserRow, UserRow};
use crate::db::ports::{InsertMapper, RowMapper};

pub struct UserRowMapper;

impl InsertMapper<NewUser, NewUserRow> for UserRowMapper {
    fn to_row(&self, domain: &NewUser) -> Result<NewUserRow> {
        Ok(NewUserRow {
            username: domain.username.as_str().to_string(),
            password_hash: domain.password_hash.as_str().to_string(),
            created_at_ms: domain.created_at_ms,
            updated_at_ms: domain.created_at_ms,
        })
    }
}

impl RowMapper<UserRow, User> for UserRowMapper {
    fn to_domain(&self, row: &UserRow) -> Result<User> {
        let username = Username::parse(row.username.as_str())
            .map_err(|e| anyhow!("user {}: {e}", row.id))?;
        // A row whose credential column is not an encoded hash is corrupt,
        // it is never handed out as if it were one.
        let password_hash = PasswordHash::parse(row.password_hash.as_str())
            .ok_or_else(|| anyhow!("user {}: stored credential is not a password hash", row.id))?;

        Ok(User {
            id: UserId::new(row.id),
            username,
            password_hash,
            created_at_ms: row.created_at_ms,
            updated_at_ms: row.updated_at_ms,
        })
    }
}
