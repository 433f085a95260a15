//! Wire shapes. Times are RFC 3339 in UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wc_core::{ClipboardItem, ClipboardPayload, ItemType, User};

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            username: user.username.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for MeResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            username: user.username.as_str().to_string(),
            created_at: timestamp(user.created_at_ms),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Item as clients see it. The storage locator stays server-side.
#[derive(Debug, Serialize)]
pub struct ItemDto {
    pub id: String,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClipboardItem> for ItemDto {
    fn from(item: ClipboardItem) -> Self {
        let item_type = item.payload.item_type();
        let (content, filename) = match item.payload {
            ClipboardPayload::Text { content } => (Some(content), None),
            ClipboardPayload::Blob { filename, .. } => (None, Some(filename)),
        };
        Self {
            id: item.id.into_inner(),
            user_id: item.owner.get(),
            item_type,
            content,
            filename,
            created_at: timestamp(item.created_at_ms),
            updated_at: timestamp(item.updated_at_ms),
        }
    }
}

fn timestamp(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}
