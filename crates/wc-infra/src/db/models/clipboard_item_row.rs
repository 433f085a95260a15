use crate::db::schema::clipboard_items;
use diesel::prelude::*;

/// One row per clipboard item. `content` is set for text rows,
/// `filename` and `storage_path` for file and image rows.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = clipboard_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClipboardItemRow {
    pub id: String,
    pub user_id: i64,
    pub item_type: String,
    pub content: Option<String>,
    pub filename: Option<String>,
    pub storage_path: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}
