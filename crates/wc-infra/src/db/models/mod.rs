mod clipboard_item_row;
mod user_row;

pub use clipboard_item_row::ClipboardItemRow;
pub use user_row::{NewUserRow, UserRow};
