mod clipboard_item_mapper;
mod user_mapper;

pub use clipboard_item_mapper::ClipboardItemRowMapper;
pub use user_mapper::UserRowMapper;
