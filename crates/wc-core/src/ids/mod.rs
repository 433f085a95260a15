//! ID type wrappers for type safety.

mod id_macro;
pub mod item_id;
pub mod user_id;

pub use item_id::ItemId;
pub use user_id::UserId;
