mod clipboard_item_repo;
mod user_repo;

pub use clipboard_item_repo::DieselClipboardItemRepository;
pub use user_repo::DieselUserRepository;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use wc_core::ports::RepositoryError;

/// Uniqueness violations become [`RepositoryError::Conflict`], everything
/// else is opaque storage failure.
pub(crate) fn map_storage_err(err: anyhow::Error) -> RepositoryError {
    match err.downcast_ref::<DieselError>() {
        Some(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            RepositoryError::Conflict
        }
        _ => RepositoryError::Storage(format!("{err:#}")),
    }
}
