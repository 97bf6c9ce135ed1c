//! Postgres implementations of the store traits.

pub mod file;
pub mod folder;
pub mod share;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use share::ShareRepository;

use drivetree_core::error::{AppError, ErrorKind};

/// Map an error from an insert or update.
///
/// Unique violations (duplicate primary key, or a live sibling with the same
/// name racing past the service check) become `Conflict`; everything else is
/// a database error.
pub(crate) fn write_error(err: sqlx::Error, what: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let message = match db_err.constraint() {
                Some(c) if c.ends_with("_pkey") => format!("{what} id already exists"),
                _ => format!("{what} name already exists in this location"),
            };
            return AppError::with_source(ErrorKind::Conflict, message, err);
        }
    }
    AppError::with_source(ErrorKind::Database, format!("Failed to write {}", what.to_lowercase()), err)
}

/// Map the missing row of an update to `NotFound`.
pub(crate) fn not_found<T>(row: Option<T>, what: &str) -> Result<T, AppError> {
    row.ok_or_else(|| AppError::not_found(format!("{what} not found")))
}
