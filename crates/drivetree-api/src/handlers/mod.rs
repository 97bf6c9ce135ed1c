//! Route handlers.

pub mod file;
pub mod folder;
pub mod health;
pub mod share;

use drivetree_core::error::AppError;

use crate::error::ApiError;

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError(AppError::not_found("Route not found"))
}
