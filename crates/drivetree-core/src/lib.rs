//! # drivetree-core
//!
//! Core crate for DriveTree. Contains configuration schemas and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other DriveTree crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
