//! File metadata management.

pub mod service;

pub use service::{CreateFileRequest, FileService};
