//! Folder management and tree checks.

pub mod service;
pub mod tree;

pub use service::{CreateFolderRequest, FolderService};
