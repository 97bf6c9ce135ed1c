//! Share domain entities.

pub mod model;

pub use model::{FileShare, FolderShare, SharedItems};
