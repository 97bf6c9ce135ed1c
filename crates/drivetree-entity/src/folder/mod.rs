//! Folder domain entities.

pub mod contents;
pub mod model;

pub use contents::{Breadcrumb, FolderContents, SubtreeDeletion};
pub use model::{Folder, NewFolder};
