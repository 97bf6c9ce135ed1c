//! # drivetree-service
//!
//! Business logic service layer for DriveTree. Each service is written
//! against the store traits from `drivetree-database` and enforces
//! ownership, visibility, tree shape and name uniqueness.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod access;
pub mod context;
pub mod file;
pub mod folder;
pub mod naming;
pub mod share;

pub use access::{AccessResolver, AccessSource};
pub use context::RequestContext;
pub use file::{CreateFileRequest, FileService};
pub use folder::{CreateFolderRequest, FolderService};
pub use share::ShareService;
