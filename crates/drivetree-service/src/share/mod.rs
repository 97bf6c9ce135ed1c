//! Sharing folders and files with other users.

pub mod service;

pub use service::ShareService;
