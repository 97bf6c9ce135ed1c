//! # drivetree-database
//!
//! PostgreSQL connection management, the store traits the service layer is
//! written against, and the two backends implementing them: the Postgres
//! repositories and the in-process [`MemoryDatabase`].

pub mod backend;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use backend::Stores;
pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use store::{FileStore, FolderStore, MOVE_INTO_DESCENDANT, ShareStore};
