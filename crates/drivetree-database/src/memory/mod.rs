//! In-process backend implementing every store trait.

pub mod store;

pub use store::MemoryDatabase;
