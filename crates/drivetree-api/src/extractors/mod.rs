//! Custom Axum extractors.

pub mod body;
pub mod path;
pub mod user;

pub use body::JsonBody;
pub use path::PathParams;
pub use user::{ActingUser, client_ip};
