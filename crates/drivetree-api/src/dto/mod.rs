//! Request parsing and response views.

pub mod request;
pub mod response;

pub use response::ApiResponse;
