//! # drivetree-api
//!
//! HTTP API layer for DriveTree built on Axum.
//!
//! Provides the REST endpoints under `/user/{userId}`, the JSON envelope,
//! extractors, DTO validation, error mapping, and the CORS and logging
//! middleware.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
