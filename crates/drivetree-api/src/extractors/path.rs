//! Typed path parameter helpers.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use drivetree_core::error::AppError;
use drivetree_core::result::AppResult;

use crate::error::ApiError;

/// All path parameters of the matched route, by name.
#[derive(Debug, Clone)]
pub struct PathParams(pub HashMap<String, String>);

impl PathParams {
    /// Parse the named parameter as a UUID.
    pub fn uuid(&self, key: &str) -> AppResult<Uuid> {
        let raw = self
            .0
            .get(key)
            .ok_or_else(|| AppError::validation(format!("Missing {key}")))?;
        parse_uuid(raw, key)
    }
}

/// Parses a UUID from a path segment, naming the parameter on failure.
pub fn parse_uuid(s: &str, key: &str) -> AppResult<Uuid> {
    Uuid::parse_str(s).map_err(|_| AppError::validation(format!("Invalid {key}")))
}

impl<S> FromRequestParts<S> for PathParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError(AppError::validation(format!("Invalid path: {e}"))))?;
        Ok(Self(params))
    }
}
