//! JSON object body extractor.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

use drivetree_core::error::AppError;

use crate::error::ApiError;

/// A request body that must be a JSON object.
///
/// Rejections (wrong content type, malformed JSON, a non-object value)
/// become a 400 in the standard envelope rather than axum's plain-text
/// rejection.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| ApiError(AppError::validation(format!("Invalid JSON body: {e}"))))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ApiError(AppError::validation(
                "Invalid JSON body: expected an object",
            ))),
        }
    }
}
