//! CORS from `server.cors`.

use std::str::FromStr;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

use drivetree_core::config::CorsConfig;

/// Builds the CORS layer. A `*` entry allows any origin or header; an empty
/// origin list disables cross-origin access. Entries that do not parse are
/// logged and skipped.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if is_wildcard(&config.allowed_origins) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>(&config.allowed_origins, "origin"))
    };

    let headers = if is_wildcard(&config.allowed_headers) {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(parse_all::<HeaderName>(&config.allowed_headers, "header"))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(parse_all::<Method>(&config.allowed_methods, "method"))
        .allow_headers(headers)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

fn is_wildcard(entries: &[String]) -> bool {
    entries.iter().any(|e| e.trim() == "*")
}

fn parse_all<T: FromStr>(entries: &[String], what: &str) -> Vec<T> {
    entries
        .iter()
        .filter_map(|entry| match entry.trim().parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(entry = %entry, "Ignoring unparsable CORS {}", what);
                None
            }
        })
        .collect()
}
