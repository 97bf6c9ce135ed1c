//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod database;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::logging::{LogFormat, LoggingConfig};

use crate::error::AppError;

/// Prefix for environment variable overrides (`DRIVETREE__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "DRIVETREE";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `{config_dir}/default.toml` with an environment-specific
    /// overlay `{config_dir}/{env}.toml` and environment variables
    /// prefixed with `DRIVETREE__`. Missing files are skipped.
    pub fn load(config_dir: impl AsRef<Path>, env: &str) -> Result<Self, AppError> {
        let dir = config_dir.as_ref();
        let default_path = dir.join("default");
        let env_path = dir.join(env);

        let config = config::Config::builder()
            .add_source(config::File::from(default_path).required(false))
            .add_source(config::File::from(env_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Configuration for an in-process instance backed by the memory store.
    pub fn in_memory() -> Self {
        Self {
            database: DatabaseConfig {
                backend: DatabaseBackend::Memory,
                ..DatabaseConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_files() {
        let config = AppConfig::load("/nonexistent/drivetree-config", "test").expect("load");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.backend, DatabaseBackend::Postgres);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_in_memory_profile() {
        let config = AppConfig::in_memory();
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert!(config.database.run_migrations);
    }

    #[test]
    fn test_partial_toml_section() {
        let parsed: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 9000\n\n[database]\nbackend = \"memory\"\n\n[logging]\nformat = \"json\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("parse");
        assert_eq!(parsed.server.port, 9000);
        assert_eq!(parsed.server.request_timeout_seconds, 30);
        assert_eq!(parsed.database.backend, DatabaseBackend::Memory);
        assert_eq!(parsed.database.max_connections, 20);
        assert_eq!(parsed.logging.format, LogFormat::Json);
        assert_eq!(parsed.logging.level, "info");
    }
}
