//! `[database]` section.

use serde::{Deserialize, Serialize};

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseBackend {
    /// PostgreSQL through sqlx.
    #[default]
    Postgres,
    /// Process-local tables, lost on restart.
    Memory,
}

/// Backend choice and Postgres pool sizing. The pool fields are ignored by
/// the memory backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Which store implementation to run on.
    pub backend: DatabaseBackend,
    /// Postgres connection URL.
    pub url: String,
    /// Pool ceiling.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// Also bounds how long a request waits for a free connection.
    pub connect_timeout_seconds: u64,
    /// Idle connections are closed after this long.
    pub idle_timeout_seconds: u64,
    /// Apply pending migrations at startup.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::Postgres,
            url: "postgres://postgres@localhost:5432/drivetree".to_string(),
            max_connections: 20,
            min_connections: 1,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 300,
            run_migrations: true,
        }
    }
}
