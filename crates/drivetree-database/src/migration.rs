//! Schema migrations embedded from `migrations/` at the workspace root.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{debug, info};

use drivetree_core::error::{AppError, ErrorKind};
use drivetree_core::result::AppResult;

/// Compiled-in migration set.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every migration the database has not recorded yet.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    for migration in MIGRATOR.iter() {
        debug!(
            version = migration.version,
            description = %migration.description,
            "Known migration"
        );
    }

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Schema migration failed: {e}"),
            e,
        )
    })?;

    info!(known = MIGRATOR.iter().count(), "Schema is up to date");
    Ok(())
}
