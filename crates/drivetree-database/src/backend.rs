//! Backend selection.

use std::sync::Arc;

use tracing::info;

use drivetree_core::config::{DatabaseBackend, DatabaseConfig};
use drivetree_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryDatabase;
use crate::migration::run_migrations;
use crate::repositories::{FileRepository, FolderRepository, ShareRepository};
use crate::store::{FileStore, FolderStore, ShareStore};

/// The set of stores the services run against, for one backend.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Folder rows and tree queries.
    pub folders: Arc<dyn FolderStore>,
    /// File rows.
    pub files: Arc<dyn FileStore>,
    /// Share rows.
    pub shares: Arc<dyn ShareStore>,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Open the backend named in the configuration. For Postgres this
    /// connects the pool and, unless disabled, runs pending migrations.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            DatabaseBackend::Memory => {
                info!("Using in-memory database backend");
                Ok(Self::memory(MemoryDatabase::new()))
            }
        }
    }

    /// Stores backed by the Postgres repositories.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            folders: Arc::new(FolderRepository::new(pg.clone())),
            files: Arc::new(FileRepository::new(pg.clone())),
            shares: Arc::new(ShareRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Stores backed by a single in-memory database.
    pub fn memory(db: MemoryDatabase) -> Self {
        Self {
            folders: Arc::new(db.clone()),
            files: Arc::new(db.clone()),
            shares: Arc::new(db),
            pool: None,
        }
    }

    /// Name of the active backend, for logs and the health endpoint.
    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Check backend connectivity. The memory backend is always healthy.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
