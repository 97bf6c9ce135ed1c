//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use drivetree_core::config::AppConfig;
use drivetree_database::Stores;
use drivetree_service::{AccessResolver, FileService, FolderService, ShareService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Storage backend (Postgres or in-memory)
    pub stores: Stores,
    /// Folder service
    pub folder_service: Arc<FolderService>,
    /// File service
    pub file_service: Arc<FileService>,
    /// Share service
    pub share_service: Arc<ShareService>,
    /// When the state was built
    pub started_at: Instant,
}

impl AppState {
    /// Wire the services on top of a backend.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let access = Arc::new(AccessResolver::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.shares),
        ));

        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&stores.folders),
            Arc::clone(&stores.files),
            Arc::clone(&access),
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&stores.files),
            Arc::clone(&stores.folders),
            Arc::clone(&access),
        ));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&stores.shares),
            Arc::clone(&stores.folders),
            Arc::clone(&stores.files),
        ));

        Self {
            config: Arc::new(config),
            stores,
            folder_service,
            file_service,
            share_service,
            started_at: Instant::now(),
        }
    }
}
