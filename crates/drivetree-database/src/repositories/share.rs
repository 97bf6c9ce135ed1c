//! Share repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use drivetree_core::error::{AppError, ErrorKind};
use drivetree_core::result::AppResult;
use drivetree_entity::file::File;
use drivetree_entity::folder::Folder;
use drivetree_entity::share::{FileShare, FolderShare};

use crate::store::ShareStore;

/// Repository for the `folder_shared` and `file_shared` join tables.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareStore for ShareRepository {
    async fn share_folder(&self, folder_id: Uuid, user_id: Uuid) -> AppResult<FolderShare> {
        sqlx::query_as::<_, FolderShare>(
            "INSERT INTO folder_shared (folder_id, user_id, status) VALUES ($1, $2, TRUE) \
             ON CONFLICT (folder_id, user_id) DO UPDATE SET status = TRUE \
             RETURNING *",
        )
        .bind(folder_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to share folder", e))
    }

    async fn revoke_folder_share(&self, folder_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE folder_shared SET status = FALSE \
             WHERE folder_id = $1 AND user_id = $2 AND status",
        )
        .bind(folder_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke share", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn share_file(&self, file_id: Uuid, user_id: Uuid) -> AppResult<FileShare> {
        sqlx::query_as::<_, FileShare>(
            "INSERT INTO file_shared (file_id, user_id, status) VALUES ($1, $2, TRUE) \
             ON CONFLICT (file_id, user_id) DO UPDATE SET status = TRUE \
             RETURNING *",
        )
        .bind(file_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to share file", e))
    }

    async fn revoke_file_share(&self, file_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE file_shared SET status = FALSE \
             WHERE file_id = $1 AND user_id = $2 AND status",
        )
        .bind(file_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke share", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn folders_shared_with(
        &self,
        user_id: Uuid,
        folder_ids: &[Uuid],
    ) -> AppResult<Vec<Uuid>> {
        if folder_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, Uuid>(
            "SELECT folder_id FROM folder_shared \
             WHERE user_id = $1 AND status AND folder_id = ANY($2)",
        )
        .bind(user_id)
        .bind(folder_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check shares", e))
    }

    async fn is_file_shared_with(&self, user_id: Uuid, file_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM file_shared \
             WHERE user_id = $1 AND file_id = $2 AND status)",
        )
        .bind(user_id)
        .bind(file_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check shares", e))
    }

    async fn list_shared_folders(&self, user_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT f.* FROM folder f \
             INNER JOIN folder_shared s ON s.folder_id = f.id \
             WHERE s.user_id = $1 AND s.status AND f.status \
             ORDER BY f.name ASC, f.id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list shared folders", e)
        })
    }

    async fn list_shared_files(&self, user_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT f.* FROM file f \
             INNER JOIN file_shared s ON s.file_id = f.id \
             WHERE s.user_id = $1 AND s.status AND f.status \
             ORDER BY f.name ASC, f.extension ASC, f.id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shared files", e))
    }
}
