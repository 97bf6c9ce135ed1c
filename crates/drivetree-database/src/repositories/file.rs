//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use drivetree_core::error::{AppError, ErrorKind};
use drivetree_core::result::AppResult;
use drivetree_entity::file::{File, NewFile};

use super::{not_found, write_error};
use crate::store::FileStore;

/// Repository for file rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM file WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_live_by_name(
        &self,
        user_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
        extension: &str,
    ) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM file \
             WHERE user_id = $1 AND folder_id IS NOT DISTINCT FROM $2 \
               AND name = $3 AND extension = $4 AND status",
        )
        .bind(user_id)
        .bind(folder_id)
        .bind(name)
        .bind(extension)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file by name", e))
    }

    async fn list_live_in(&self, user_id: Uuid, folder_id: Option<Uuid>) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM file \
             WHERE user_id = $1 AND folder_id IS NOT DISTINCT FROM $2 AND status \
             ORDER BY name ASC, extension ASC, id ASC",
        )
        .bind(user_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn create(&self, data: &NewFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO file \
             (id, name, user_id, extension, mime_type, size, folder_id, ip_location, created_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(data.user_id)
        .bind(&data.extension)
        .bind(&data.mime_type)
        .bind(data.size)
        .bind(data.folder_id)
        .bind(&data.ip_location)
        .bind(data.created_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "File"))
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<File> {
        let row = sqlx::query_as::<_, File>("UPDATE file SET name = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, "File"))?;
        not_found(row, "File")
    }

    async fn set_folder(&self, id: Uuid, folder_id: Option<Uuid>) -> AppResult<File> {
        let row =
            sqlx::query_as::<_, File>("UPDATE file SET folder_id = $2 WHERE id = $1 RETURNING *")
                .bind(id)
                .bind(folder_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| write_error(e, "File"))?;
        not_found(row, "File")
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("UPDATE file SET status = FALSE WHERE id = $1 AND status")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}
