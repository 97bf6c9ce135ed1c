//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use drivetree_core::error::{AppError, ErrorKind};
use drivetree_core::result::AppResult;
use drivetree_entity::folder::{Folder, NewFolder, SubtreeDeletion};

use super::{not_found, write_error};
use crate::store::{FolderStore, MAX_TREE_DEPTH, MOVE_INTO_DESCENDANT};

const FOLDER_COLUMNS: &str =
    "id, name, user_id, parent_id, created_date, status, created_at, updated_at";

/// Repository for folder rows and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folder WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_live_by_name(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folder \
             WHERE user_id = $1 AND parent_id IS NOT DISTINCT FROM $2 AND name = $3 AND status",
        )
        .bind(user_id)
        .bind(parent_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find folder by name", e)
        })
    }

    async fn list_live_children(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folder \
             WHERE user_id = $1 AND parent_id IS NOT DISTINCT FROM $2 AND status \
             ORDER BY name ASC, id ASC",
        )
        .bind(user_id)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn find_ancestors(&self, id: Uuid) -> AppResult<Vec<Folder>> {
        let sql = format!(
            "WITH RECURSIVE ancestors AS ( \
                SELECT {FOLDER_COLUMNS}, 0 AS lvl FROM folder WHERE id = $1 \
                UNION ALL \
                SELECT f.id, f.name, f.user_id, f.parent_id, f.created_date, f.status, \
                       f.created_at, f.updated_at, a.lvl + 1 \
                FROM folder f INNER JOIN ancestors a ON f.id = a.parent_id \
                WHERE a.lvl < $2 \
             ) SELECT {FOLDER_COLUMNS} FROM ancestors ORDER BY lvl DESC"
        );
        sqlx::query_as::<_, Folder>(&sql)
            .bind(id)
            .bind(MAX_TREE_DEPTH as i32)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ancestors", e))
    }

    async fn create(&self, data: &NewFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folder (id, name, user_id, parent_id, created_date, status) \
             VALUES ($1, $2, $3, $4, $5, TRUE) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(data.user_id)
        .bind(data.parent_id)
        .bind(data.created_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Folder"))
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<Folder> {
        let row = sqlx::query_as::<_, Folder>(
            "UPDATE folder SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Folder"))?;
        not_found(row, "Folder")
    }

    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> AppResult<Folder> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let owner = sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM folder WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))?;
        let owner = not_found(owner, "Folder")?;

        // Moves only happen inside one owner's tree, so one lock per owner
        // serializes every move that could race into a cycle.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(owner)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock folder tree", e))?;

        let row = sqlx::query_as::<_, Folder>(
            "WITH RECURSIVE ancestors AS ( \
                SELECT id, parent_id, 0 AS lvl FROM folder WHERE id = $2 \
                UNION ALL \
                SELECT f.id, f.parent_id, a.lvl + 1 \
                FROM folder f INNER JOIN ancestors a ON f.id = a.parent_id \
                WHERE a.lvl < $3 \
             ) \
             UPDATE folder SET parent_id = $2, updated_at = NOW() \
             WHERE id = $1 AND NOT EXISTS (SELECT 1 FROM ancestors WHERE ancestors.id = $1) \
             RETURNING *",
        )
        .bind(id)
        .bind(parent_id)
        .bind(MAX_TREE_DEPTH as i32)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| write_error(e, "Folder"))?;

        let Some(folder) = row else {
            return Err(AppError::validation(MOVE_INTO_DESCENDANT));
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;
        Ok(folder)
    }

    async fn soft_delete_subtree(&self, id: Uuid) -> AppResult<SubtreeDeletion> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // UNION (not UNION ALL) so a cycle in corrupt data terminates.
        let subtree = "WITH RECURSIVE subtree AS ( \
                SELECT id FROM folder WHERE id = $1 \
                UNION \
                SELECT f.id FROM folder f INNER JOIN subtree s ON f.parent_id = s.id \
             )";

        let files = sqlx::query(&format!(
            "{subtree} UPDATE file SET status = FALSE \
             WHERE status AND folder_id IN (SELECT id FROM subtree)"
        ))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete files", e))?
        .rows_affected();

        let folders = sqlx::query(&format!(
            "{subtree} UPDATE folder SET status = FALSE, updated_at = NOW() \
             WHERE status AND id IN (SELECT id FROM subtree)"
        ))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folders", e))?
        .rows_affected();

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(SubtreeDeletion { folders, files })
    }
}
