//! File metadata operations: create, read, rename, move and soft delete.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use drivetree_core::error::AppError;
use drivetree_core::result::AppResult;
use drivetree_database::{FileStore, FolderStore};
use drivetree_entity::file::{File, NewFile};
use drivetree_entity::folder::Folder;

use crate::access::AccessResolver;
use crate::context::RequestContext;
use crate::naming::normalize_name;

/// Request to create a new file record.
#[derive(Debug, Clone)]
pub struct CreateFileRequest {
    /// Client-chosen file ID.
    pub id: Uuid,
    /// File name without extension.
    pub name: String,
    /// File extension without the leading dot.
    pub extension: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Containing folder (None for top-level).
    pub folder_id: Option<Uuid>,
    /// Creation date reported by the client.
    pub created_date: DateTime<Utc>,
}

/// Manages file records.
#[derive(Debug, Clone)]
pub struct FileService {
    files: Arc<dyn FileStore>,
    folders: Arc<dyn FolderStore>,
    access: Arc<AccessResolver>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        access: Arc<AccessResolver>,
    ) -> Self {
        Self {
            files,
            folders,
            access,
        }
    }

    /// Creates a file record owned by the acting user.
    ///
    /// The client address from the context is stored as `ip_location`.
    pub async fn create_file(&self, ctx: &RequestContext, req: CreateFileRequest) -> AppResult<File> {
        let name = normalize_name(&req.name)?;
        let extension = req.extension.trim().to_string();
        if req.size < 0 {
            return Err(AppError::validation("Invalid size"));
        }

        if let Some(folder_id) = req.folder_id {
            self.owned_target(ctx, folder_id).await?;
        }
        self.ensure_name_free(ctx.user_id, req.folder_id, &name, &extension, None)
            .await?;

        let file = self
            .files
            .create(&NewFile {
                id: req.id,
                name,
                user_id: ctx.user_id,
                extension,
                mime_type: req.mime_type,
                size: req.size,
                folder_id: req.folder_id,
                ip_location: ctx.ip_address.clone(),
                created_date: req.created_date,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            folder_id = ?file.folder_id,
            size = file.size,
            "File created"
        );

        Ok(file)
    }

    /// Gets a live file the acting user may read.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self.live_file(file_id).await?;
        self.access.require_file_view(ctx.user_id, &file).await?;
        Ok(file)
    }

    /// Renames a file, keeping its extension.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_name: &str,
    ) -> AppResult<File> {
        let name = normalize_name(new_name)?;
        let file = self.owned_file(ctx, file_id).await?;

        if file.name == name {
            return Ok(file);
        }
        self.ensure_name_free(file.user_id, file.folder_id, &name, &file.extension, Some(file.id))
            .await?;

        let file = self.files.rename(file_id, &name).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            new_name = %file.name,
            "File renamed"
        );

        Ok(file)
    }

    /// Moves a file into another folder, or to the top level with `None`.
    pub async fn move_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_folder_id: Option<Uuid>,
    ) -> AppResult<File> {
        let file = self.owned_file(ctx, file_id).await?;

        if file.folder_id == new_folder_id {
            return Ok(file);
        }
        if let Some(folder_id) = new_folder_id {
            self.owned_target(ctx, folder_id).await?;
        }
        self.ensure_name_free(
            file.user_id,
            new_folder_id,
            &file.name,
            &file.extension,
            Some(file.id),
        )
        .await?;

        let file = self.files.set_folder(file_id, new_folder_id).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            new_folder = ?new_folder_id,
            "File moved"
        );

        Ok(file)
    }

    /// Soft deletes a file and returns the row as it now stands.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self.owned_file(ctx, file_id).await?;

        if !self.files.soft_delete(file_id).await? {
            return Err(AppError::not_found("File not found"));
        }

        info!(user_id = %ctx.user_id, file_id = %file_id, "File deleted");
        Ok(File {
            status: false,
            ..file
        })
    }

    /// Loads a live file or fails with `NotFound`.
    pub(crate) async fn live_file(&self, file_id: Uuid) -> AppResult<File> {
        self.files
            .find_by_id(file_id)
            .await?
            .filter(File::is_live)
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    async fn owned_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self.live_file(file_id).await?;
        if !ctx.owns(file.user_id) {
            return Err(AppError::forbidden("Only the owner can modify this file"));
        }
        Ok(file)
    }

    async fn owned_target(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await?
            .filter(Folder::is_live)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        if !ctx.owns(folder.user_id) {
            return Err(AppError::forbidden(
                "Cannot place a file inside another user's folder",
            ));
        }
        Ok(folder)
    }

    async fn ensure_name_free(
        &self,
        user_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
        extension: &str,
        except: Option<Uuid>,
    ) -> AppResult<()> {
        let existing = self
            .files
            .find_live_by_name(user_id, folder_id, name, extension)
            .await?;
        match existing {
            Some(other) if Some(other.id) != except => {
                warn!(user_id = %user_id, name = %name, extension = %extension, "File name conflict");
                Err(AppError::conflict(format!(
                    "A file named '{}' already exists in this location",
                    other.full_name()
                )))
            }
            _ => Ok(()),
        }
    }
}
