//! Folder operations: create, browse, rename, move and soft delete.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use drivetree_core::error::{AppError, ErrorKind};
use drivetree_core::result::AppResult;
use drivetree_database::{FileStore, FolderStore};
use drivetree_entity::folder::{
    Breadcrumb, Folder, FolderContents, NewFolder, SubtreeDeletion,
};

use super::tree::is_descendant_or_self;
use crate::access::AccessResolver;
use crate::context::RequestContext;
use crate::naming::normalize_name;

pub use drivetree_database::MOVE_INTO_DESCENDANT;

/// Request to create a new folder.
#[derive(Debug, Clone)]
pub struct CreateFolderRequest {
    /// Client-chosen folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for top-level).
    pub parent_id: Option<Uuid>,
    /// Creation date reported by the client.
    pub created_date: DateTime<Utc>,
}

/// Manages folder operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    access: Arc<AccessResolver>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        access: Arc<AccessResolver>,
    ) -> Self {
        Self {
            folders,
            files,
            access,
        }
    }

    /// Creates a new folder for the acting user.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        let name = normalize_name(&req.name)?;

        if let Some(parent_id) = req.parent_id {
            self.owned_target(ctx, parent_id).await?;
        }
        self.ensure_name_free(ctx.user_id, req.parent_id, &name, None)
            .await?;

        let folder = self
            .folders
            .create(&NewFolder {
                id: req.id,
                name,
                user_id: ctx.user_id,
                parent_id: req.parent_id,
                created_date: req.created_date,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder created"
        );

        Ok(folder)
    }

    /// Returns a folder with its live children and breadcrumbs.
    pub async fn get_contents(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<FolderContents> {
        let folder = self.live_folder(folder_id).await?;
        self.access.require_folder_view(ctx.user_id, &folder).await?;

        let folders = self
            .folders
            .list_live_children(folder.user_id, Some(folder.id))
            .await?;
        let files = self
            .files
            .list_live_in(folder.user_id, Some(folder.id))
            .await?;
        let chain = self.folders.find_ancestors(folder.id).await?;
        let breadcrumbs = self
            .access
            .visible_ancestors(ctx.user_id, chain)
            .await?
            .iter()
            .map(Breadcrumb::from)
            .collect();

        Ok(FolderContents {
            folder: Some(folder),
            folders,
            files,
            breadcrumbs,
        })
    }

    /// Returns the acting user's top-level folders and files.
    pub async fn list_root(&self, ctx: &RequestContext) -> AppResult<FolderContents> {
        let folders = self.folders.list_live_children(ctx.user_id, None).await?;
        let files = self.files.list_live_in(ctx.user_id, None).await?;

        Ok(FolderContents {
            folder: None,
            folders,
            files,
            breadcrumbs: Vec::new(),
        })
    }

    /// Renames a folder.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> AppResult<Folder> {
        let name = normalize_name(new_name)?;
        let folder = self.owned_folder(ctx, folder_id).await?;

        if folder.name == name {
            return Ok(folder);
        }
        self.ensure_name_free(folder.user_id, folder.parent_id, &name, Some(folder.id))
            .await?;

        let folder = self.folders.rename(folder_id, &name).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            new_name = %folder.name,
            "Folder renamed"
        );

        Ok(folder)
    }

    /// Moves a folder under a new parent, or to the top level with `None`.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        let folder = self.owned_folder(ctx, folder_id).await?;

        if folder.parent_id == new_parent_id {
            return Ok(folder);
        }

        if let Some(target_id) = new_parent_id {
            if target_id == folder_id {
                warn!(user_id = %ctx.user_id, folder_id = %folder_id, "Rejected move into itself");
                return Err(AppError::validation(MOVE_INTO_DESCENDANT));
            }

            self.owned_target(ctx, target_id).await?;

            if is_descendant_or_self(self.folders.as_ref(), target_id, folder_id).await? {
                warn!(
                    user_id = %ctx.user_id,
                    folder_id = %folder_id,
                    target_id = %target_id,
                    "Rejected move into a descendant"
                );
                return Err(AppError::validation(MOVE_INTO_DESCENDANT));
            }
        }

        self.ensure_name_free(folder.user_id, new_parent_id, &folder.name, Some(folder.id))
            .await?;

        // The store repeats the ancestry check under its own lock, which is
        // what holds when two moves race.
        let folder = match self.folders.set_parent(folder_id, new_parent_id).await {
            Ok(folder) => folder,
            Err(e) if e.kind == ErrorKind::Validation => {
                warn!(
                    user_id = %ctx.user_id,
                    folder_id = %folder_id,
                    target_id = ?new_parent_id,
                    "Store refused move into a descendant"
                );
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            new_parent = ?new_parent_id,
            "Folder moved"
        );

        Ok(folder)
    }

    /// Soft deletes a folder together with everything below it.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<SubtreeDeletion> {
        self.owned_folder(ctx, folder_id).await?;

        let deleted = self.folders.soft_delete_subtree(folder_id).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            folders = deleted.folders,
            files = deleted.files,
            "Folder deleted"
        );

        Ok(deleted)
    }

    /// Loads a live folder or fails with `NotFound`.
    pub(crate) async fn live_folder(&self, folder_id: Uuid) -> AppResult<Folder> {
        self.folders
            .find_by_id(folder_id)
            .await?
            .filter(Folder::is_live)
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Loads a live folder the acting user owns.
    async fn owned_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        let folder = self.live_folder(folder_id).await?;
        if !ctx.owns(folder.user_id) {
            return Err(AppError::forbidden("Only the owner can modify this folder"));
        }
        Ok(folder)
    }

    /// Loads a destination folder: live and owned by the acting user.
    async fn owned_target(&self, ctx: &RequestContext, target_id: Uuid) -> AppResult<Folder> {
        let target = self
            .folders
            .find_by_id(target_id)
            .await?
            .filter(Folder::is_live)
            .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
        if !ctx.owns(target.user_id) {
            return Err(AppError::forbidden(
                "Cannot place a folder inside another user's folder",
            ));
        }
        Ok(target)
    }

    async fn ensure_name_free(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
        except: Option<Uuid>,
    ) -> AppResult<()> {
        let existing = self
            .folders
            .find_live_by_name(user_id, parent_id, name)
            .await?;
        match existing {
            Some(other) if Some(other.id) != except => {
                warn!(user_id = %user_id, name = %name, "Folder name conflict");
                Err(AppError::conflict(format!(
                    "A folder named '{name}' already exists in this location"
                )))
            }
            _ => Ok(()),
        }
    }
}
