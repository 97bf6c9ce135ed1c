//! Share management: grant and revoke read access for other users.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drivetree_core::error::AppError;
use drivetree_core::result::AppResult;
use drivetree_database::{FileStore, FolderStore, ShareStore};
use drivetree_entity::file::File;
use drivetree_entity::folder::Folder;
use drivetree_entity::share::{FileShare, FolderShare, SharedItems};

use crate::context::RequestContext;

/// Manages folder and file shares.
#[derive(Debug, Clone)]
pub struct ShareService {
    shares: Arc<dyn ShareStore>,
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        shares: Arc<dyn ShareStore>,
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            shares,
            folders,
            files,
        }
    }

    /// Shares a folder, and everything below it, with another user.
    pub async fn share_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        target_user: Uuid,
    ) -> AppResult<FolderShare> {
        self.owned_folder(ctx, folder_id).await?;
        reject_self_share(ctx, target_user)?;

        let share = self.shares.share_folder(folder_id, target_user).await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            shared_with = %target_user,
            "Folder shared"
        );

        Ok(share)
    }

    /// Revokes a folder share.
    pub async fn unshare_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        target_user: Uuid,
    ) -> AppResult<()> {
        self.owned_folder(ctx, folder_id).await?;

        if !self.shares.revoke_folder_share(folder_id, target_user).await? {
            return Err(AppError::not_found("Share not found"));
        }

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            revoked_from = %target_user,
            "Folder share revoked"
        );

        Ok(())
    }

    /// Shares a single file with another user.
    pub async fn share_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        target_user: Uuid,
    ) -> AppResult<FileShare> {
        self.owned_file(ctx, file_id).await?;
        reject_self_share(ctx, target_user)?;

        let share = self.shares.share_file(file_id, target_user).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            shared_with = %target_user,
            "File shared"
        );

        Ok(share)
    }

    /// Revokes a file share.
    pub async fn unshare_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        target_user: Uuid,
    ) -> AppResult<()> {
        self.owned_file(ctx, file_id).await?;

        if !self.shares.revoke_file_share(file_id, target_user).await? {
            return Err(AppError::not_found("Share not found"));
        }

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            revoked_from = %target_user,
            "File share revoked"
        );

        Ok(())
    }

    /// Lists live items shared directly with the acting user.
    pub async fn list_shared_with_me(&self, ctx: &RequestContext) -> AppResult<SharedItems> {
        let folders = self.shares.list_shared_folders(ctx.user_id).await?;
        let files = self.shares.list_shared_files(ctx.user_id).await?;
        Ok(SharedItems { folders, files })
    }

    async fn owned_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await?
            .filter(Folder::is_live)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        if !ctx.owns(folder.user_id) {
            return Err(AppError::forbidden("Only the owner can share this folder"));
        }
        Ok(folder)
    }

    async fn owned_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .filter(File::is_live)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        if !ctx.owns(file.user_id) {
            return Err(AppError::forbidden("Only the owner can share this file"));
        }
        Ok(file)
    }
}

fn reject_self_share(ctx: &RequestContext, target_user: Uuid) -> AppResult<()> {
    if ctx.owns(target_user) {
        return Err(AppError::validation("Cannot share an item with yourself"));
    }
    Ok(())
}
