//! Read-access resolution for folders and files.
//!
//! Resolution order:
//! 1. Owner check: owners see everything they own.
//! 2. Direct share: an active share row for the item and the user.
//! 3. Inherited share: an active share row on any folder above the item.
//!
//! Shares only ever grant read access; every mutation is owner-only and is
//! checked by the services themselves.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use drivetree_core::error::AppError;
use drivetree_core::result::AppResult;
use drivetree_database::{FolderStore, ShareStore};
use drivetree_entity::file::File;
use drivetree_entity::folder::Folder;

use crate::folder::tree::ancestor_ids;

/// Where a read grant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSource {
    /// The user owns the item.
    Owner,
    /// The item itself is shared with the user.
    DirectShare,
    /// A folder above the item is shared with the user.
    InheritedShare,
    /// No grant applies.
    Denied,
}

impl AccessSource {
    /// Whether the source grants read access.
    pub fn is_granted(self) -> bool {
        !matches!(self, Self::Denied)
    }
}

/// Resolves who may see which folder or file.
#[derive(Debug, Clone)]
pub struct AccessResolver {
    folders: Arc<dyn FolderStore>,
    shares: Arc<dyn ShareStore>,
}

impl AccessResolver {
    /// Creates a new access resolver.
    pub fn new(folders: Arc<dyn FolderStore>, shares: Arc<dyn ShareStore>) -> Self {
        Self { folders, shares }
    }

    /// Resolve read access to a folder.
    pub async fn folder_access(&self, user_id: Uuid, folder: &Folder) -> AppResult<AccessSource> {
        if folder.is_owned_by(user_id) {
            return Ok(AccessSource::Owner);
        }

        let chain = ancestor_ids(self.folders.as_ref(), folder.id).await?;
        let shared = self.shares.folders_shared_with(user_id, &chain).await?;

        let source = if shared.contains(&folder.id) {
            AccessSource::DirectShare
        } else if !shared.is_empty() {
            AccessSource::InheritedShare
        } else {
            AccessSource::Denied
        };

        debug!(user_id = %user_id, folder_id = %folder.id, source = ?source, "Resolved folder access");
        Ok(source)
    }

    /// Resolve read access to a file.
    pub async fn file_access(&self, user_id: Uuid, file: &File) -> AppResult<AccessSource> {
        if file.is_owned_by(user_id) {
            return Ok(AccessSource::Owner);
        }
        if self.shares.is_file_shared_with(user_id, file.id).await? {
            return Ok(AccessSource::DirectShare);
        }

        let source = match file.folder_id {
            Some(folder_id) => {
                let chain = ancestor_ids(self.folders.as_ref(), folder_id).await?;
                if self.shares.folders_shared_with(user_id, &chain).await?.is_empty() {
                    AccessSource::Denied
                } else {
                    AccessSource::InheritedShare
                }
            }
            None => AccessSource::Denied,
        };

        debug!(user_id = %user_id, file_id = %file.id, source = ?source, "Resolved file access");
        Ok(source)
    }

    /// Trim a root-first ancestry chain to the part the user may see.
    ///
    /// Owners get the whole chain. Anyone else gets it from the highest
    /// folder shared with them, or nothing when no folder in it is shared.
    pub async fn visible_ancestors(
        &self,
        user_id: Uuid,
        chain: Vec<Folder>,
    ) -> AppResult<Vec<Folder>> {
        match chain.last() {
            Some(folder) if !folder.is_owned_by(user_id) => {}
            _ => return Ok(chain),
        }

        let ids: Vec<Uuid> = chain.iter().map(|f| f.id).collect();
        let shared = self.shares.folders_shared_with(user_id, &ids).await?;
        let start = chain
            .iter()
            .position(|f| shared.contains(&f.id))
            .unwrap_or(chain.len());

        Ok(chain.into_iter().skip(start).collect())
    }

    /// Fail with `Forbidden` unless the user may read the folder.
    pub async fn require_folder_view(&self, user_id: Uuid, folder: &Folder) -> AppResult<()> {
        if self.folder_access(user_id, folder).await?.is_granted() {
            Ok(())
        } else {
            Err(AppError::forbidden("You do not have access to this folder"))
        }
    }

    /// Fail with `Forbidden` unless the user may read the file.
    pub async fn require_file_view(&self, user_id: Uuid, file: &File) -> AppResult<()> {
        if self.file_access(user_id, file).await?.is_granted() {
            Ok(())
        } else {
            Err(AppError::forbidden("You do not have access to this file"))
        }
    }
}
