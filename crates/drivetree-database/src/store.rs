//! Store traits the service layer is written against.
//!
//! Each trait has two implementations: the Postgres repositories in
//! [`crate::repositories`] and the in-process [`crate::MemoryDatabase`].
//! Lookups by name only consider live rows (`status = true`); lookups by id
//! return the row regardless of status and leave the liveness check to the
//! caller.

use async_trait::async_trait;
use uuid::Uuid;

use drivetree_core::result::AppResult;
use drivetree_entity::file::{File, NewFile};
use drivetree_entity::folder::{Folder, NewFolder, SubtreeDeletion};
use drivetree_entity::share::{FileShare, FolderShare};

/// Upper bound on the depth of an ancestry walk. Guards against cycles in
/// corrupt data.
pub const MAX_TREE_DEPTH: usize = 1024;

/// Message for a move that would put a folder inside its own subtree.
pub const MOVE_INTO_DESCENDANT: &str =
    "Cannot move a folder into itself or one of its descendants";

/// Folder rows and tree queries.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by id, live or not.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// Find a live folder of `user_id` under `parent_id` with exactly `name`.
    async fn find_live_by_name(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<Folder>>;

    /// List the live folders of `user_id` directly under `parent_id`, ordered by name.
    async fn list_live_children(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Folder>>;

    /// The chain of folders from the root down to and including `id`.
    ///
    /// Empty when `id` does not exist. The walk stops at a missing parent.
    async fn find_ancestors(&self, id: Uuid) -> AppResult<Vec<Folder>>;

    /// Insert a new live folder. A duplicate id or live sibling name is a conflict.
    async fn create(&self, data: &NewFolder) -> AppResult<Folder>;

    /// Change the name of a folder.
    async fn rename(&self, id: Uuid, name: &str) -> AppResult<Folder>;

    /// Re-parent a folder. `None` moves it to the top level.
    ///
    /// The ancestry of `parent_id` is checked in the same atomic step as the
    /// write: if `id` is `parent_id` or one of its ancestors the move fails
    /// with a validation error carrying [`MOVE_INTO_DESCENDANT`].
    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> AppResult<Folder>;

    /// Soft delete a folder, all of its descendant folders, and every live
    /// file inside any of them, atomically.
    async fn soft_delete_subtree(&self, id: Uuid) -> AppResult<SubtreeDeletion>;
}

/// File rows.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a file by id, live or not.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>>;

    /// Find a live file of `user_id` in `folder_id` with exactly `name` and `extension`.
    async fn find_live_by_name(
        &self,
        user_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
        extension: &str,
    ) -> AppResult<Option<File>>;

    /// List the live files of `user_id` directly in `folder_id`, ordered by name.
    async fn list_live_in(&self, user_id: Uuid, folder_id: Option<Uuid>) -> AppResult<Vec<File>>;

    /// Insert a new live file. A duplicate id or live sibling name is a conflict.
    async fn create(&self, data: &NewFile) -> AppResult<File>;

    /// Change the name of a file.
    async fn rename(&self, id: Uuid, name: &str) -> AppResult<File>;

    /// Move a file to another folder. `None` moves it to the top level.
    async fn set_folder(&self, id: Uuid, folder_id: Option<Uuid>) -> AppResult<File>;

    /// Soft delete a live file. Returns `false` when nothing changed.
    async fn soft_delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Share rows and the queries visibility checks need.
#[async_trait]
pub trait ShareStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create an active folder share, or reactivate an existing one.
    async fn share_folder(&self, folder_id: Uuid, user_id: Uuid) -> AppResult<FolderShare>;

    /// Deactivate a folder share. Returns `false` when no active share existed.
    async fn revoke_folder_share(&self, folder_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Create an active file share, or reactivate an existing one.
    async fn share_file(&self, file_id: Uuid, user_id: Uuid) -> AppResult<FileShare>;

    /// Deactivate a file share. Returns `false` when no active share existed.
    async fn revoke_file_share(&self, file_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Ids among `folder_ids` that have an active share with `user_id`.
    async fn folders_shared_with(&self, user_id: Uuid, folder_ids: &[Uuid])
    -> AppResult<Vec<Uuid>>;

    /// Whether `file_id` has an active share with `user_id`.
    async fn is_file_shared_with(&self, user_id: Uuid, file_id: Uuid) -> AppResult<bool>;

    /// Live folders with an active share to `user_id`, ordered by name.
    async fn list_shared_folders(&self, user_id: Uuid) -> AppResult<Vec<Folder>>;

    /// Live files with an active share to `user_id`, ordered by name.
    async fn list_shared_files(&self, user_id: Uuid) -> AppResult<Vec<File>>;
}
