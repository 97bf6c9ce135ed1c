//! Share join-table rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::file::File;
use crate::folder::Folder;

/// Grants a user read access to a folder and everything below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FolderShare {
    /// Serial row identifier.
    pub id: i64,
    /// The shared folder.
    pub folder_id: Uuid,
    /// The recipient.
    pub user_id: Uuid,
    /// `false` once the share has been revoked.
    pub status: bool,
}

/// Grants a user read access to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileShare {
    /// Serial row identifier.
    pub id: i64,
    /// The shared file.
    pub file_id: Uuid,
    /// The recipient.
    pub user_id: Uuid,
    /// `false` once the share has been revoked.
    pub status: bool,
}

/// Live items shared directly with a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedItems {
    /// Folders shared with the user.
    pub folders: Vec<Folder>,
    /// Files shared with the user.
    pub files: Vec<File>,
}
