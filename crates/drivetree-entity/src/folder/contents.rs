//! Read views assembled from folder and file rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::file::File;

use super::model::Folder;

/// One step of the path from the top of a tree down to a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
}

impl From<&Folder> for Breadcrumb {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
        }
    }
}

/// The live contents of one directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContents {
    /// The folder itself (`None` when listing the top level).
    pub folder: Option<Folder>,
    /// Live child folders, ordered by name.
    pub folders: Vec<Folder>,
    /// Live files, ordered by name then extension.
    pub files: Vec<File>,
    /// Path from the top-level ancestor down to the folder, inclusive.
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Row counts touched by a subtree soft delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtreeDeletion {
    /// Folders marked deleted, including the subtree root.
    pub folders: u64,
    /// Files marked deleted.
    pub files: u64,
}
