//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a user's tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier, chosen by the client.
    pub id: Uuid,
    /// Folder name, unique among live siblings.
    pub name: String,
    /// The folder owner.
    pub user_id: Uuid,
    /// Parent folder ID (null for top-level folders).
    pub parent_id: Option<Uuid>,
    /// Creation date reported by the client.
    pub created_date: DateTime<Utc>,
    /// `false` once the folder has been soft-deleted.
    pub status: bool,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// When the row was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if the folder has not been soft-deleted.
    pub fn is_live(&self) -> bool {
        self.status
    }

    /// Check if the given user owns this folder.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Data required to insert a new folder. New folders are always live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFolder {
    /// Client-chosen identifier.
    pub id: Uuid,
    /// Folder name (already trimmed).
    pub name: String,
    /// The folder owner.
    pub user_id: Uuid,
    /// Parent folder (None for top level).
    pub parent_id: Option<Uuid>,
    /// Creation date reported by the client.
    pub created_date: DateTime<Utc>,
}
