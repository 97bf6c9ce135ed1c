//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata of a file stored in DriveTree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier, chosen by the client.
    pub id: Uuid,
    /// The file name without its extension.
    pub name: String,
    /// The file owner.
    pub user_id: Uuid,
    /// The extension, without the leading dot.
    pub extension: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// The containing folder (null for top-level files).
    pub folder_id: Option<Uuid>,
    /// Address of the client that registered the file.
    pub ip_location: String,
    /// Creation date reported by the client.
    pub created_date: DateTime<Utc>,
    /// `false` once the file has been soft-deleted.
    pub status: bool,
}

impl File {
    /// Check if the file has not been soft-deleted.
    pub fn is_live(&self) -> bool {
        self.status
    }

    /// Check if the given user owns this file.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Display name: `name.extension`, or just `name` without an extension.
    pub fn full_name(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }
}

/// Data required to insert a new file. New files are always live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFile {
    /// Client-chosen identifier.
    pub id: Uuid,
    /// File name (already trimmed).
    pub name: String,
    /// The file owner.
    pub user_id: Uuid,
    /// Extension without the leading dot.
    pub extension: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Target folder (None for top level).
    pub folder_id: Option<Uuid>,
    /// Client address.
    pub ip_location: String,
    /// Creation date reported by the client.
    pub created_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(extension: &str) -> File {
        File {
            id: Uuid::new_v4(),
            name: "report".to_string(),
            user_id: Uuid::new_v4(),
            extension: extension.to_string(),
            mime_type: "application/pdf".to_string(),
            size: 10,
            folder_id: None,
            ip_location: "127.0.0.1".to_string(),
            created_date: Utc::now(),
            status: true,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample("pdf").full_name(), "report.pdf");
        assert_eq!(sample("").full_name(), "report");
    }
}
