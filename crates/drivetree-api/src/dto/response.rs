//! Response DTOs.
//!
//! Every body is wrapped in [`ApiResponse`]. Entity views use camelCase keys
//! to match the request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use drivetree_entity::file::File;
use drivetree_entity::folder::{Breadcrumb, Folder, FolderContents, SubtreeDeletion};
use drivetree_entity::share::{FileShare, FolderShare, SharedItems};

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Error messages; empty on success.
    pub errors: Vec<String>,
    /// Whether the request was successful.
    pub success: bool,
    /// Response data; `null` on failure.
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            errors: Vec::new(),
            success: true,
            data: Some(data),
        }
    }

    /// Creates a failed response.
    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            errors,
            success: false,
            data: None,
        }
    }
}

/// Folder view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderResponse {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Owner.
    pub user_id: Uuid,
    /// Parent folder; `null` at the top level.
    pub parent_id: Option<Uuid>,
    /// Creation date reported by the client.
    pub created_date: DateTime<Utc>,
    /// `false` once soft deleted.
    pub status: bool,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// When the row last changed.
    pub updated_at: DateTime<Utc>,
}

impl From<Folder> for FolderResponse {
    fn from(f: Folder) -> Self {
        Self {
            id: f.id,
            name: f.name,
            user_id: f.user_id,
            parent_id: f.parent_id,
            created_date: f.created_date,
            status: f.status,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

/// File view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// File ID.
    pub id: Uuid,
    /// File name without extension.
    pub name: String,
    /// Owner.
    pub user_id: Uuid,
    /// Extension without the leading dot; may be empty.
    pub extension: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Containing folder; `null` at the top level.
    pub folder_id: Option<Uuid>,
    /// Client address recorded at creation.
    pub ip_location: String,
    /// Creation date reported by the client.
    pub created_date: DateTime<Utc>,
    /// `false` once soft deleted.
    pub status: bool,
}

impl From<File> for FileResponse {
    fn from(f: File) -> Self {
        Self {
            id: f.id,
            name: f.name,
            user_id: f.user_id,
            extension: f.extension,
            mime_type: f.mime_type,
            size: f.size,
            folder_id: f.folder_id,
            ip_location: f.ip_location,
            created_date: f.created_date,
            status: f.status,
        }
    }
}

/// A folder with its live children and the path leading to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContentsResponse {
    /// The folder itself; `null` when listing the top level.
    pub folder: Option<FolderResponse>,
    /// Live child folders.
    pub folders: Vec<FolderResponse>,
    /// Live files directly inside.
    pub files: Vec<FileResponse>,
    /// Visible path down to the folder, root first.
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl From<FolderContents> for FolderContentsResponse {
    fn from(c: FolderContents) -> Self {
        Self {
            folder: c.folder.map(Into::into),
            folders: c.folders.into_iter().map(Into::into).collect(),
            files: c.files.into_iter().map(Into::into).collect(),
            breadcrumbs: c.breadcrumbs,
        }
    }
}

/// How many rows a folder delete touched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// Folders soft deleted.
    pub folders: u64,
    /// Files soft deleted.
    pub files: u64,
}

impl From<SubtreeDeletion> for DeletedResponse {
    fn from(d: SubtreeDeletion) -> Self {
        Self {
            folders: d.folders,
            files: d.files,
        }
    }
}

/// Share row view. Exactly one of `folder_id` / `file_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    /// Share row ID.
    pub id: i64,
    /// Shared folder, for folder shares.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Uuid>,
    /// Shared file, for file shares.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<Uuid>,
    /// Recipient.
    pub user_id: Uuid,
    /// `false` once revoked.
    pub status: bool,
}

impl From<FolderShare> for ShareResponse {
    fn from(s: FolderShare) -> Self {
        Self {
            id: s.id,
            folder_id: Some(s.folder_id),
            file_id: None,
            user_id: s.user_id,
            status: s.status,
        }
    }
}

impl From<FileShare> for ShareResponse {
    fn from(s: FileShare) -> Self {
        Self {
            id: s.id,
            folder_id: None,
            file_id: Some(s.file_id),
            user_id: s.user_id,
            status: s.status,
        }
    }
}

/// Items shared with the acting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedItemsResponse {
    /// Live folders shared directly.
    pub folders: Vec<FolderResponse>,
    /// Live files shared directly.
    pub files: Vec<FileResponse>,
}

impl From<SharedItems> for SharedItemsResponse {
    fn from(s: SharedItems) -> Self {
        Self {
            folders: s.folders.into_iter().map(Into::into).collect(),
            files: s.files.into_iter().map(Into::into).collect(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Active storage backend.
    pub backend: String,
    /// Whether the backend answered.
    pub database: bool,
    /// Seconds since the state was built.
    pub uptime_seconds: u64,
}
