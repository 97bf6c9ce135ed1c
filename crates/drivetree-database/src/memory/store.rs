//! In-memory database backed by hash maps behind a `tokio` `RwLock`.
//!
//! Mirrors the Postgres schema closely enough that the service layer cannot
//! tell the two apart: primary keys and live-name uniqueness are enforced on
//! insert and update, and share rows are unique per (item, recipient).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use drivetree_core::error::AppError;
use drivetree_core::result::AppResult;
use drivetree_entity::file::{File, NewFile};
use drivetree_entity::folder::{Folder, NewFolder, SubtreeDeletion};
use drivetree_entity::share::{FileShare, FolderShare};

use crate::store::{FileStore, FolderStore, MAX_TREE_DEPTH, MOVE_INTO_DESCENDANT, ShareStore};

#[derive(Debug, Default)]
struct Tables {
    folders: HashMap<Uuid, Folder>,
    files: HashMap<Uuid, File>,
    folder_shares: HashMap<(Uuid, Uuid), FolderShare>,
    file_shares: HashMap<(Uuid, Uuid), FileShare>,
    next_share_id: i64,
}

impl Tables {
    fn share_id(&mut self) -> i64 {
        self.next_share_id += 1;
        self.next_share_id
    }

    fn folder_name_taken(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
        except: Option<Uuid>,
    ) -> bool {
        self.folders.values().any(|f| {
            f.status
                && f.user_id == user_id
                && f.parent_id == parent_id
                && f.name == name
                && Some(f.id) != except
        })
    }

    fn file_name_taken(
        &self,
        user_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
        extension: &str,
        except: Option<Uuid>,
    ) -> bool {
        self.files.values().any(|f| {
            f.status
                && f.user_id == user_id
                && f.folder_id == folder_id
                && f.name == name
                && f.extension == extension
                && Some(f.id) != except
        })
    }

    fn folder_mut(&mut self, id: Uuid) -> AppResult<&mut Folder> {
        self.folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    fn file_mut(&mut self, id: Uuid) -> AppResult<&mut File> {
        self.files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Whether `id` is `start` or lies on the parent chain above it.
    fn is_on_chain(&self, start: Uuid, id: Uuid) -> bool {
        let mut seen = HashSet::new();
        let mut cursor = Some(start);
        while let Some(current) = cursor {
            if current == id {
                return true;
            }
            if seen.len() > MAX_TREE_DEPTH || !seen.insert(current) {
                return false;
            }
            cursor = self.folders.get(&current).and_then(|f| f.parent_id);
        }
        false
    }

    /// Ids of `root` and every folder below it, whatever their status.
    fn subtree_ids(&self, root: Uuid) -> HashSet<Uuid> {
        let mut seen = HashSet::new();
        if !self.folders.contains_key(&root) {
            return seen;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            stack.extend(
                self.folders
                    .values()
                    .filter(|f| f.parent_id == Some(id))
                    .map(|f| f.id),
            );
        }
        seen
    }
}

fn sort_folders(folders: &mut [Folder]) {
    folders.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

fn sort_files(files: &mut [File]) {
    files.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.extension.cmp(&b.extension))
            .then(a.id.cmp(&b.id))
    });
}

/// In-process backend used for development and tests.
///
/// Clones share the same underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    /// Create an empty in-memory database.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FolderStore for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.tables.read().await.folders.get(&id).cloned())
    }

    async fn find_live_by_name(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<Folder>> {
        let tables = self.tables.read().await;
        Ok(tables
            .folders
            .values()
            .find(|f| f.status && f.user_id == user_id && f.parent_id == parent_id && f.name == name)
            .cloned())
    }

    async fn list_live_children(
        &self,
        user_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Folder>> {
        let tables = self.tables.read().await;
        let mut folders: Vec<Folder> = tables
            .folders
            .values()
            .filter(|f| f.status && f.user_id == user_id && f.parent_id == parent_id)
            .cloned()
            .collect();
        sort_folders(&mut folders);
        Ok(folders)
    }

    async fn find_ancestors(&self, id: Uuid) -> AppResult<Vec<Folder>> {
        let tables = self.tables.read().await;
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = Some(id);

        while let Some(current) = cursor {
            if chain.len() > MAX_TREE_DEPTH || !seen.insert(current) {
                break;
            }
            let Some(folder) = tables.folders.get(&current) else {
                break;
            };
            cursor = folder.parent_id;
            chain.push(folder.clone());
        }

        chain.reverse();
        Ok(chain)
    }

    async fn create(&self, data: &NewFolder) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        if tables.folders.contains_key(&data.id) {
            return Err(AppError::conflict("Folder id already exists"));
        }
        if tables.folder_name_taken(data.user_id, data.parent_id, &data.name, None) {
            return Err(AppError::conflict(
                "Folder name already exists in this location",
            ));
        }

        let now = Utc::now();
        let folder = Folder {
            id: data.id,
            name: data.name.clone(),
            user_id: data.user_id,
            parent_id: data.parent_id,
            created_date: data.created_date,
            status: true,
            created_at: now,
            updated_at: now,
        };
        tables.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        let (user_id, parent_id, live) = {
            let f = tables.folder_mut(id)?;
            (f.user_id, f.parent_id, f.status)
        };
        if live && tables.folder_name_taken(user_id, parent_id, name, Some(id)) {
            return Err(AppError::conflict(
                "Folder name already exists in this location",
            ));
        }

        let folder = tables.folder_mut(id)?;
        folder.name = name.to_string();
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        let (user_id, name, live) = {
            let f = tables.folder_mut(id)?;
            (f.user_id, f.name.clone(), f.status)
        };
        if parent_id.is_some_and(|target| tables.is_on_chain(target, id)) {
            return Err(AppError::validation(MOVE_INTO_DESCENDANT));
        }
        if live && tables.folder_name_taken(user_id, parent_id, &name, Some(id)) {
            return Err(AppError::conflict(
                "Folder name already exists in this location",
            ));
        }

        let folder = tables.folder_mut(id)?;
        folder.parent_id = parent_id;
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn soft_delete_subtree(&self, id: Uuid) -> AppResult<SubtreeDeletion> {
        let mut tables = self.tables.write().await;
        let subtree = tables.subtree_ids(id);
        let now = Utc::now();
        let mut deleted = SubtreeDeletion::default();

        for file in tables.files.values_mut() {
            if file.status && file.folder_id.is_some_and(|f| subtree.contains(&f)) {
                file.status = false;
                deleted.files += 1;
            }
        }
        for folder_id in &subtree {
            if let Some(folder) = tables.folders.get_mut(folder_id) {
                if folder.status {
                    folder.status = false;
                    folder.updated_at = now;
                    deleted.folders += 1;
                }
            }
        }

        debug!(
            folder_id = %id,
            folders = deleted.folders,
            files = deleted.files,
            "Soft-deleted subtree in memory"
        );
        Ok(deleted)
    }
}

#[async_trait]
impl FileStore for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        Ok(self.tables.read().await.files.get(&id).cloned())
    }

    async fn find_live_by_name(
        &self,
        user_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
        extension: &str,
    ) -> AppResult<Option<File>> {
        let tables = self.tables.read().await;
        Ok(tables
            .files
            .values()
            .find(|f| {
                f.status
                    && f.user_id == user_id
                    && f.folder_id == folder_id
                    && f.name == name
                    && f.extension == extension
            })
            .cloned())
    }

    async fn list_live_in(&self, user_id: Uuid, folder_id: Option<Uuid>) -> AppResult<Vec<File>> {
        let tables = self.tables.read().await;
        let mut files: Vec<File> = tables
            .files
            .values()
            .filter(|f| f.status && f.user_id == user_id && f.folder_id == folder_id)
            .cloned()
            .collect();
        sort_files(&mut files);
        Ok(files)
    }

    async fn create(&self, data: &NewFile) -> AppResult<File> {
        let mut tables = self.tables.write().await;
        if tables.files.contains_key(&data.id) {
            return Err(AppError::conflict("File id already exists"));
        }
        if tables.file_name_taken(
            data.user_id,
            data.folder_id,
            &data.name,
            &data.extension,
            None,
        ) {
            return Err(AppError::conflict(
                "File name already exists in this location",
            ));
        }

        let file = File {
            id: data.id,
            name: data.name.clone(),
            user_id: data.user_id,
            extension: data.extension.clone(),
            mime_type: data.mime_type.clone(),
            size: data.size,
            folder_id: data.folder_id,
            ip_location: data.ip_location.clone(),
            created_date: data.created_date,
            status: true,
        };
        tables.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn rename(&self, id: Uuid, name: &str) -> AppResult<File> {
        let mut tables = self.tables.write().await;
        let (user_id, folder_id, extension, live) = {
            let f = tables.file_mut(id)?;
            (f.user_id, f.folder_id, f.extension.clone(), f.status)
        };
        if live && tables.file_name_taken(user_id, folder_id, name, &extension, Some(id)) {
            return Err(AppError::conflict(
                "File name already exists in this location",
            ));
        }

        let file = tables.file_mut(id)?;
        file.name = name.to_string();
        Ok(file.clone())
    }

    async fn set_folder(&self, id: Uuid, folder_id: Option<Uuid>) -> AppResult<File> {
        let mut tables = self.tables.write().await;
        let (user_id, name, extension, live) = {
            let f = tables.file_mut(id)?;
            (f.user_id, f.name.clone(), f.extension.clone(), f.status)
        };
        if live && tables.file_name_taken(user_id, folder_id, &name, &extension, Some(id)) {
            return Err(AppError::conflict(
                "File name already exists in this location",
            ));
        }

        let file = tables.file_mut(id)?;
        file.folder_id = folder_id;
        Ok(file.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.files.get_mut(&id) {
            Some(file) if file.status => {
                file.status = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl ShareStore for MemoryDatabase {
    async fn share_folder(&self, folder_id: Uuid, user_id: Uuid) -> AppResult<FolderShare> {
        let mut tables = self.tables.write().await;
        if let Some(share) = tables.folder_shares.get_mut(&(folder_id, user_id)) {
            share.status = true;
            return Ok(share.clone());
        }
        let share = FolderShare {
            id: tables.share_id(),
            folder_id,
            user_id,
            status: true,
        };
        tables
            .folder_shares
            .insert((folder_id, user_id), share.clone());
        Ok(share)
    }

    async fn revoke_folder_share(&self, folder_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.folder_shares.get_mut(&(folder_id, user_id)) {
            Some(share) if share.status => {
                share.status = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn share_file(&self, file_id: Uuid, user_id: Uuid) -> AppResult<FileShare> {
        let mut tables = self.tables.write().await;
        if let Some(share) = tables.file_shares.get_mut(&(file_id, user_id)) {
            share.status = true;
            return Ok(share.clone());
        }
        let share = FileShare {
            id: tables.share_id(),
            file_id,
            user_id,
            status: true,
        };
        tables.file_shares.insert((file_id, user_id), share.clone());
        Ok(share)
    }

    async fn revoke_file_share(&self, file_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.file_shares.get_mut(&(file_id, user_id)) {
            Some(share) if share.status => {
                share.status = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn folders_shared_with(
        &self,
        user_id: Uuid,
        folder_ids: &[Uuid],
    ) -> AppResult<Vec<Uuid>> {
        let tables = self.tables.read().await;
        Ok(folder_ids
            .iter()
            .copied()
            .filter(|id| {
                tables
                    .folder_shares
                    .get(&(*id, user_id))
                    .is_some_and(|s| s.status)
            })
            .collect())
    }

    async fn is_file_shared_with(&self, user_id: Uuid, file_id: Uuid) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .file_shares
            .get(&(file_id, user_id))
            .is_some_and(|s| s.status))
    }

    async fn list_shared_folders(&self, user_id: Uuid) -> AppResult<Vec<Folder>> {
        let tables = self.tables.read().await;
        let mut folders: Vec<Folder> = tables
            .folder_shares
            .values()
            .filter(|s| s.status && s.user_id == user_id)
            .filter_map(|s| tables.folders.get(&s.folder_id))
            .filter(|f| f.status)
            .cloned()
            .collect();
        sort_folders(&mut folders);
        Ok(folders)
    }

    async fn list_shared_files(&self, user_id: Uuid) -> AppResult<Vec<File>> {
        let tables = self.tables.read().await;
        let mut files: Vec<File> = tables
            .file_shares
            .values()
            .filter(|s| s.status && s.user_id == user_id)
            .filter_map(|s| tables.files.get(&s.file_id))
            .filter(|f| f.status)
            .cloned()
            .collect();
        sort_files(&mut files);
        Ok(files)
    }
}
