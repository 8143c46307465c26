//! In-memory store backend.
//!
//! Implements the same store traits as the Postgres repositories over
//! `RwLock`-guarded maps, with the same sibling-uniqueness and cascade
//! semantics the schema constraints enforce. Used by service-layer unit
//! tests that should not need a live database.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_entity::dataroom::{CreateDataRoom, DataRoom, DataRoomStats};
use dataroom_entity::file::{CreateFile, File};
use dataroom_entity::folder::{CreateFolder, Folder};
use dataroom_entity::user::{UpsertUser, User};

use crate::store::{DataRoomStore, FileStore, FolderStore, UserStore};

/// In-memory implementation of every store trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    datarooms: RwLock<HashMap<Uuid, DataRoom>>,
    folders: RwLock<HashMap<Uuid, Folder>>,
    files: RwLock<HashMap<Uuid, File>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// IDs of `folder_id` and every folder below it.
    fn descendant_folder_ids(&self, folder_id: Uuid) -> Vec<Uuid> {
        let folders = self.folders.read().unwrap();
        let mut collected = vec![folder_id];
        let mut frontier = vec![folder_id];
        while let Some(current) = frontier.pop() {
            for folder in folders.values() {
                if folder.parent_id == Some(current) {
                    collected.push(folder.id);
                    frontier.push(folder.id);
                }
            }
        }
        collected
    }

    fn matches(haystack: &str, needle: &str, case_insensitive: bool) -> bool {
        if case_insensitive {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        } else {
            haystack.contains(needle)
        }
    }

    fn owned_dataroom_ids(&self, owner_id: Uuid) -> Vec<Uuid> {
        self.datarooms
            .read()
            .unwrap()
            .values()
            .filter(|r| r.owner_id == owner_id)
            .map(|r| r.id)
            .collect()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().unwrap().get(&id).cloned())
    }

    async fn find_by_oauth(&self, provider: &str, oauth_id: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.oauth_provider == provider && u.oauth_id == oauth_id)
            .cloned())
    }

    async fn upsert_oauth(&self, profile: &UpsertUser) -> AppResult<User> {
        let mut users = self.users.write().unwrap();
        let now = Utc::now();

        if let Some(existing) = users
            .values_mut()
            .find(|u| u.oauth_provider == profile.oauth_provider && u.oauth_id == profile.oauth_id)
        {
            existing.email = profile.email.clone();
            existing.name = profile.name.clone();
            existing.avatar_url = profile.avatar_url.clone();
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        if users.values().any(|u| u.email == profile.email) {
            return Err(AppError::conflict(format!(
                "A user with email '{}' already exists",
                profile.email
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            oauth_provider: profile.oauth_provider.clone(),
            oauth_id: profile.oauth_id.clone(),
            avatar_url: profile.avatar_url.clone(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl DataRoomStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DataRoom>> {
        Ok(self.datarooms.read().unwrap().get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<DataRoom>> {
        let mut rooms: Vec<DataRoom> = self
            .datarooms
            .read()
            .unwrap()
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rooms)
    }

    async fn create(&self, data: &CreateDataRoom) -> AppResult<DataRoom> {
        let now = Utc::now();
        let room = DataRoom {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            description: data.description.clone(),
            owner_id: data.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.datarooms.write().unwrap().insert(room.id, room.clone());
        Ok(room)
    }

    async fn update(&self, room: &DataRoom) -> AppResult<DataRoom> {
        let mut rooms = self.datarooms.write().unwrap();
        let stored = rooms
            .get_mut(&room.id)
            .ok_or_else(|| AppError::not_found(format!("DataRoom {} not found", room.id)))?;
        stored.name = room.name.clone();
        stored.description = room.description.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let removed = self.datarooms.write().unwrap().remove(&id).is_some();
        if removed {
            self.folders
                .write()
                .unwrap()
                .retain(|_, f| f.dataroom_id != id);
            self.files
                .write()
                .unwrap()
                .retain(|_, f| f.dataroom_id != id);
        }
        Ok(removed)
    }

    async fn stats(&self, id: Uuid) -> AppResult<DataRoomStats> {
        let total_folders = self
            .folders
            .read()
            .unwrap()
            .values()
            .filter(|f| f.dataroom_id == id)
            .count() as u64;
        let total_files = self
            .files
            .read()
            .unwrap()
            .values()
            .filter(|f| f.dataroom_id == id)
            .count() as u64;
        Ok(DataRoomStats {
            total_folders,
            total_files,
        })
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.folders.read().unwrap().get(&id).cloned())
    }

    async fn find_roots(&self, dataroom_id: Uuid) -> AppResult<Vec<Folder>> {
        let mut roots: Vec<Folder> = self
            .folders
            .read()
            .unwrap()
            .values()
            .filter(|f| f.dataroom_id == dataroom_id && f.parent_id.is_none())
            .cloned()
            .collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roots)
    }

    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>> {
        let mut children: Vec<Folder> = self
            .folders
            .read()
            .unwrap()
            .values()
            .filter(|f| f.parent_id == Some(parent_id))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn find_sibling(
        &self,
        dataroom_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<Folder>> {
        Ok(self
            .folders
            .read()
            .unwrap()
            .values()
            .find(|f| f.dataroom_id == dataroom_id && f.parent_id == parent_id && f.name == name)
            .cloned())
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut folders = self.folders.write().unwrap();
        if folders.values().any(|f| {
            f.dataroom_id == data.dataroom_id
                && f.parent_id == data.parent_id
                && f.name == data.name
        }) {
            return Err(AppError::conflict(format!(
                "Folder '{}' already exists in this location",
                data.name
            )));
        }
        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            parent_id: data.parent_id,
            dataroom_id: data.dataroom_id,
            path: data.path.clone(),
            created_at: now,
            updated_at: now,
        };
        folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        let mut folders = self.folders.write().unwrap();
        if folders.values().any(|f| {
            f.id != folder.id
                && f.dataroom_id == folder.dataroom_id
                && f.parent_id == folder.parent_id
                && f.name == folder.name
        }) {
            return Err(AppError::conflict(format!(
                "Folder '{}' already exists in this location",
                folder.name
            )));
        }
        let stored = folders
            .get_mut(&folder.id)
            .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))?;
        stored.name = folder.name.clone();
        stored.parent_id = folder.parent_id;
        stored.path = folder.path.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        if !self.folders.read().unwrap().contains_key(&id) {
            return Ok(false);
        }
        let doomed = self.descendant_folder_ids(id);
        self.folders
            .write()
            .unwrap()
            .retain(|fid, _| !doomed.contains(fid));
        self.files
            .write()
            .unwrap()
            .retain(|_, f| !matches!(f.folder_id, Some(fid) if doomed.contains(&fid)));
        Ok(true)
    }

    async fn search_by_name(
        &self,
        owner_id: Uuid,
        query: &str,
        dataroom_id: Option<Uuid>,
        case_insensitive: bool,
        limit: i64,
    ) -> AppResult<Vec<Folder>> {
        let owned = self.owned_dataroom_ids(owner_id);
        let mut matched: Vec<Folder> = self
            .folders
            .read()
            .unwrap()
            .values()
            .filter(|f| owned.contains(&f.dataroom_id))
            .filter(|f| dataroom_id.is_none_or(|id| f.dataroom_id == id))
            .filter(|f| Self::matches(&f.name, query, case_insensitive))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        matched.truncate(limit as usize);
        Ok(matched)
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        Ok(self.files.read().unwrap().get(&id).cloned())
    }

    async fn find_by_folder(
        &self,
        dataroom_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<File>> {
        let mut files: Vec<File> = self
            .files
            .read()
            .unwrap()
            .values()
            .filter(|f| f.dataroom_id == dataroom_id && f.folder_id == folder_id)
            .cloned()
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    async fn find_sibling(
        &self,
        dataroom_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<File>> {
        Ok(self
            .files
            .read()
            .unwrap()
            .values()
            .find(|f| f.dataroom_id == dataroom_id && f.folder_id == folder_id && f.name == name)
            .cloned())
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let mut files = self.files.write().unwrap();
        if files.values().any(|f| {
            f.dataroom_id == data.dataroom_id
                && f.folder_id == data.folder_id
                && f.name == data.name
        }) {
            return Err(AppError::conflict(format!(
                "File '{}' already exists in this location",
                data.name
            )));
        }
        let now = Utc::now();
        let file = File {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            original_name: data.original_name.clone(),
            folder_id: data.folder_id,
            dataroom_id: data.dataroom_id,
            storage_path: data.storage_path.clone(),
            size_bytes: data.size_bytes,
            mime_type: data.mime_type.clone(),
            content_text: data.content_text.clone(),
            created_at: now,
            updated_at: now,
        };
        files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn update(&self, file: &File) -> AppResult<File> {
        let mut files = self.files.write().unwrap();
        if files.values().any(|f| {
            f.id != file.id
                && f.dataroom_id == file.dataroom_id
                && f.folder_id == file.folder_id
                && f.name == file.name
        }) {
            return Err(AppError::conflict(format!(
                "File '{}' already exists in this location",
                file.name
            )));
        }
        let stored = files
            .get_mut(&file.id)
            .ok_or_else(|| AppError::not_found(format!("File {} not found", file.id)))?;
        stored.name = file.name.clone();
        stored.folder_id = file.folder_id;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.files.write().unwrap().remove(&id).is_some())
    }

    async fn search(
        &self,
        owner_id: Uuid,
        query: &str,
        dataroom_id: Option<Uuid>,
        search_names: bool,
        search_content: bool,
        case_insensitive: bool,
        limit: i64,
    ) -> AppResult<Vec<File>> {
        if !search_names && !search_content {
            return Ok(Vec::new());
        }
        let owned = self.owned_dataroom_ids(owner_id);
        let mut matched: Vec<File> = self
            .files
            .read()
            .unwrap()
            .values()
            .filter(|f| owned.contains(&f.dataroom_id))
            .filter(|f| dataroom_id.is_none_or(|id| f.dataroom_id == id))
            .filter(|f| {
                let name_hit = search_names && Self::matches(&f.name, query, case_insensitive);
                let content_hit = search_content
                    && f.content_text
                        .as_deref()
                        .is_some_and(|text| Self::matches(text, query, case_insensitive));
                name_hit || content_hit
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        matched.truncate(limit as usize);
        Ok(matched)
    }

    async fn suggest(
        &self,
        owner_id: Uuid,
        query: &str,
        dataroom_id: Option<Uuid>,
        limit: i64,
    ) -> AppResult<Vec<File>> {
        let owned = self.owned_dataroom_ids(owner_id);
        let mut matched: Vec<File> = self
            .files
            .read()
            .unwrap()
            .values()
            .filter(|f| owned.contains(&f.dataroom_id))
            .filter(|f| dataroom_id.is_none_or(|id| f.dataroom_id == id))
            .filter(|f| Self::matches(&f.name, query, true))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        matched.truncate(limit as usize);
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataroom_core::error::ErrorKind;

    async fn room(store: &MemoryStore, owner_id: Uuid) -> DataRoom {
        DataRoomStore::create(
            store,
            &CreateDataRoom {
                name: "Deal Room".into(),
                description: None,
                owner_id,
            },
        )
        .await
        .unwrap()
    }

    async fn folder(
        store: &MemoryStore,
        dataroom_id: Uuid,
        parent: Option<&Folder>,
        name: &str,
    ) -> Folder {
        let path = match parent {
            Some(p) => format!("{}/{}", p.path, name),
            None => format!("/{name}"),
        };
        FolderStore::create(
            store,
            &CreateFolder {
                name: name.into(),
                parent_id: parent.map(|p| p.id),
                dataroom_id,
                path,
            },
        )
        .await
        .unwrap()
    }

    async fn file(store: &MemoryStore, dataroom_id: Uuid, folder_id: Option<Uuid>, name: &str) -> File {
        FileStore::create(
            store,
            &CreateFile {
                name: name.into(),
                original_name: name.into(),
                folder_id,
                dataroom_id,
                storage_path: format!("{dataroom_id}/{}.pdf", Uuid::new_v4()),
                size_bytes: 4,
                mime_type: "application/pdf".into(),
                content_text: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn sibling_uniqueness_is_scoped_to_parent() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let r = room(&store, owner).await;
        let a = folder(&store, r.id, None, "contracts").await;
        folder(&store, r.id, Some(&a), "contracts").await; // same name, different parent

        let err = FolderStore::create(
            &store,
            &CreateFolder {
                name: "contracts".into(),
                parent_id: None,
                dataroom_id: r.id,
                path: "/contracts".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn folder_delete_cascades_to_descendants_and_files() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let r = room(&store, owner).await;
        let top = folder(&store, r.id, None, "top").await;
        let mid = folder(&store, r.id, Some(&top), "mid").await;
        let leaf = folder(&store, r.id, Some(&mid), "leaf").await;
        let doc = file(&store, r.id, Some(leaf.id), "doc.pdf").await;
        let root_doc = file(&store, r.id, None, "root.pdf").await;

        assert!(FolderStore::delete(&store, top.id).await.unwrap());

        assert!(FolderStore::find_by_id(&store, mid.id).await.unwrap().is_none());
        assert!(FolderStore::find_by_id(&store, leaf.id).await.unwrap().is_none());
        assert!(FileStore::find_by_id(&store, doc.id).await.unwrap().is_none());
        // A file outside the deleted subtree survives.
        assert!(FileStore::find_by_id(&store, root_doc.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn dataroom_delete_removes_all_contents() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let r = room(&store, owner).await;
        let f = folder(&store, r.id, None, "docs").await;
        file(&store, r.id, Some(f.id), "a.pdf").await;
        file(&store, r.id, None, "b.pdf").await;

        assert!(DataRoomStore::delete(&store, r.id).await.unwrap());
        let stats = DataRoomStore::stats(&store, r.id).await.unwrap();
        assert_eq!(stats.total_folders, 0);
        assert_eq!(stats.total_files, 0);
    }

    #[tokio::test]
    async fn search_respects_flags_and_ownership() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let r = room(&store, owner).await;

        FileStore::create(
            &store,
            &CreateFile {
                name: "Report.pdf".into(),
                original_name: "Report.pdf".into(),
                folder_id: None,
                dataroom_id: r.id,
                storage_path: format!("{}/x.pdf", r.id),
                size_bytes: 9,
                mime_type: "application/pdf".into(),
                content_text: Some("quarterly revenue numbers".into()),
            },
        )
        .await
        .unwrap();

        let by_name = FileStore::search(&store, owner, "report", None, true, false, true, 50)
            .await
            .unwrap();
        assert_eq!(by_name.len(), 1);

        let by_content = FileStore::search(&store, owner, "revenue", None, false, true, true, 50)
            .await
            .unwrap();
        assert_eq!(by_content.len(), 1);

        let case_sensitive = FileStore::search(&store, owner, "report", None, true, false, false, 50)
            .await
            .unwrap();
        assert!(case_sensitive.is_empty());

        let not_mine = FileStore::search(&store, stranger, "report", None, true, true, true, 50)
            .await
            .unwrap();
        assert!(not_mine.is_empty());
    }

    #[tokio::test]
    async fn upsert_refreshes_existing_oauth_identity() {
        let store = MemoryStore::new();
        let first = store
            .upsert_oauth(&UpsertUser {
                oauth_provider: "google".into(),
                oauth_id: "sub-123".into(),
                email: "ana@example.com".into(),
                name: Some("Ana".into()),
                avatar_url: None,
            })
            .await
            .unwrap();
        let second = store
            .upsert_oauth(&UpsertUser {
                oauth_provider: "google".into(),
                oauth_id: "sub-123".into(),
                email: "ana@example.com".into(),
                name: Some("Ana Ruiz".into()),
                avatar_url: Some("https://example.com/a.png".into()),
            })
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.name.as_deref(), Some("Ana Ruiz"));
    }
}
