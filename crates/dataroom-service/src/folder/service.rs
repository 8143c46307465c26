//! Folder CRUD, materialized path maintenance, and cascading deletion.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::traits::blob::BlobStore;
use dataroom_database::store::{DataRoomStore, FileStore, FolderStore};
use dataroom_entity::file::File;
use dataroom_entity::folder::{CreateFolder, Folder};

use crate::access::{require_owned_folder, require_owned_room};
use crate::context::RequestContext;
use crate::naming::{join_path, validate_name};

/// Manages folder CRUD, path propagation, and recursive deletion.
#[derive(Clone)]
pub struct FolderService {
    /// Dataroom store, for ownership checks.
    rooms: Arc<dyn DataRoomStore>,
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// File store, for folder contents and cascade deletion.
    files: Arc<dyn FileStore>,
    /// Blob store, for cascade deletion of file blobs.
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService").finish()
    }
}

/// Request to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// The dataroom.
    pub dataroom_id: Uuid,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
}

/// A folder with its direct children and files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContents {
    /// The folder itself.
    pub folder: Folder,
    /// Direct child folders, name-ordered.
    pub folders: Vec<Folder>,
    /// Files directly inside, name-ordered.
    pub files: Vec<File>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        rooms: Arc<dyn DataRoomStore>,
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            rooms,
            folders,
            files,
            blobs,
        }
    }

    /// Creates a new folder, enforcing sibling-name uniqueness and
    /// computing its materialized path.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        let name = validate_name(&req.name)?;
        let room = require_owned_room(self.rooms.as_ref(), ctx, req.dataroom_id).await?;

        let parent_path = match req.parent_id {
            Some(parent_id) => {
                let parent = self
                    .folders
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
                if parent.dataroom_id != room.id {
                    return Err(AppError::validation(
                        "Parent folder belongs to a different dataroom",
                    ));
                }
                Some(parent.path)
            }
            None => None,
        };

        if self
            .folders
            .find_sibling(room.id, req.parent_id, &name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Folder '{name}' already exists in this location"
            )));
        }

        let folder = self
            .folders
            .create(&CreateFolder {
                name: name.clone(),
                parent_id: req.parent_id,
                dataroom_id: room.id,
                path: join_path(parent_path.as_deref(), &name),
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );
        Ok(folder)
    }

    /// Gets a folder by ID, enforcing ownership.
    pub async fn get(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        let (_, folder) =
            require_owned_folder(self.rooms.as_ref(), self.folders.as_ref(), ctx, folder_id)
                .await?;
        Ok(folder)
    }

    /// Gets a folder with its direct children and files (non-recursive).
    pub async fn contents(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<FolderContents> {
        let (room, folder) =
            require_owned_folder(self.rooms.as_ref(), self.folders.as_ref(), ctx, folder_id)
                .await?;

        let child_folders = self.folders.find_children(folder.id).await?;
        let files = self.files.find_by_folder(room.id, Some(folder.id)).await?;

        Ok(FolderContents {
            folder,
            folders: child_folders,
            files,
        })
    }

    /// Renames a folder and recomputes the materialized path of the
    /// folder and every descendant.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> AppResult<Folder> {
        let name = validate_name(new_name)?;
        let (room, mut folder) =
            require_owned_folder(self.rooms.as_ref(), self.folders.as_ref(), ctx, folder_id)
                .await?;

        if let Some(sibling) = self
            .folders
            .find_sibling(room.id, folder.parent_id, &name)
            .await?
            && sibling.id != folder.id
        {
            return Err(AppError::conflict(format!(
                "Folder '{name}' already exists in this location"
            )));
        }

        let parent_path = self.parent_path(&folder).await?;
        folder.name = name;
        folder.path = join_path(parent_path.as_deref(), &folder.name);

        let folder = self.folders.update(&folder).await?;
        self.propagate_paths(&folder).await?;

        info!(user_id = %ctx.user_id, folder_id = %folder.id, path = %folder.path, "Folder renamed");
        Ok(folder)
    }

    /// Moves a folder to a new parent (None for the dataroom root),
    /// rejecting moves into the folder itself or any of its descendants.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        let (room, mut folder) =
            require_owned_folder(self.rooms.as_ref(), self.folders.as_ref(), ctx, folder_id)
                .await?;

        let parent_path = match new_parent_id {
            Some(parent_id) => {
                if parent_id == folder.id {
                    return Err(AppError::validation("Cannot move a folder into itself"));
                }
                let target = self
                    .folders
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Target folder not found"))?;
                if target.dataroom_id != room.id {
                    return Err(AppError::validation(
                        "Target folder belongs to a different dataroom",
                    ));
                }
                if self.is_descendant(folder.id, &target).await? {
                    return Err(AppError::validation(
                        "Cannot move a folder into one of its descendants",
                    ));
                }
                Some(target.path)
            }
            None => None,
        };

        if let Some(sibling) = self
            .folders
            .find_sibling(room.id, new_parent_id, &folder.name)
            .await?
            && sibling.id != folder.id
        {
            return Err(AppError::conflict(format!(
                "Folder '{}' already exists in this location",
                folder.name
            )));
        }

        folder.parent_id = new_parent_id;
        folder.path = join_path(parent_path.as_deref(), &folder.name);

        let folder = self.folders.update(&folder).await?;
        self.propagate_paths(&folder).await?;

        info!(user_id = %ctx.user_id, folder_id = %folder.id, path = %folder.path, "Folder moved");
        Ok(folder)
    }

    /// Deletes a folder and its entire subtree.
    ///
    /// Every descendant file's blob is removed first (best-effort, errors
    /// logged and skipped), then the folder record is deleted and the
    /// store cascade removes all descendant rows.
    pub async fn delete(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<()> {
        let (room, folder) =
            require_owned_folder(self.rooms.as_ref(), self.folders.as_ref(), ctx, folder_id)
                .await?;

        let mut visited = HashSet::new();
        let mut frontier = vec![folder.id];
        while let Some(current) = frontier.pop() {
            if !visited.insert(current) {
                continue;
            }

            for file in self.files.find_by_folder(room.id, Some(current)).await? {
                if let Err(e) = self.blobs.delete(&file.storage_path).await {
                    warn!(file_id = %file.id, locator = %file.storage_path, error = %e,
                        "Failed to delete blob during folder deletion");
                }
            }

            for child in self.folders.find_children(current).await? {
                frontier.push(child.id);
            }
        }

        let deleted = self.folders.delete(folder.id).await?;
        if !deleted {
            return Err(AppError::not_found("Folder not found"));
        }

        info!(user_id = %ctx.user_id, folder_id = %folder_id, path = %folder.path, "Folder deleted");
        Ok(())
    }

    /// The materialized path of a folder's parent (None at root).
    async fn parent_path(&self, folder: &Folder) -> AppResult<Option<String>> {
        match folder.parent_id {
            Some(parent_id) => {
                let parent = self
                    .folders
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
                Ok(Some(parent.path))
            }
            None => Ok(None),
        }
    }

    /// Whether `target` lies in the subtree rooted at `folder_id`,
    /// checked by walking `target`'s ancestor chain.
    async fn is_descendant(&self, folder_id: Uuid, target: &Folder) -> AppResult<bool> {
        let mut visited = HashSet::new();
        let mut current = target.parent_id;
        while let Some(ancestor_id) = current {
            if ancestor_id == folder_id {
                return Ok(true);
            }
            if !visited.insert(ancestor_id) {
                break;
            }
            current = match self.folders.find_by_id(ancestor_id).await? {
                Some(ancestor) => ancestor.parent_id,
                None => None,
            };
        }
        Ok(false)
    }

    /// Recompute the materialized path of every descendant of `root`,
    /// iteratively with an explicit stack and visited set.
    async fn propagate_paths(&self, root: &Folder) -> AppResult<()> {
        let mut visited = HashSet::new();
        let mut frontier = vec![(root.id, root.path.clone())];
        while let Some((parent_id, parent_path)) = frontier.pop() {
            if !visited.insert(parent_id) {
                continue;
            }
            for mut child in self.folders.find_children(parent_id).await? {
                child.path = format!("{parent_path}/{}", child.name);
                let child = self.folders.update(&child).await?;
                frontier.push((child.id, child.path));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataroom_core::error::ErrorKind;
    use dataroom_database::MemoryStore;
    use dataroom_entity::dataroom::CreateDataRoom;
    use dataroom_entity::file::CreateFile;
    use dataroom_storage::{LocalBlobStore, allocate_locator};

    struct Fixture {
        svc: FolderService,
        store: Arc<MemoryStore>,
        blobs: Arc<LocalBlobStore>,
        ctx: RequestContext,
        room_id: Uuid,
        _dir: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let blobs = Arc::new(
            LocalBlobStore::new(dir.path().to_str().unwrap())
                .await
                .unwrap(),
        );
        let ctx = RequestContext::new(Uuid::new_v4(), "ana@example.com".into());
        let room = DataRoomStore::create(
            store.as_ref(),
            &CreateDataRoom {
                name: "Deal Room".into(),
                description: None,
                owner_id: ctx.user_id,
            },
        )
        .await
        .unwrap();

        let svc = FolderService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            blobs.clone(),
        );
        Fixture {
            svc,
            store,
            blobs,
            ctx,
            room_id: room.id,
            _dir: dir,
        }
    }

    impl Fixture {
        async fn mkdir(&self, parent_id: Option<Uuid>, name: &str) -> Folder {
            self.svc
                .create(
                    &self.ctx,
                    CreateFolderRequest {
                        dataroom_id: self.room_id,
                        parent_id,
                        name: name.into(),
                    },
                )
                .await
                .unwrap()
        }

        async fn add_file(&self, folder_id: Option<Uuid>, name: &str) -> File {
            let locator = allocate_locator(self.room_id, "pdf");
            self.blobs
                .write(&locator, bytes::Bytes::from_static(b"%PDF-1.4"))
                .await
                .unwrap();
            FileStore::create(
                self.store.as_ref(),
                &CreateFile {
                    name: name.into(),
                    original_name: name.into(),
                    folder_id,
                    dataroom_id: self.room_id,
                    storage_path: locator,
                    size_bytes: 8,
                    mime_type: "application/pdf".into(),
                    content_text: None,
                },
            )
            .await
            .unwrap()
        }

        async fn path_of(&self, id: Uuid) -> String {
            FolderStore::find_by_id(self.store.as_ref(), id)
                .await
                .unwrap()
                .unwrap()
                .path
        }
    }

    #[tokio::test]
    async fn test_create_computes_materialized_path() {
        let fx = fixture().await;
        let top = fx.mkdir(None, "contracts").await;
        let sub = fx.mkdir(Some(top.id), "2024").await;

        assert_eq!(top.path, "/contracts");
        assert_eq!(sub.path, "/contracts/2024");
    }

    #[tokio::test]
    async fn test_duplicate_sibling_rejected_different_parent_allowed() {
        let fx = fixture().await;
        let top = fx.mkdir(None, "reports").await;

        let err = fx
            .svc
            .create(
                &fx.ctx,
                CreateFolderRequest {
                    dataroom_id: fx.room_id,
                    parent_id: None,
                    name: "reports".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        // Same name under a different parent is fine.
        fx.mkdir(Some(top.id), "reports").await;
    }

    #[tokio::test]
    async fn test_rename_propagates_paths_to_descendants() {
        let fx = fixture().await;
        let top = fx.mkdir(None, "contracts").await;
        let mid = fx.mkdir(Some(top.id), "2024").await;
        let leaf = fx.mkdir(Some(mid.id), "signed").await;

        let renamed = fx.svc.rename(&fx.ctx, top.id, "agreements").await.unwrap();
        assert_eq!(renamed.path, "/agreements");
        assert_eq!(fx.path_of(mid.id).await, "/agreements/2024");
        assert_eq!(fx.path_of(leaf.id).await, "/agreements/2024/signed");
    }

    #[tokio::test]
    async fn test_move_propagates_paths_to_descendants() {
        let fx = fixture().await;
        let a = fx.mkdir(None, "a").await;
        let b = fx.mkdir(None, "b").await;
        let child = fx.mkdir(Some(a.id), "child").await;
        let grandchild = fx.mkdir(Some(child.id), "grand").await;

        let moved = fx
            .svc
            .move_folder(&fx.ctx, child.id, Some(b.id))
            .await
            .unwrap();
        assert_eq!(moved.path, "/b/child");
        assert_eq!(moved.parent_id, Some(b.id));
        assert_eq!(fx.path_of(grandchild.id).await, "/b/child/grand");
    }

    #[tokio::test]
    async fn test_move_to_root() {
        let fx = fixture().await;
        let a = fx.mkdir(None, "a").await;
        let child = fx.mkdir(Some(a.id), "child").await;

        let moved = fx.svc.move_folder(&fx.ctx, child.id, None).await.unwrap();
        assert_eq!(moved.parent_id, None);
        assert_eq!(moved.path, "/child");
    }

    #[tokio::test]
    async fn test_move_into_self_or_descendant_rejected() {
        let fx = fixture().await;
        let top = fx.mkdir(None, "top").await;
        let mid = fx.mkdir(Some(top.id), "mid").await;
        let leaf = fx.mkdir(Some(mid.id), "leaf").await;

        let err = fx
            .svc
            .move_folder(&fx.ctx, top.id, Some(top.id))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = fx
            .svc
            .move_folder(&fx.ctx, top.id, Some(leaf.id))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_move_name_conflict_at_destination_rejected() {
        let fx = fixture().await;
        let a = fx.mkdir(None, "a").await;
        let b = fx.mkdir(None, "b").await;
        fx.mkdir(Some(b.id), "dup").await;
        let moving = fx.mkdir(Some(a.id), "dup").await;

        let err = fx
            .svc
            .move_folder(&fx.ctx, moving.id, Some(b.id))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_delete_removes_subtree_records_and_blobs() {
        let fx = fixture().await;
        let top = fx.mkdir(None, "top").await;
        let mid = fx.mkdir(Some(top.id), "mid").await;
        let doc_top = fx.add_file(Some(top.id), "a.pdf").await;
        let doc_mid = fx.add_file(Some(mid.id), "b.pdf").await;
        let doc_root = fx.add_file(None, "root.pdf").await;

        fx.svc.delete(&fx.ctx, top.id).await.unwrap();

        assert!(
            FolderStore::find_by_id(fx.store.as_ref(), mid.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            FileStore::find_by_id(fx.store.as_ref(), doc_mid.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(!fx.blobs.exists(&doc_top.storage_path).await.unwrap());
        assert!(!fx.blobs.exists(&doc_mid.storage_path).await.unwrap());

        // Root-level file and its blob are untouched.
        assert!(
            FileStore::find_by_id(fx.store.as_ref(), doc_root.id)
                .await
                .unwrap()
                .is_some()
        );
        assert!(fx.blobs.exists(&doc_root.storage_path).await.unwrap());

        let err = fx.svc.get(&fx.ctx, mid.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_contents_lists_children_and_files() {
        let fx = fixture().await;
        let top = fx.mkdir(None, "top").await;
        fx.mkdir(Some(top.id), "zeta").await;
        fx.mkdir(Some(top.id), "alpha").await;
        fx.add_file(Some(top.id), "doc.pdf").await;

        let contents = fx.svc.contents(&fx.ctx, top.id).await.unwrap();
        assert_eq!(contents.folders.len(), 2);
        assert_eq!(contents.folders[0].name, "alpha");
        assert_eq!(contents.files.len(), 1);
    }

    #[tokio::test]
    async fn test_cross_room_parent_rejected() {
        let fx = fixture().await;
        let other_room = DataRoomStore::create(
            fx.store.as_ref(),
            &CreateDataRoom {
                name: "Other".into(),
                description: None,
                owner_id: fx.ctx.user_id,
            },
        )
        .await
        .unwrap();
        let foreign = fx
            .svc
            .create(
                &fx.ctx,
                CreateFolderRequest {
                    dataroom_id: other_room.id,
                    parent_id: None,
                    name: "foreign".into(),
                },
            )
            .await
            .unwrap();

        let err = fx
            .svc
            .create(
                &fx.ctx,
                CreateFolderRequest {
                    dataroom_id: fx.room_id,
                    parent_id: Some(foreign.id),
                    name: "child".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
