//! Full recursive dataroom structure view.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use dataroom_core::result::AppResult;
use dataroom_database::store::{DataRoomStore, FileStore, FolderStore};
use dataroom_entity::file::File;
use dataroom_entity::folder::{DataRoomStructure, Folder, FolderNode};

use crate::access::require_owned_room;
use crate::context::RequestContext;

/// Builds the complete folder/file tree of a dataroom.
#[derive(Clone)]
pub struct TreeService {
    /// Dataroom store, for ownership checks.
    rooms: Arc<dyn DataRoomStore>,
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// File store.
    files: Arc<dyn FileStore>,
}

impl std::fmt::Debug for TreeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeService").finish()
    }
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(
        rooms: Arc<dyn DataRoomStore>,
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            rooms,
            folders,
            files,
        }
    }

    /// Builds the full recursive structure of a dataroom: every folder
    /// with its nested children and files, plus root-level files.
    ///
    /// Folders are gathered with an iterative walk over `parent_id`
    /// links; assembly happens in memory from the flat list.
    pub async fn structure(
        &self,
        ctx: &RequestContext,
        dataroom_id: Uuid,
    ) -> AppResult<DataRoomStructure> {
        let room = require_owned_room(self.rooms.as_ref(), ctx, dataroom_id).await?;

        // Breadth-first collection of every folder in the room.
        let roots = self.folders.find_roots(room.id).await?;
        let mut all_folders: Vec<Folder> = Vec::new();
        let mut visited: HashSet<Uuid> = HashSet::new();
        let mut frontier: Vec<Folder> = roots.clone();
        while let Some(folder) = frontier.pop() {
            if !visited.insert(folder.id) {
                continue;
            }
            frontier.extend(self.folders.find_children(folder.id).await?);
            all_folders.push(folder);
        }

        let mut files_by_folder: HashMap<Uuid, Vec<File>> = HashMap::new();
        for folder in &all_folders {
            let files = self.files.find_by_folder(room.id, Some(folder.id)).await?;
            files_by_folder.insert(folder.id, files);
        }

        let structure = roots
            .into_iter()
            .map(|root| build_node(root, &all_folders, &mut files_by_folder))
            .collect();
        let root_files = self.files.find_by_folder(room.id, None).await?;

        Ok(DataRoomStructure {
            structure,
            root_files,
        })
    }
}

/// Assembles a folder node from the flat folder list.
fn build_node(
    folder: Folder,
    all_folders: &[Folder],
    files_by_folder: &mut HashMap<Uuid, Vec<File>>,
) -> FolderNode {
    let children = all_folders
        .iter()
        .filter(|f| f.parent_id == Some(folder.id))
        .cloned()
        .map(|child| build_node(child, all_folders, files_by_folder))
        .collect();

    let files = files_by_folder.remove(&folder.id).unwrap_or_default();
    FolderNode {
        folder,
        children,
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataroom_database::MemoryStore;
    use dataroom_entity::dataroom::CreateDataRoom;
    use dataroom_entity::file::CreateFile;
    use dataroom_entity::folder::CreateFolder;

    async fn seed() -> (TreeService, RequestContext, Uuid) {
        let store = Arc::new(MemoryStore::new());
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

        let top = FolderStore::create(
            store.as_ref(),
            &CreateFolder {
                name: "contracts".into(),
                parent_id: None,
                dataroom_id: room.id,
                path: "/contracts".into(),
            },
        )
        .await
        .unwrap();
        FolderStore::create(
            store.as_ref(),
            &CreateFolder {
                name: "2024".into(),
                parent_id: Some(top.id),
                dataroom_id: room.id,
                path: "/contracts/2024".into(),
            },
        )
        .await
        .unwrap();

        for (name, folder_id) in [("nda.pdf", Some(top.id)), ("summary.pdf", None)] {
            FileStore::create(
                store.as_ref(),
                &CreateFile {
                    name: name.into(),
                    original_name: name.into(),
                    folder_id,
                    dataroom_id: room.id,
                    storage_path: format!("{}/{name}", room.id),
                    size_bytes: 4,
                    mime_type: "application/pdf".into(),
                    content_text: None,
                },
            )
            .await
            .unwrap();
        }

        let svc = TreeService::new(store.clone(), store.clone(), store);
        (svc, ctx, room.id)
    }

    #[tokio::test]
    async fn test_structure_nests_folders_and_files() {
        let (svc, ctx, room_id) = seed().await;
        let tree = svc.structure(&ctx, room_id).await.unwrap();

        assert_eq!(tree.structure.len(), 1);
        let top = &tree.structure[0];
        assert_eq!(top.folder.name, "contracts");
        assert_eq!(top.children.len(), 1);
        assert_eq!(top.children[0].folder.name, "2024");
        assert_eq!(top.files.len(), 1);
        assert_eq!(top.files[0].name, "nda.pdf");

        assert_eq!(tree.root_files.len(), 1);
        assert_eq!(tree.root_files[0].name, "summary.pdf");
    }
}
