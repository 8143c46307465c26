//! File metadata operations: get, rename, move, delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::traits::blob::BlobStore;
use dataroom_database::store::{DataRoomStore, FileStore, FolderStore};
use dataroom_entity::file::File;

use crate::access::require_owned_file;
use crate::context::RequestContext;
use crate::naming::validate_name;

/// Manages file metadata operations.
#[derive(Clone)]
pub struct FileService {
    /// Dataroom store, for ownership checks.
    rooms: Arc<dyn DataRoomStore>,
    /// Folder store, for move-target validation.
    folders: Arc<dyn FolderStore>,
    /// File store.
    files: Arc<dyn FileStore>,
    /// Blob store.
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish()
    }
}

impl FileService {
    /// Creates a new file service.
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

    /// Gets a file by ID, enforcing ownership.
    pub async fn get(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let (_, file) =
            require_owned_file(self.rooms.as_ref(), self.files.as_ref(), ctx, file_id).await?;
        Ok(file)
    }

    /// Renames a file. The `.pdf` extension is enforced on the new name;
    /// an exact sibling collision is rejected.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_name: &str,
    ) -> AppResult<File> {
        let name = validate_name(new_name)?;
        let name = if name.to_lowercase().ends_with(".pdf") {
            name
        } else {
            format!("{name}.pdf")
        };

        let (room, mut file) =
            require_owned_file(self.rooms.as_ref(), self.files.as_ref(), ctx, file_id).await?;

        if let Some(sibling) = self
            .files
            .find_sibling(room.id, file.folder_id, &name)
            .await?
            && sibling.id != file.id
        {
            return Err(AppError::conflict(format!(
                "File '{name}' already exists in this location"
            )));
        }

        file.name = name;
        let file = self.files.update(&file).await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, name = %file.name, "File renamed");
        Ok(file)
    }

    /// Moves a file into a folder (None for the dataroom root),
    /// rejecting a name collision at the destination.
    pub async fn move_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<File> {
        let (room, mut file) =
            require_owned_file(self.rooms.as_ref(), self.files.as_ref(), ctx, file_id).await?;

        if let Some(target_id) = folder_id {
            let folder = self
                .folders
                .find_by_id(target_id)
                .await?
                .ok_or_else(|| AppError::not_found("Target folder not found"))?;
            if folder.dataroom_id != room.id {
                return Err(AppError::validation(
                    "Target folder belongs to a different dataroom",
                ));
            }
        }

        if let Some(sibling) = self
            .files
            .find_sibling(room.id, folder_id, &file.name)
            .await?
            && sibling.id != file.id
        {
            return Err(AppError::conflict(format!(
                "File '{}' already exists in this location",
                file.name
            )));
        }

        file.folder_id = folder_id;
        let file = self.files.update(&file).await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, "File moved");
        Ok(file)
    }

    /// Deletes a file: blob first (absence is not an error), then record.
    pub async fn delete(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let (_, file) =
            require_owned_file(self.rooms.as_ref(), self.files.as_ref(), ctx, file_id).await?;

        self.blobs.delete(&file.storage_path).await?;

        let deleted = self.files.delete(file.id).await?;
        if !deleted {
            return Err(AppError::not_found("File not found"));
        }

        info!(user_id = %ctx.user_id, file_id = %file_id, "File deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::testing::{Env, env};
    use dataroom_core::error::ErrorKind;
    use dataroom_core::traits::blob::allocate_locator;
    use dataroom_database::store::FolderStore;
    use dataroom_entity::file::CreateFile;
    use dataroom_entity::folder::CreateFolder;

    fn service(env: &Env) -> FileService {
        FileService::new(
            env.store.clone(),
            env.store.clone(),
            env.store.clone(),
            env.blobs.clone(),
        )
    }

    async fn seed_file(env: &Env, folder_id: Option<Uuid>, name: &str) -> File {
        let locator = allocate_locator(env.room_id, "pdf");
        env.blobs
            .write(&locator, bytes::Bytes::from_static(b"%PDF-1.4"))
            .await
            .unwrap();
        FileStore::create(
            env.store.as_ref(),
            &CreateFile {
                name: name.into(),
                original_name: name.into(),
                folder_id,
                dataroom_id: env.room_id,
                storage_path: locator,
                size_bytes: 8,
                mime_type: "application/pdf".into(),
                content_text: None,
            },
        )
        .await
        .unwrap()
    }

    async fn seed_folder(env: &Env, name: &str) -> Uuid {
        FolderStore::create(
            env.store.as_ref(),
            &CreateFolder {
                name: name.into(),
                parent_id: None,
                dataroom_id: env.room_id,
                path: format!("/{name}"),
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_rename_forces_pdf_extension() {
        let env = env().await;
        let svc = service(&env);
        let file = seed_file(&env, None, "report.pdf").await;

        let renamed = svc.rename(&env.ctx, file.id, "summary").await.unwrap();
        assert_eq!(renamed.name, "summary.pdf");
        // original_name is untouched by renames.
        assert_eq!(renamed.original_name, "report.pdf");
    }

    #[tokio::test]
    async fn test_rename_collision_rejected() {
        let env = env().await;
        let svc = service(&env);
        seed_file(&env, None, "taken.pdf").await;
        let file = seed_file(&env, None, "report.pdf").await;

        let err = svc.rename(&env.ctx, file.id, "taken.pdf").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        // Renaming to its own current name is a no-op, not a conflict.
        svc.rename(&env.ctx, file.id, "report.pdf").await.unwrap();
    }

    #[tokio::test]
    async fn test_move_between_folders() {
        let env = env().await;
        let svc = service(&env);
        let folder = seed_folder(&env, "docs").await;
        let file = seed_file(&env, None, "report.pdf").await;

        let moved = svc.move_file(&env.ctx, file.id, Some(folder)).await.unwrap();
        assert_eq!(moved.folder_id, Some(folder));

        let back = svc.move_file(&env.ctx, file.id, None).await.unwrap();
        assert_eq!(back.folder_id, None);
    }

    #[tokio::test]
    async fn test_move_collision_at_destination_rejected() {
        let env = env().await;
        let svc = service(&env);
        let folder = seed_folder(&env, "docs").await;
        seed_file(&env, Some(folder), "report.pdf").await;
        let file = seed_file(&env, None, "report.pdf").await;

        let err = svc
            .move_file(&env.ctx, file.id, Some(folder))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_delete_removes_blob_and_record() {
        let env = env().await;
        let svc = service(&env);
        let file = seed_file(&env, None, "report.pdf").await;

        svc.delete(&env.ctx, file.id).await.unwrap();
        assert!(!env.blobs.exists(&file.storage_path).await.unwrap());
        let err = svc.get(&env.ctx, file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
