//! File download with blob-consistency checking.

use std::sync::Arc;

use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::traits::blob::{BlobStore, ByteStream};
use dataroom_database::store::{DataRoomStore, FileStore};
use dataroom_entity::file::File;

use crate::access::require_owned_file;
use crate::context::RequestContext;

/// Serves file downloads.
#[derive(Clone)]
pub struct DownloadService {
    /// Dataroom store, for ownership checks.
    rooms: Arc<dyn DataRoomStore>,
    /// File store.
    files: Arc<dyn FileStore>,
    /// Blob store.
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService").finish()
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(
        rooms: Arc<dyn DataRoomStore>,
        files: Arc<dyn FileStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            rooms,
            files,
            blobs,
        }
    }

    /// Opens a file's blob for streaming download.
    ///
    /// A record whose backing blob has gone missing is reported as a
    /// distinct storage-inconsistency condition, never a crash.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> AppResult<(File, ByteStream)> {
        let (_, file) =
            require_owned_file(self.rooms.as_ref(), self.files.as_ref(), ctx, file_id).await?;

        if !self.blobs.exists(&file.storage_path).await? {
            return Err(AppError::storage_inconsistency(format!(
                "File '{}' exists but its content is missing from storage",
                file.name
            )));
        }

        let stream = self.blobs.read(&file.storage_path).await?;
        Ok((file, stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::testing::env;
    use dataroom_core::error::ErrorKind;
    use dataroom_core::traits::blob::allocate_locator;
    use dataroom_entity::file::CreateFile;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_download_streams_blob() {
        let env = env().await;
        let svc = DownloadService::new(env.store.clone(), env.store.clone(), env.blobs.clone());

        let locator = allocate_locator(env.room_id, "pdf");
        env.blobs
            .write(&locator, bytes::Bytes::from_static(b"%PDF-1.4 content"))
            .await
            .unwrap();
        let file = FileStore::create(
            env.store.as_ref(),
            &CreateFile {
                name: "report.pdf".into(),
                original_name: "report.pdf".into(),
                folder_id: None,
                dataroom_id: env.room_id,
                storage_path: locator,
                size_bytes: 16,
                mime_type: "application/pdf".into(),
                content_text: None,
            },
        )
        .await
        .unwrap();

        let (meta, mut stream) = svc.download(&env.ctx, file.id).await.unwrap();
        assert_eq!(meta.name, "report.pdf");

        let mut body = Vec::new();
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(body, b"%PDF-1.4 content");
    }

    #[tokio::test]
    async fn test_missing_blob_is_storage_inconsistency() {
        let env = env().await;
        let svc = DownloadService::new(env.store.clone(), env.store.clone(), env.blobs.clone());

        let file = FileStore::create(
            env.store.as_ref(),
            &CreateFile {
                name: "ghost.pdf".into(),
                original_name: "ghost.pdf".into(),
                folder_id: None,
                dataroom_id: env.room_id,
                storage_path: allocate_locator(env.room_id, "pdf"),
                size_bytes: 8,
                mime_type: "application/pdf".into(),
                content_text: None,
            },
        )
        .await
        .unwrap();

        // The Ok arm holds a live byte stream, so destructure instead
        // of unwrap_err().
        let Err(err) = svc.download(&env.ctx, file.id).await else {
            panic!("download of a file with a missing blob must fail");
        };
        assert_eq!(err.kind, ErrorKind::StorageInconsistency);
    }
}
