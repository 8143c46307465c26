//! File upload with PDF validation and name collision resolution.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use dataroom_core::config::StorageConfig;
use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::traits::blob::{BlobStore, allocate_locator};
use dataroom_core::traits::extract::TextExtractor;
use dataroom_database::store::{DataRoomStore, FileStore, FolderStore};
use dataroom_entity::file::{CreateFile, File};

use crate::access::require_owned_room;
use crate::context::RequestContext;
use crate::naming::{extension_of, sanitize_filename, split_extension};

const PDF_MAGIC: &[u8] = b"%PDF";

/// Handles file uploads.
#[derive(Clone)]
pub struct UploadService {
    /// Dataroom store, for ownership checks.
    rooms: Arc<dyn DataRoomStore>,
    /// Folder store, for target validation.
    folders: Arc<dyn FolderStore>,
    /// File store.
    files: Arc<dyn FileStore>,
    /// Blob store.
    blobs: Arc<dyn BlobStore>,
    /// Text extractor for content search.
    extractor: Arc<dyn TextExtractor>,
    /// Storage configuration (size limit, extension whitelist).
    config: StorageConfig,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService").finish()
    }
}

/// Parameters for a single-request upload.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// The dataroom.
    pub dataroom_id: Uuid,
    /// Target folder (None for the dataroom root).
    pub folder_id: Option<Uuid>,
    /// Filename as uploaded.
    pub file_name: String,
    /// File content bytes.
    pub data: Bytes,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        rooms: Arc<dyn DataRoomStore>,
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        blobs: Arc<dyn BlobStore>,
        extractor: Arc<dyn TextExtractor>,
        config: StorageConfig,
    ) -> Self {
        Self {
            rooms,
            folders,
            files,
            blobs,
            extractor,
            config,
        }
    }

    /// Uploads a file into a dataroom.
    ///
    /// The display name is resolved against existing siblings: an exact
    /// collision gets a ` (1)`, ` (2)`, … suffix appended before the
    /// extension, while `original_name` keeps the uploaded filename
    /// verbatim. The blob lands under an opaque locator so display-name
    /// collisions can never collide on disk.
    pub async fn upload(&self, ctx: &RequestContext, params: UploadParams) -> AppResult<File> {
        let room = require_owned_room(self.rooms.as_ref(), ctx, params.dataroom_id).await?;

        if params.data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.config.max_upload_size_bytes
            )));
        }

        if let Some(folder_id) = params.folder_id {
            let folder = self
                .folders
                .find_by_id(folder_id)
                .await?
                .ok_or_else(|| AppError::not_found("Target folder not found"))?;
            if folder.dataroom_id != room.id {
                return Err(AppError::validation(
                    "Target folder belongs to a different dataroom",
                ));
            }
        }

        let original_name = sanitize_filename(&params.file_name);
        if original_name.is_empty() {
            return Err(AppError::validation("Filename cannot be empty"));
        }

        let extension = extension_of(&original_name)
            .filter(|ext| self.config.is_extension_allowed(ext))
            .ok_or_else(|| AppError::validation("Only PDF files are allowed"))?;
        if !params.data.starts_with(PDF_MAGIC) {
            return Err(AppError::validation("File content is not a valid PDF"));
        }

        let name = self
            .resolve_name(room.id, params.folder_id, &original_name)
            .await?;

        let locator = allocate_locator(room.id, &extension);
        self.blobs.write(&locator, params.data.clone()).await?;

        // Extraction is best-effort: a failure stores the file without
        // searchable content.
        let content_text = match self.extractor.extract(params.data.clone()).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(file_name = %original_name, error = %e, "Text extraction failed");
                None
            }
        };

        let record = CreateFile {
            name,
            original_name,
            folder_id: params.folder_id,
            dataroom_id: room.id,
            storage_path: locator.clone(),
            size_bytes: params.data.len() as i64,
            mime_type: "application/pdf".to_string(),
            content_text,
        };

        let file = match self.files.create(&record).await {
            Ok(file) => file,
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&locator).await {
                    warn!(locator = %locator, error = %cleanup, "Failed to clean up orphaned blob");
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            name = %file.name,
            size_bytes = file.size_bytes,
            "File uploaded"
        );
        Ok(file)
    }

    /// Resolve a proposed display name against existing siblings,
    /// appending ` (n)` before the extension until the name is free.
    async fn resolve_name(
        &self,
        dataroom_id: Uuid,
        folder_id: Option<Uuid>,
        proposed: &str,
    ) -> AppResult<String> {
        if self
            .files
            .find_sibling(dataroom_id, folder_id, proposed)
            .await?
            .is_none()
        {
            return Ok(proposed.to_string());
        }

        let (base, ext) = split_extension(proposed);
        let mut counter = 1u32;
        loop {
            let candidate = format!("{base} ({counter}){ext}");
            if self
                .files
                .find_sibling(dataroom_id, folder_id, &candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::testing::{Env, StubExtractor, env};
    use dataroom_core::error::ErrorKind;

    fn service(env: &Env, extractor: StubExtractor) -> UploadService {
        UploadService::new(
            env.store.clone(),
            env.store.clone(),
            env.store.clone(),
            env.blobs.clone(),
            Arc::new(extractor),
            StorageConfig::default(),
        )
    }

    fn pdf_params(env: &Env, name: &str) -> UploadParams {
        UploadParams {
            dataroom_id: env.room_id,
            folder_id: None,
            file_name: name.into(),
            data: Bytes::from_static(b"%PDF-1.4 test document"),
        }
    }

    #[tokio::test]
    async fn test_upload_stores_blob_and_record() {
        let env = env().await;
        let svc = service(&env, StubExtractor { text: Some("quarterly revenue".into()) });

        let file = svc.upload(&env.ctx, pdf_params(&env, "report.pdf")).await.unwrap();
        assert_eq!(file.name, "report.pdf");
        assert_eq!(file.original_name, "report.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.content_text.as_deref(), Some("quarterly revenue"));
        assert!(env.blobs.exists(&file.storage_path).await.unwrap());
        assert!(file.storage_path.starts_with(&format!("{}/", env.room_id)));
    }

    #[tokio::test]
    async fn test_collision_appends_counter_and_keeps_original_name() {
        let env = env().await;
        let svc = service(&env, StubExtractor { text: Some(String::new()) });

        let first = svc.upload(&env.ctx, pdf_params(&env, "report.pdf")).await.unwrap();
        let second = svc.upload(&env.ctx, pdf_params(&env, "report.pdf")).await.unwrap();
        let third = svc.upload(&env.ctx, pdf_params(&env, "report.pdf")).await.unwrap();

        assert_eq!(first.name, "report.pdf");
        assert_eq!(second.name, "report (1).pdf");
        assert_eq!(third.name, "report (2).pdf");
        for file in [&first, &second, &third] {
            assert_eq!(file.original_name, "report.pdf");
        }
        // Distinct blobs despite the colliding display names.
        assert_ne!(first.storage_path, second.storage_path);
    }

    #[tokio::test]
    async fn test_non_pdf_rejected() {
        let env = env().await;
        let svc = service(&env, StubExtractor { text: Some(String::new()) });

        let err = svc
            .upload(&env.ctx, pdf_params(&env, "notes.txt"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = svc
            .upload(
                &env.ctx,
                UploadParams {
                    data: Bytes::from_static(b"plain text pretending"),
                    ..pdf_params(&env, "fake.pdf")
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_extraction_failure_does_not_fail_upload() {
        let env = env().await;
        let svc = service(&env, StubExtractor { text: None });

        let file = svc.upload(&env.ctx, pdf_params(&env, "scan.pdf")).await.unwrap();
        assert!(file.content_text.is_none());
    }

    #[tokio::test]
    async fn test_filename_is_sanitized() {
        let env = env().await;
        let svc = service(&env, StubExtractor { text: Some(String::new()) });

        let file = svc
            .upload(&env.ctx, pdf_params(&env, "../../etc/report.pdf"))
            .await
            .unwrap();
        assert_eq!(file.name, "report.pdf");
        assert_eq!(file.original_name, "report.pdf");
    }

    #[tokio::test]
    async fn test_size_limit_enforced() {
        let env = env().await;
        let mut svc = service(&env, StubExtractor { text: Some(String::new()) });
        svc.config.max_upload_size_bytes = 8;

        let err = svc
            .upload(&env.ctx, pdf_params(&env, "big.pdf"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
