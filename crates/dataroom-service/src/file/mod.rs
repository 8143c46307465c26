//! File services: upload, metadata operations, download.

pub mod download;
pub mod service;
pub mod upload;

pub use download::DownloadService;
pub use service::FileService;
pub use upload::{UploadParams, UploadService};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for file service tests.

    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;
    use uuid::Uuid;

    use dataroom_core::result::AppResult;
    use dataroom_core::traits::extract::TextExtractor;
    use dataroom_database::MemoryStore;
    use dataroom_database::store::DataRoomStore;
    use dataroom_entity::dataroom::CreateDataRoom;
    use dataroom_storage::LocalBlobStore;

    use crate::context::RequestContext;

    /// Extractor that returns canned text, or fails when `text` is None.
    #[derive(Debug)]
    pub struct StubExtractor {
        pub text: Option<String>,
    }

    #[async_trait]
    impl TextExtractor for StubExtractor {
        async fn extract(&self, _data: Bytes) -> AppResult<String> {
            self.text.clone().ok_or_else(|| {
                dataroom_core::error::AppError::storage("extraction unavailable")
            })
        }
    }

    pub struct Env {
        pub store: Arc<MemoryStore>,
        pub blobs: Arc<LocalBlobStore>,
        pub ctx: RequestContext,
        pub room_id: Uuid,
        pub _dir: tempfile::TempDir,
    }

    pub async fn env() -> Env {
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
        Env {
            store,
            blobs,
            ctx,
            room_id: room.id,
            _dir: dir,
        }
    }
}
