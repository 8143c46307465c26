//! Local filesystem blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_core::traits::blob::{BlobStore, ByteStream};

/// Blob store backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a new blob store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a locator to an absolute path within the root.
    fn resolve(&self, locator: &str) -> PathBuf {
        let clean = locator.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn write(&self, locator: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(locator);
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob: {locator}"),
                e,
            )
        })?;

        debug!(locator, bytes = data.len(), "Wrote blob");
        Ok(())
    }

    async fn read_bytes(&self, locator: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(locator);
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {locator}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read blob: {locator}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn read(&self, locator: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(locator);
        let file = fs::File::open(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {locator}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open blob: {locator}"),
                    e,
                )
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(|b| b.into()))))
    }

    async fn delete(&self, locator: &str) -> AppResult<()> {
        let full_path = self.resolve(locator);
        if full_path.exists() {
            fs::remove_file(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete blob: {locator}"),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn delete_namespace(&self, namespace: &str) -> AppResult<()> {
        let full_path = self.resolve(namespace);
        if full_path.exists() {
            fs::remove_dir_all(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete namespace: {namespace}"),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn exists(&self, locator: &str) -> AppResult<bool> {
        Ok(self.resolve(locator).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataroom_core::traits::blob::allocate_locator;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_write_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let locator = allocate_locator(Uuid::new_v4(), "pdf");
        let data = Bytes::from_static(b"%PDF-1.4 hello");
        store.write(&locator, data.clone()).await.unwrap();

        assert!(store.exists(&locator).await.unwrap());
        assert_eq!(store.read_bytes(&locator).await.unwrap(), data);

        store.delete(&locator).await.unwrap();
        assert!(!store.exists(&locator).await.unwrap());
    }

    #[tokio::test]
    async fn test_read_missing_blob_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let err = store.read_bytes("missing/blob.pdf").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        store.delete("never/existed.pdf").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_namespace_removes_all_blobs() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let room = Uuid::new_v4();
        let a = allocate_locator(room, "pdf");
        let b = allocate_locator(room, "pdf");
        store.write(&a, Bytes::from_static(b"a")).await.unwrap();
        store.write(&b, Bytes::from_static(b"b")).await.unwrap();

        store.delete_namespace(&room.to_string()).await.unwrap();
        assert!(!store.exists(&a).await.unwrap());
        assert!(!store.exists(&b).await.unwrap());
    }

    #[test]
    fn test_locator_shape() {
        let room = Uuid::new_v4();
        let locator = allocate_locator(room, "pdf");
        assert!(locator.starts_with(&format!("{room}/")));
        assert!(locator.ends_with(".pdf"));
    }
}
