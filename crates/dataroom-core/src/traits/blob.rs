//! Blob store trait for durable byte storage of uploaded documents.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use uuid::Uuid;

use crate::result::AppResult;

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Allocate an opaque blob locator for a new upload.
///
/// The dataroom ID namespaces the blob so a whole dataroom can be
/// purged with one [`BlobStore::delete_namespace`] call. The random
/// UUID keeps the locator independent of the display name, so renames
/// and name collisions never touch the stored bytes.
pub fn allocate_locator(dataroom_id: Uuid, extension: &str) -> String {
    format!("{dataroom_id}/{}.{extension}", Uuid::new_v4())
}

/// Trait for durable blob storage.
///
/// Blobs are addressed by an opaque locator string allocated at write
/// time (e.g. `{dataroom_id}/{uuid}.pdf`). The locator is decoupled from
/// any display name, so display-name collisions can never collide on
/// disk. The trait is defined here in `dataroom-core` and implemented in
/// `dataroom-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Write blob bytes at the given locator.
    async fn write(&self, locator: &str, data: Bytes) -> AppResult<()>;

    /// Read a blob into memory as a complete byte vector.
    ///
    /// Returns a `NotFound` error if no blob exists at the locator.
    async fn read_bytes(&self, locator: &str) -> AppResult<Bytes>;

    /// Read a blob as a byte stream.
    async fn read(&self, locator: &str) -> AppResult<ByteStream>;

    /// Delete the blob at the given locator. Absent blobs are not an error.
    async fn delete(&self, locator: &str) -> AppResult<()>;

    /// Delete an entire locator namespace (e.g. a dataroom's directory).
    async fn delete_namespace(&self, namespace: &str) -> AppResult<()>;

    /// Check whether a blob exists at the given locator.
    async fn exists(&self, locator: &str) -> AppResult<bool>;
}
