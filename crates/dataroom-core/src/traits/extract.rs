//! Text extraction trait for uploaded documents.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Extracts searchable text from an uploaded document.
///
/// Callers treat extraction as best-effort: a failure is logged and the
/// document is stored without content text, never failing the upload.
#[async_trait]
pub trait TextExtractor: Send + Sync + std::fmt::Debug + 'static {
    /// Extract plain text from the document bytes.
    async fn extract(&self, data: Bytes) -> AppResult<String>;
}
