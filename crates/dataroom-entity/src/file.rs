//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An uploaded document stored in a dataroom.
///
/// `name` is the display name, unique among siblings; `original_name`
/// preserves the literal uploaded filename; `storage_path` is the opaque
/// blob locator, decoupled from both.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Display name (including extension).
    pub name: String,
    /// Filename as originally uploaded.
    pub original_name: String,
    /// The containing folder (None for dataroom root).
    pub folder_id: Option<Uuid>,
    /// The dataroom this file belongs to.
    pub dataroom_id: Uuid,
    /// Opaque blob locator within the blob store.
    pub storage_path: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type (always `application/pdf` in this domain).
    pub mime_type: String,
    /// Extracted text content used for search.
    #[serde(skip_serializing)]
    pub content_text: Option<String>,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Display name (post collision resolution).
    pub name: String,
    /// Filename as originally uploaded.
    pub original_name: String,
    /// The containing folder (None for dataroom root).
    pub folder_id: Option<Uuid>,
    /// The dataroom.
    pub dataroom_id: Uuid,
    /// Opaque blob locator.
    pub storage_path: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: String,
    /// Extracted text content.
    pub content_text: Option<String>,
}
