//! Search result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which criterion a search result matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// The display name contained the query.
    Name,
    /// The extracted text content contained the query.
    Content,
}

/// Whether a search result is a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// A file result.
    File,
    /// A folder result.
    Folder,
}

/// Dataroom context attached to every search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRoomContext {
    /// Dataroom ID.
    pub id: Uuid,
    /// Dataroom name.
    pub name: String,
}

/// Folder context attached to file results (containing folder) and
/// folder results (parent folder).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContext {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Full materialized path.
    pub path: String,
}

/// A single merged search result (file or folder).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result kind.
    #[serde(rename = "type")]
    pub kind: ResultKind,
    /// Entity ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Which criteria matched (always `[name]` for folders).
    pub match_type: Vec<MatchReason>,
    /// The dataroom containing this result.
    pub dataroom: DataRoomContext,
    /// Containing folder (file results; None at dataroom root).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderContext>,
    /// Parent folder (folder results; None at dataroom root).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder: Option<FolderContext>,
    /// The folder's own path (folder results only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// File size in bytes (file results only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    /// MIME type (file results only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// When the entity was created.
    pub created_at: DateTime<Utc>,
    /// When the entity was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The complete response for a search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query as searched.
    pub query: String,
    /// Total result count (files + folders).
    pub count: usize,
    /// Number of file results.
    pub files_count: usize,
    /// Number of folder results.
    pub folders_count: usize,
    /// Merged results, sorted case-insensitively by name.
    pub results: Vec<SearchResult>,
}

/// An autocomplete suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// File ID.
    pub id: Uuid,
    /// File display name.
    pub name: String,
}
