//! Request body and query-string DTOs.

use serde::Deserialize;
use uuid::Uuid;

/// Body for dataroom create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct DataRoomBody {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body for folder creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFolderBody {
    /// Folder name.
    pub name: String,
    /// The dataroom the folder belongs to.
    pub dataroom_id: Uuid,
    /// Parent folder (absent or null for root level).
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Body for folder and file rename.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameBody {
    /// New display name.
    pub name: String,
}

/// Body for moving a folder to a new parent.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveFolderBody {
    /// New parent (absent or null moves to the dataroom root).
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Body for moving a file to a different folder.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveFileBody {
    /// Target folder (absent or null moves to the dataroom root).
    #[serde(default)]
    pub folder_id: Option<Uuid>,
}

/// Query string for the OAuth callback.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthCallbackQuery {
    /// Authorization code returned by the provider.
    #[serde(default)]
    pub code: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Query string for search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// The substring to search for.
    #[serde(default)]
    pub q: String,
    /// Restrict to one dataroom.
    #[serde(default)]
    pub dataroom_id: Option<Uuid>,
    /// Match against display names (default true).
    #[serde(default = "default_true")]
    pub search_names: bool,
    /// Match against extracted content (default true).
    #[serde(default = "default_true")]
    pub search_content: bool,
    /// Case-insensitive matching (default true).
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
}

/// Query string for autocomplete.
#[derive(Debug, Clone, Deserialize)]
pub struct AutocompleteQuery {
    /// Name prefix or fragment.
    #[serde(default)]
    pub q: String,
    /// Restrict to one dataroom.
    #[serde(default)]
    pub dataroom_id: Option<Uuid>,
}
