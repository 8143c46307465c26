//! Folder tree structures for the full dataroom structure view.

use serde::{Deserialize, Serialize};

use crate::file::File;

use super::model::Folder;

/// A folder with its nested children and direct files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// The folder itself.
    #[serde(flatten)]
    pub folder: Folder,
    /// Child folder nodes, name-ordered.
    pub children: Vec<FolderNode>,
    /// Files directly inside this folder, name-ordered.
    pub files: Vec<File>,
}

/// The complete recursive structure of a dataroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRoomStructure {
    /// Root-level folder trees, name-ordered.
    pub structure: Vec<FolderNode>,
    /// Files at the dataroom root (no folder), name-ordered.
    pub root_files: Vec<File>,
}
