//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a dataroom's hierarchy.
///
/// `path` is the materialized full path (`/parent/child`), maintained on
/// every create, rename, and move so reads never walk ancestors.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name. Unique among siblings within the same parent.
    pub name: String,
    /// Parent folder ID (None for root-level folders).
    pub parent_id: Option<Uuid>,
    /// The dataroom this folder belongs to.
    pub dataroom_id: Uuid,
    /// Full materialized path (e.g. `/contracts/2024`).
    pub path: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for root-level).
    pub parent_id: Option<Uuid>,
    /// The dataroom.
    pub dataroom_id: Uuid,
    /// Full materialized path.
    pub path: String,
}
