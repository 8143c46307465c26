//! DataRoom entity model — the top-level document container.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A data room: a named grouping of folders and files owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DataRoom {
    /// Unique dataroom identifier.
    pub id: Uuid,
    /// Dataroom name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The owning user.
    pub owner_id: Uuid,
    /// When the dataroom was created.
    pub created_at: DateTime<Utc>,
    /// When the dataroom was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new dataroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDataRoom {
    /// Dataroom name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// The owning user.
    pub owner_id: Uuid,
}

/// Aggregate counts for a dataroom.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DataRoomStats {
    /// Total folders in the dataroom.
    pub total_folders: u64,
    /// Total files in the dataroom.
    pub total_files: u64,
}
