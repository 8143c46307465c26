//! Dataroom CRUD operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_core::traits::blob::BlobStore;
use dataroom_database::store::DataRoomStore;
use dataroom_entity::dataroom::{CreateDataRoom, DataRoom, DataRoomStats};

use crate::access::require_owned_room;
use crate::context::RequestContext;
use crate::naming::validate_name;

/// Manages dataroom CRUD operations.
#[derive(Clone)]
pub struct DataRoomService {
    /// Dataroom store.
    rooms: Arc<dyn DataRoomStore>,
    /// Blob store, for purging a room's namespace on delete.
    blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for DataRoomService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataRoomService").finish()
    }
}

/// Request to create or update a dataroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRoomRequest {
    /// Dataroom name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// A dataroom together with its folder/file counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRoomDetails {
    /// The dataroom.
    #[serde(flatten)]
    pub dataroom: DataRoom,
    /// Aggregate counts.
    pub stats: DataRoomStats,
}

impl DataRoomService {
    /// Creates a new dataroom service.
    pub fn new(rooms: Arc<dyn DataRoomStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { rooms, blobs }
    }

    /// Lists the caller's datarooms, most recently created first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<DataRoom>> {
        self.rooms.list_by_owner(ctx.user_id).await
    }

    /// Creates a new dataroom owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: DataRoomRequest,
    ) -> AppResult<DataRoom> {
        let name = validate_name(&req.name)?;

        let room = self
            .rooms
            .create(&CreateDataRoom {
                name,
                description: req.description,
                owner_id: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, dataroom_id = %room.id, "DataRoom created");
        Ok(room)
    }

    /// Gets a dataroom with its folder/file counts.
    pub async fn get(&self, ctx: &RequestContext, dataroom_id: Uuid) -> AppResult<DataRoomDetails> {
        let room = require_owned_room(self.rooms.as_ref(), ctx, dataroom_id).await?;
        let stats = self.rooms.stats(dataroom_id).await?;
        Ok(DataRoomDetails {
            dataroom: room,
            stats,
        })
    }

    /// Updates a dataroom's name and description.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        dataroom_id: Uuid,
        req: DataRoomRequest,
    ) -> AppResult<DataRoom> {
        let mut room = require_owned_room(self.rooms.as_ref(), ctx, dataroom_id).await?;
        room.name = validate_name(&req.name)?;
        room.description = req.description;
        self.rooms.update(&room).await
    }

    /// Deletes a dataroom and everything in it.
    ///
    /// The room's blob namespace is purged first, best-effort; the record
    /// delete then cascades to every folder and file row.
    pub async fn delete(&self, ctx: &RequestContext, dataroom_id: Uuid) -> AppResult<()> {
        let room = require_owned_room(self.rooms.as_ref(), ctx, dataroom_id).await?;

        if let Err(e) = self.blobs.delete_namespace(&room.id.to_string()).await {
            warn!(dataroom_id = %room.id, error = %e, "Failed to purge dataroom blobs");
        }

        let deleted = self.rooms.delete(dataroom_id).await?;
        if !deleted {
            return Err(AppError::not_found("DataRoom not found"));
        }

        info!(user_id = %ctx.user_id, dataroom_id = %dataroom_id, "DataRoom deleted");
        Ok(())
    }
}
