//! Ownership checks shared by all services.
//!
//! Every resource is reached through its dataroom: a resource whose
//! room exists but belongs to another user yields an access-denied
//! error, a missing resource yields not-found.

use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_core::result::AppResult;
use dataroom_database::store::{DataRoomStore, FileStore, FolderStore};
use dataroom_entity::dataroom::DataRoom;
use dataroom_entity::file::File;
use dataroom_entity::folder::Folder;

use crate::context::RequestContext;

/// Load a dataroom and verify the caller owns it.
pub(crate) async fn require_owned_room(
    rooms: &dyn DataRoomStore,
    ctx: &RequestContext,
    dataroom_id: Uuid,
) -> AppResult<DataRoom> {
    let room = rooms
        .find_by_id(dataroom_id)
        .await?
        .ok_or_else(|| AppError::not_found("DataRoom not found"))?;

    if room.owner_id != ctx.user_id {
        return Err(AppError::authorization("Access to this dataroom is denied"));
    }

    Ok(room)
}

/// Load a folder together with its (caller-owned) dataroom.
pub(crate) async fn require_owned_folder(
    rooms: &dyn DataRoomStore,
    folders: &dyn FolderStore,
    ctx: &RequestContext,
    folder_id: Uuid,
) -> AppResult<(DataRoom, Folder)> {
    let folder = folders
        .find_by_id(folder_id)
        .await?
        .ok_or_else(|| AppError::not_found("Folder not found"))?;

    let room = require_owned_room(rooms, ctx, folder.dataroom_id).await?;
    Ok((room, folder))
}

/// Load a file together with its (caller-owned) dataroom.
pub(crate) async fn require_owned_file(
    rooms: &dyn DataRoomStore,
    files: &dyn FileStore,
    ctx: &RequestContext,
    file_id: Uuid,
) -> AppResult<(DataRoom, File)> {
    let file = files
        .find_by_id(file_id)
        .await?
        .ok_or_else(|| AppError::not_found("File not found"))?;

    let room = require_owned_room(rooms, ctx, file.dataroom_id).await?;
    Ok((room, file))
}
