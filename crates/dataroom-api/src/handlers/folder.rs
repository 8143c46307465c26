//! Folder hierarchy handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use dataroom_service::folder::CreateFolderRequest;

use crate::dto::request::{CreateFolderBody, MoveFolderBody, RenameBody};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateFolderBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let folder = state
        .folder_service
        .create(
            &auth,
            CreateFolderRequest {
                dataroom_id: body.dataroom_id,
                parent_id: body.parent_id,
                name: body.name,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "folder": folder })),
    ))
}

/// GET /api/folders/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state.folder_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "folder": folder })))
}

/// GET /api/folders/{id}/contents
pub async fn contents(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let contents = state.folder_service.contents(&auth, id).await?;
    Ok(Json(serde_json::json!({
        "folder": contents.folder,
        "folders": contents.folders,
        "files": contents.files,
    })))
}

/// PUT /api/folders/{id} — rename.
pub async fn rename(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RenameBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state.folder_service.rename(&auth, id, &body.name).await?;
    Ok(Json(serde_json::json!({ "folder": folder })))
}

/// PUT /api/folders/{id}/move — reparent.
pub async fn move_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<MoveFolderBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state
        .folder_service
        .move_folder(&auth, id, body.parent_id)
        .await?;
    Ok(Json(serde_json::json!({ "folder": folder })))
}

/// DELETE /api/folders/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.folder_service.delete(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Folder and all its contents deleted successfully" }),
    ))
}
