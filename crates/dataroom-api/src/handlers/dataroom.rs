//! Dataroom CRUD and structure handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use dataroom_service::dataroom::DataRoomRequest;

use crate::dto::request::DataRoomBody;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/datarooms
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let datarooms = state.dataroom_service.list(&auth).await?;
    Ok(Json(serde_json::json!({ "datarooms": datarooms })))
}

/// POST /api/datarooms
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<DataRoomBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let dataroom = state
        .dataroom_service
        .create(
            &auth,
            DataRoomRequest {
                name: body.name,
                description: body.description,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "dataroom": dataroom })),
    ))
}

/// GET /api/datarooms/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let dataroom = state.dataroom_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "dataroom": dataroom })))
}

/// PUT /api/datarooms/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<DataRoomBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let dataroom = state
        .dataroom_service
        .update(
            &auth,
            id,
            DataRoomRequest {
                name: body.name,
                description: body.description,
            },
        )
        .await?;

    Ok(Json(serde_json::json!({ "dataroom": dataroom })))
}

/// DELETE /api/datarooms/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.dataroom_service.delete(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Dataroom deleted successfully" }),
    ))
}

/// GET /api/datarooms/{id}/structure
pub async fn structure(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let dataroom = state.dataroom_service.get(&auth, id).await?;
    let tree = state.tree_service.structure(&auth, id).await?;

    Ok(Json(serde_json::json!({
        "dataroom": dataroom,
        "structure": tree.structure,
        "root_files": tree.root_files,
    })))
}
