//! File upload, metadata, and download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_service::file::UploadParams;

use crate::dto::request::{MoveFileBody, RenameBody};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files — multipart upload.
///
/// Expects a `file` part plus `dataroom_id` and optional `folder_id`
/// form fields.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let mut dataroom_id: Option<Uuid> = None;
    let mut folder_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "dataroom_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                dataroom_id = Some(
                    Uuid::parse_str(&text)
                        .map_err(|_| AppError::validation("Invalid dataroom_id"))?,
                );
            }
            "folder_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                if !text.is_empty() {
                    folder_id = Some(
                        Uuid::parse_str(&text)
                            .map_err(|_| AppError::validation("Invalid folder_id"))?,
                    );
                }
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let dataroom_id =
        dataroom_id.ok_or_else(|| AppError::validation("dataroom_id is required"))?;
    let file_name = file_name.ok_or_else(|| AppError::validation("No file provided"))?;
    let data = data.ok_or_else(|| AppError::validation("No file provided"))?;

    let file = state
        .upload_service
        .upload(
            &auth,
            UploadParams {
                dataroom_id,
                folder_id,
                file_name,
                data,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "file": file })),
    ))
}

/// GET /api/files/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let file = state.file_service.get(&auth, id).await?;
    Ok(Json(serde_json::json!({ "file": file })))
}

/// GET /api/files/{id}/download — streams the blob as an attachment.
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let (file, stream) = state.download_service.download(&auth, id).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.mime_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.name),
        )
        .header(header::CONTENT_LENGTH, file.size_bytes)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// PUT /api/files/{id} — rename.
pub async fn rename(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<RenameBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let file = state.file_service.rename(&auth, id, &body.name).await?;
    Ok(Json(serde_json::json!({ "file": file })))
}

/// PUT /api/files/{id}/move — relocate to another folder.
pub async fn move_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<MoveFileBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let file = state
        .file_service
        .move_file(&auth, id, body.folder_id)
        .await?;
    Ok(Json(serde_json::json!({ "file": file })))
}

/// DELETE /api/files/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.file_service.delete(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "message": "File deleted successfully" }),
    ))
}
