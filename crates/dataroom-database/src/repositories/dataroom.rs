//! DataRoom repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::dataroom::{CreateDataRoom, DataRoom, DataRoomStats};

use crate::store::DataRoomStore;

/// Repository for dataroom CRUD and stats.
#[derive(Debug, Clone)]
pub struct DataRoomRepository {
    pool: PgPool,
}

impl DataRoomRepository {
    /// Create a new dataroom repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataRoomStore for DataRoomRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DataRoom>> {
        sqlx::query_as::<_, DataRoom>("SELECT * FROM datarooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find dataroom", e))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<DataRoom>> {
        sqlx::query_as::<_, DataRoom>(
            "SELECT * FROM datarooms WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list datarooms", e))
    }

    async fn create(&self, data: &CreateDataRoom) -> AppResult<DataRoom> {
        sqlx::query_as::<_, DataRoom>(
            "INSERT INTO datarooms (name, description, owner_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create dataroom", e))
    }

    async fn update(&self, room: &DataRoom) -> AppResult<DataRoom> {
        sqlx::query_as::<_, DataRoom>(
            "UPDATE datarooms SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(room.id)
        .bind(&room.name)
        .bind(&room.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update dataroom", e))?
        .ok_or_else(|| AppError::not_found(format!("Dataroom {} not found", room.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM datarooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete dataroom", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self, id: Uuid) -> AppResult<DataRoomStats> {
        let total_folders: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM folders WHERE dataroom_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count folders", e)
                })?;

        let total_files: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE dataroom_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count files", e)
                })?;

        Ok(DataRoomStats {
            total_folders: total_folders as u64,
            total_files: total_files as u64,
        })
    }
}
