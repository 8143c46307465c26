//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::folder::{CreateFolder, Folder};

use crate::repositories::escape_like;
use crate::store::FolderStore;

/// Repository for folder CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_roots(&self, dataroom_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE dataroom_id = $1 AND parent_id IS NULL ORDER BY name ASC",
        )
        .bind(dataroom_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list root folders", e))
    }

    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_id = $1 ORDER BY name ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn find_sibling(
        &self,
        dataroom_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<Folder>> {
        // IS NOT DISTINCT FROM makes the root (NULL parent) a single
        // matching sibling scope.
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE dataroom_id = $1 AND parent_id IS NOT DISTINCT FROM $2 AND name = $3",
        )
        .bind(dataroom_id)
        .bind(parent_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find sibling folder", e))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, parent_id, dataroom_id, path) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.dataroom_id)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("unique_folder_per_parent") =>
            {
                AppError::conflict(format!(
                    "Folder '{}' already exists in this location",
                    data.name
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, parent_id = $3, path = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(folder.id)
        .bind(&folder.name)
        .bind(folder.parent_id)
        .bind(&folder.path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("unique_folder_per_parent") =>
            {
                AppError::conflict(format!(
                    "Folder '{}' already exists in this location",
                    folder.name
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update folder", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_by_name(
        &self,
        owner_id: Uuid,
        query: &str,
        dataroom_id: Option<Uuid>,
        case_insensitive: bool,
        limit: i64,
    ) -> AppResult<Vec<Folder>> {
        let op = if case_insensitive { "ILIKE" } else { "LIKE" };
        let sql = format!(
            "SELECT f.* FROM folders f \
             JOIN datarooms d ON f.dataroom_id = d.id \
             WHERE d.owner_id = $1 \
               AND ($2::uuid IS NULL OR f.dataroom_id = $2) \
               AND f.name {op} $3 \
             ORDER BY f.name ASC LIMIT $4"
        );

        sqlx::query_as::<_, Folder>(&sql)
            .bind(owner_id)
            .bind(dataroom_id)
            .bind(format!("%{}%", escape_like(query)))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search folders", e))
    }
}
