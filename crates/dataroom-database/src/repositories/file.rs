//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::file::{CreateFile, File};

use crate::repositories::escape_like;
use crate::store::FileStore;

/// Repository for file CRUD and search queries.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_by_folder(
        &self,
        dataroom_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files \
             WHERE dataroom_id = $1 AND folder_id IS NOT DISTINCT FROM $2 \
             ORDER BY name ASC",
        )
        .bind(dataroom_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn find_sibling(
        &self,
        dataroom_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files \
             WHERE dataroom_id = $1 AND folder_id IS NOT DISTINCT FROM $2 AND name = $3",
        )
        .bind(dataroom_id)
        .bind(folder_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find sibling file", e))
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files \
             (name, original_name, folder_id, dataroom_id, storage_path, size_bytes, mime_type, content_text) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.original_name)
        .bind(data.folder_id)
        .bind(data.dataroom_id)
        .bind(&data.storage_path)
        .bind(data.size_bytes)
        .bind(&data.mime_type)
        .bind(&data.content_text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("unique_file_per_folder") =>
            {
                AppError::conflict(format!(
                    "File '{}' already exists in this location",
                    data.name
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file", e),
        })
    }

    async fn update(&self, file: &File) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET name = $2, folder_id = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(file.id)
        .bind(&file.name)
        .bind(file.folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("unique_file_per_folder") =>
            {
                AppError::conflict(format!(
                    "File '{}' already exists in this location",
                    file.name
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update file", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("File {} not found", file.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(
        &self,
        owner_id: Uuid,
        query: &str,
        dataroom_id: Option<Uuid>,
        search_names: bool,
        search_content: bool,
        case_insensitive: bool,
        limit: i64,
    ) -> AppResult<Vec<File>> {
        if !search_names && !search_content {
            return Ok(Vec::new());
        }

        let op = if case_insensitive { "ILIKE" } else { "LIKE" };
        let mut conditions = Vec::new();
        if search_names {
            conditions.push(format!("f.name {op} $3"));
        }
        if search_content {
            conditions.push(format!("f.content_text {op} $3"));
        }
        let matched = conditions.join(" OR ");

        let sql = format!(
            "SELECT f.* FROM files f \
             JOIN datarooms d ON f.dataroom_id = d.id \
             WHERE d.owner_id = $1 \
               AND ($2::uuid IS NULL OR f.dataroom_id = $2) \
               AND ({matched}) \
             ORDER BY f.name ASC LIMIT $4"
        );

        sqlx::query_as::<_, File>(&sql)
            .bind(owner_id)
            .bind(dataroom_id)
            .bind(format!("%{}%", escape_like(query)))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search files", e))
    }

    async fn suggest(
        &self,
        owner_id: Uuid,
        query: &str,
        dataroom_id: Option<Uuid>,
        limit: i64,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT f.* FROM files f \
             JOIN datarooms d ON f.dataroom_id = d.id \
             WHERE d.owner_id = $1 \
               AND ($2::uuid IS NULL OR f.dataroom_id = $2) \
               AND f.name ILIKE $3 \
             ORDER BY f.name ASC LIMIT $4",
        )
        .bind(owner_id)
        .bind(dataroom_id)
        .bind(format!("%{}%", escape_like(query)))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load suggestions", e))
    }
}
