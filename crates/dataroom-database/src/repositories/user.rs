//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use dataroom_core::error::{AppError, ErrorKind};
use dataroom_core::result::AppResult;
use dataroom_entity::user::{UpsertUser, User};

use crate::store::UserStore;

/// Repository for user lookup and OAuth upsert.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    async fn find_by_oauth(&self, provider: &str, oauth_id: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE oauth_provider = $1 AND oauth_id = $2",
        )
        .bind(provider)
        .bind(oauth_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by OAuth identity", e)
        })
    }

    async fn upsert_oauth(&self, profile: &UpsertUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, oauth_provider, oauth_id, avatar_url) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (oauth_provider, oauth_id) DO UPDATE SET \
                email = EXCLUDED.email, \
                name = EXCLUDED.name, \
                avatar_url = EXCLUDED.avatar_url, \
                updated_at = NOW() \
             RETURNING *",
        )
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.oauth_provider)
        .bind(&profile.oauth_id)
        .bind(&profile.avatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict(format!(
                    "Email '{}' is already registered with another identity",
                    profile.email
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to upsert user", e),
        })
    }
}
