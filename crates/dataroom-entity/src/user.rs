//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An authenticated user (OAuth-backed; no local passwords).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Email address (unique).
    pub email: String,
    /// Display name from the identity provider.
    pub name: Option<String>,
    /// OAuth provider name (e.g. `google`).
    pub oauth_provider: String,
    /// Provider-assigned account identifier.
    pub oauth_id: String,
    /// Avatar image URL from the identity provider.
    pub avatar_url: Option<String>,
    /// When the user was first seen.
    pub created_at: DateTime<Utc>,
    /// When the user record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Identity-provider profile used to create or refresh a user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertUser {
    /// OAuth provider name.
    pub oauth_provider: String,
    /// Provider-assigned account identifier.
    pub oauth_id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}
