//! OAuth login flow and session handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Redirect;
use uuid::Uuid;

use dataroom_core::error::AppError;
use dataroom_entity::user::UpsertUser;

use crate::dto::request::OAuthCallbackQuery;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/auth/login
///
/// Returns the provider authorization URL the frontend should redirect to.
pub async fn login(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.oauth.is_configured() {
        return Err(AppError::configuration("OAuth is not configured").into());
    }

    let auth_url = state.oauth.authorize_url(&Uuid::new_v4().to_string());
    Ok(Json(serde_json::json!({ "auth_url": auth_url })))
}

/// GET /api/auth/callback
///
/// Exchanges the authorization code, upserts the user record, and
/// redirects to the frontend with a freshly minted access token.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<OAuthCallbackQuery>,
) -> Result<Redirect, ApiError> {
    let code = query
        .code
        .ok_or_else(|| AppError::validation("No authorization code provided"))?;

    let profile = state.oauth.exchange_code(&code).await?;

    let user = state
        .users
        .upsert_oauth(&UpsertUser {
            oauth_provider: "google".to_string(),
            oauth_id: profile.provider_id,
            email: profile.email,
            name: profile.name,
            avatar_url: profile.avatar_url,
        })
        .await?;

    let (token, _expires_at) = state
        .jwt_encoder
        .generate_access_token(user.id, &user.email)?;

    tracing::info!(user_id = %user.id, "User logged in via OAuth");

    let redirect_url = format!(
        "{}/auth/callback?token={token}",
        state.config.auth.frontend_url
    );
    Ok(Redirect::to(&redirect_url))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(serde_json::json!({ "user": user })))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logout is a client-side token removal.
pub async fn logout(_auth: AuthUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Logged out successfully" }))
}
