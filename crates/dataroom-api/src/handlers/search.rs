//! Search and autocomplete handlers.

use axum::Json;
use axum::extract::{Query, State};

use dataroom_service::search::SearchParams;

use crate::dto::request::{AutocompleteQuery, SearchQuery};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/search
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let response = state
        .search_service
        .search(
            &auth,
            SearchParams {
                query: query.q,
                dataroom_id: query.dataroom_id,
                search_names: query.search_names,
                search_content: query.search_content,
                case_insensitive: query.case_insensitive,
            },
        )
        .await?;

    Ok(Json(serde_json::json!(response)))
}

/// GET /api/search/autocomplete
pub async fn autocomplete(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let suggestions = state
        .search_service
        .autocomplete(&auth, &query.q, query.dataroom_id)
        .await?;

    Ok(Json(serde_json::json!({ "suggestions": suggestions })))
}
