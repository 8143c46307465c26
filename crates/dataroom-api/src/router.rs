//! Route definitions for the DataRoom HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use dataroom_core::config::CorsConfig;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;
    let cors = build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(dataroom_routes())
        .merge(folder_routes())
        .merge(file_routes())
        .merge(search_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health_check))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: login, callback, me, logout.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(handlers::auth::login))
        .route("/auth/callback", get(handlers::auth::callback))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/logout", post(handlers::auth::logout))
}

/// Dataroom CRUD and full structure.
fn dataroom_routes() -> Router<AppState> {
    Router::new()
        .route("/datarooms", get(handlers::dataroom::list))
        .route("/datarooms", post(handlers::dataroom::create))
        .route("/datarooms/{id}", get(handlers::dataroom::get))
        .route("/datarooms/{id}", put(handlers::dataroom::update))
        .route("/datarooms/{id}", delete(handlers::dataroom::delete))
        .route(
            "/datarooms/{id}/structure",
            get(handlers::dataroom::structure),
        )
}

/// Folder CRUD, contents, move.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create))
        .route("/folders/{id}", get(handlers::folder::get))
        .route("/folders/{id}", put(handlers::folder::rename))
        .route("/folders/{id}", delete(handlers::folder::delete))
        .route("/folders/{id}/contents", get(handlers::folder::contents))
        .route("/folders/{id}/move", put(handlers::folder::move_folder))
}

/// File upload, metadata, download, move.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(handlers::file::upload))
        .route("/files/{id}", get(handlers::file::get))
        .route("/files/{id}", put(handlers::file::rename))
        .route("/files/{id}", delete(handlers::file::delete))
        .route("/files/{id}/download", get(handlers::file::download))
        .route("/files/{id}/move", put(handlers::file::move_file))
}

/// Search and autocomplete.
fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(handlers::search::search))
        .route("/search/autocomplete", get(handlers::search::autocomplete))
}

/// Build a CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let mut cors = CorsLayer::new();

    if config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<axum::http::HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors.max_age(std::time::Duration::from_secs(config.max_age_seconds))
}
