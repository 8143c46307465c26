//! Application state shared across all handlers.

use std::sync::Arc;

use dataroom_auth::jwt::decoder::JwtDecoder;
use dataroom_auth::jwt::encoder::JwtEncoder;
use dataroom_auth::oauth::google::GoogleOAuthClient;
use dataroom_core::config::AppConfig;
use dataroom_database::DatabasePool;
use dataroom_database::store::UserStore;
use dataroom_service::dataroom::DataRoomService;
use dataroom_service::file::{DownloadService, FileService, UploadService};
use dataroom_service::folder::{FolderService, TreeService};
use dataroom_service::search::SearchService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool, exposed for connectivity checks.
    pub db: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Google OAuth client.
    pub oauth: Arc<GoogleOAuthClient>,
    /// User store for OAuth upsert and profile lookup.
    pub users: Arc<dyn UserStore>,

    // ── Services ─────────────────────────────────────────────
    /// Dataroom CRUD service.
    pub dataroom_service: Arc<DataRoomService>,
    /// Folder hierarchy service.
    pub folder_service: Arc<FolderService>,
    /// Full dataroom structure service.
    pub tree_service: Arc<TreeService>,
    /// File metadata service.
    pub file_service: Arc<FileService>,
    /// Upload service.
    pub upload_service: Arc<UploadService>,
    /// Download service.
    pub download_service: Arc<DownloadService>,
    /// Search and autocomplete service.
    pub search_service: Arc<SearchService>,
}
