//! Application builder — wires stores, services, and the router, then
//! serves HTTP with graceful shutdown.

use std::sync::Arc;

use tracing::info;

use dataroom_auth::jwt::decoder::JwtDecoder;
use dataroom_auth::jwt::encoder::JwtEncoder;
use dataroom_auth::oauth::google::GoogleOAuthClient;
use dataroom_core::config::AppConfig;
use dataroom_core::error::AppError;
use dataroom_core::traits::blob::BlobStore;
use dataroom_core::traits::extract::TextExtractor;
use dataroom_database::DatabasePool;
use dataroom_database::repositories::{
    DataRoomRepository, FileRepository, FolderRepository, UserRepository,
};
use dataroom_database::store::{DataRoomStore, FileStore, FolderStore, UserStore};
use dataroom_service::dataroom::DataRoomService;
use dataroom_service::file::{DownloadService, FileService, UploadService};
use dataroom_service::folder::{FolderService, TreeService};
use dataroom_service::search::SearchService;
use dataroom_storage::{LocalBlobStore, PdfTextExtractor};

use crate::router::build_router;
use crate::state::AppState;

/// Runs the DataRoom server with the given configuration and pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let blobs: Arc<dyn BlobStore> =
        Arc::new(LocalBlobStore::new(&config.storage.upload_root).await?);
    let extractor: Arc<dyn TextExtractor> = Arc::new(PdfTextExtractor::new());

    let pool = db.pool().clone();
    let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.clone()));
    let rooms: Arc<dyn DataRoomStore> = Arc::new(DataRoomRepository::new(pool.clone()));
    let folders: Arc<dyn FolderStore> = Arc::new(FolderRepository::new(pool.clone()));
    let files: Arc<dyn FileStore> = Arc::new(FileRepository::new(pool));

    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let oauth = Arc::new(GoogleOAuthClient::new(config.auth.google.clone()));

    let dataroom_service = Arc::new(DataRoomService::new(
        Arc::clone(&rooms),
        Arc::clone(&blobs),
    ));
    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&rooms),
        Arc::clone(&folders),
        Arc::clone(&files),
        Arc::clone(&blobs),
    ));
    let tree_service = Arc::new(TreeService::new(
        Arc::clone(&rooms),
        Arc::clone(&folders),
        Arc::clone(&files),
    ));
    let file_service = Arc::new(FileService::new(
        Arc::clone(&rooms),
        Arc::clone(&folders),
        Arc::clone(&files),
        Arc::clone(&blobs),
    ));
    let upload_service = Arc::new(UploadService::new(
        Arc::clone(&rooms),
        Arc::clone(&folders),
        Arc::clone(&files),
        Arc::clone(&blobs),
        Arc::clone(&extractor),
        config.storage.clone(),
    ));
    let download_service = Arc::new(DownloadService::new(
        Arc::clone(&rooms),
        Arc::clone(&files),
        Arc::clone(&blobs),
    ));
    let search_service = Arc::new(SearchService::new(
        Arc::clone(&rooms),
        Arc::clone(&folders),
        Arc::clone(&files),
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        jwt_encoder,
        jwt_decoder,
        oauth,
        users,
        dataroom_service,
        folder_service,
        tree_service,
        file_service,
        upload_service,
        download_service,
        search_service,
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("DataRoom server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
