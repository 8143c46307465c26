//! # dataroom-api
//!
//! HTTP API layer for the DataRoom backend built on Axum.
//!
//! Provides all REST endpoints, the bearer-token extractor, DTOs,
//! CORS/trace middleware, and the `AppError` → HTTP response mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::run_server;
pub use error::ApiError;
pub use state::AppState;
