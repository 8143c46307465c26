//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// GET /health
///
/// Reports service liveness plus a live database round-trip, so a
/// stale pool shows up as degraded rather than healthy.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database_ok = state.db.health_check().await.unwrap_or(false);
    Json(health_body(database_ok))
}

fn health_body(database_ok: bool) -> serde_json::Value {
    serde_json::json!({
        "status": if database_ok { "ok" } else { "degraded" },
        "service": "dataroom",
        "version": env!("CARGO_PKG_VERSION"),
        "database": if database_ok { "connected" } else { "unavailable" },
    })
}
