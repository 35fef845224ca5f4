//! Liveness endpoint mounted at the root, outside `/api/v1`.
//!
//! Finalization copies images under the media root, so the endpoint reports
//! the root's presence alongside database reachability.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is usable, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub media_ready: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = taleweave_db::health_check(&state.pool).await.is_ok();
    let media_ready = tokio::fs::metadata(state.images.media_root())
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if !media_ready {
        tracing::warn!(
            media_root = %state.images.media_root().display(),
            "Media root is missing or not a directory",
        );
    }

    Json(HealthResponse {
        status: if db_healthy && media_ready {
            "ok"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        media_ready,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
