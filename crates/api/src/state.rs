use std::sync::Arc;

use taleweave_core::images::ImageLayout;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taleweave_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-user image directory layout rooted at `config.media_root`.
    pub images: ImageLayout,
}

impl AppState {
    pub fn new(pool: taleweave_db::DbPool, config: ServerConfig) -> Self {
        let images = ImageLayout::new(config.media_root.clone());
        Self {
            pool,
            config: Arc::new(config),
            images,
        }
    }
}
