use std::sync::Arc;

use scout_client::upstream::DownloadClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Catalog client for download requests.
    pub downloads: Arc<DownloadClient>,
}
