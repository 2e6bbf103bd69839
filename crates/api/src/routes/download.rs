use axum::routing::post;
use axum::Router;

use crate::handlers::download;
use crate::state::AppState;

/// Download proxy routes.
///
/// ```text
/// POST   /                  -> missing_asset_uuid
/// POST   /{asset_uuid}      -> request_download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(download::missing_asset_uuid))
        .route("/{asset_uuid}", post(download::request_download))
}
