pub mod download;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /download                        POST (400, uuid missing)
/// /download/{asset_uuid}           POST
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/download", download::router())
}
