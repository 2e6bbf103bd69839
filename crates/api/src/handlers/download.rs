//! Handlers for the download proxy.
//!
//! The browser-facing half of a download: validate the request, attach the
//! server's credentials, ask the catalog for a link and hand it back.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use scout_core::download::{DownloadLink, DownloadRequest};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub const MISSING_UUID_MESSAGE: &str = "Asset UUID is required";

pub const MISSING_CREDENTIALS_MESSAGE: &str = "API credentials not configured. Please set ICONSCOUT_CLIENT_ID and ICONSCOUT_CLIENT_SECRET environment variables.";

// ---------------------------------------------------------------------------
// POST /api/download/{asset_uuid}
// ---------------------------------------------------------------------------

/// Exchange an asset uuid and format for a time-limited download link.
pub async fn request_download(
    State(state): State<AppState>,
    Path(asset_uuid): Path<String>,
    body: Result<Json<DownloadRequest>, JsonRejection>,
) -> AppResult<Json<DownloadLink>> {
    let asset_uuid = asset_uuid.trim();
    if asset_uuid.is_empty() {
        return Err(AppError::BadRequest(MISSING_UUID_MESSAGE.to_string()));
    }

    let Json(request) = body?;
    request.validate()?;

    let credentials = state
        .config
        .upstream
        .credentials()
        .ok_or_else(|| AppError::Configuration(MISSING_CREDENTIALS_MESSAGE.to_string()))?;

    tracing::info!(asset_uuid, format = %request.format, "Requesting download link");
    let upstream = state
        .downloads
        .request_download(&credentials, asset_uuid, &request.format)
        .await?;

    Ok(Json(DownloadLink {
        success: true,
        download_url: upstream.download_url,
        expires_at: upstream.expires_at,
        asset_uuid: asset_uuid.to_string(),
        format: request.format,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/download
// ---------------------------------------------------------------------------

/// The path parameter is missing entirely.
pub async fn missing_asset_uuid() -> AppError {
    AppError::BadRequest(MISSING_UUID_MESSAGE.to_string())
}
