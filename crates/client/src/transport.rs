//! Seams between the search coordinator and the network.
//!
//! The coordinator holds these as trait objects so tests can swap in
//! counting or blocking fakes without any HTTP.

use async_trait::async_trait;
use scout_core::download::DownloadLink;
use scout_core::intent::SearchRequest;
use scout_core::wire::RawSearchResponse;

use crate::error::{ClientError, DownloadError};

/// Issues catalog searches.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Run one search.
    ///
    /// The HTTP implementation never returns `Err`; it normalizes failures
    /// into [`RawSearchResponse::empty`]. `Err` is reserved for transports
    /// that cannot do that.
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResponse, ClientError>;
}

/// Obtains a time-limited download link for an asset.
#[async_trait]
pub trait DownloadProxy: Send + Sync {
    async fn request_download(
        &self,
        asset_uuid: &str,
        format: &str,
    ) -> Result<DownloadLink, DownloadError>;
}
