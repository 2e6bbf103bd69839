//! Server-side client for the catalog's download endpoint.
//!
//! Holds no credentials itself; the proxy passes them per call so a missing
//! secret is reported per request rather than at startup.

use reqwest::StatusCode;
use scout_core::download::{DownloadRequest, UpstreamDownload};

use crate::error::{ClientError, UpstreamError};
use crate::headers::api_headers;
use crate::{endpoint, parse_base_url};

/// Client id and secret for privileged catalog calls.
#[derive(Clone)]
pub struct ApiCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// HTTP client for `POST {api_url}/items/{uuid}/api-download`.
#[derive(Debug, Clone)]
pub struct DownloadClient {
    client: reqwest::Client,
    api_url: reqwest::Url,
}

impl DownloadClient {
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: reqwest::Client::new(),
            api_url: parse_base_url(api_url)?,
        })
    }

    /// Ask the catalog for a download link.
    ///
    /// 401, 404 and 429 map to dedicated variants; any other non-2xx status
    /// becomes [`UpstreamError::Status`] with the canonical reason phrase.
    pub async fn request_download(
        &self,
        credentials: &ApiCredentials,
        asset_uuid: &str,
        format: &str,
    ) -> Result<UpstreamDownload, UpstreamError> {
        let url = endpoint(&self.api_url, &["items", asset_uuid, "api-download"])?;
        let headers = api_headers(&credentials.client_id, Some(&credentials.client_secret))?;
        let body = DownloadRequest {
            format: format.to_string(),
        };

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(asset_uuid, status = status.as_u16(), "Catalog rejected download request");
            return Err(classify_status(status));
        }

        Ok(response.json::<UpstreamDownload>().await?)
    }
}

fn classify_status(status: StatusCode) -> UpstreamError {
    match status {
        StatusCode::UNAUTHORIZED => UpstreamError::Unauthorized,
        StatusCode::NOT_FOUND => UpstreamError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited,
        other => UpstreamError::Status {
            status: other.as_u16(),
            reason: other.canonical_reason().unwrap_or("Unknown status").to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn classifies_known_statuses() {
        assert_matches!(classify_status(StatusCode::UNAUTHORIZED), UpstreamError::Unauthorized);
        assert_matches!(classify_status(StatusCode::NOT_FOUND), UpstreamError::NotFound);
        assert_matches!(classify_status(StatusCode::TOO_MANY_REQUESTS), UpstreamError::RateLimited);
        assert_matches!(
            classify_status(StatusCode::BAD_GATEWAY),
            UpstreamError::Status { status: 502, ref reason } if reason == "Bad Gateway"
        );
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = ApiCredentials {
            client_id: "id".into(),
            client_secret: "hunter2".into(),
        };
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
