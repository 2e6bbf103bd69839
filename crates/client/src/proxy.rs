//! Front-end client for the download proxy.

use async_trait::async_trait;
use scout_core::download::{DownloadLink, DownloadRequest};
use serde::Deserialize;

use crate::error::{ClientError, DownloadError};
use crate::transport::DownloadProxy;
use crate::{endpoint, parse_base_url};

/// Error body produced by the proxy: `{ "error": ..., "code": ... }`.
#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: String,
}

/// Calls `POST {proxy_url}/api/download/{uuid}`.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    proxy_url: reqwest::Url,
}

impl ProxyClient {
    pub fn new(proxy_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: reqwest::Client::new(),
            proxy_url: parse_base_url(proxy_url)?,
        })
    }
}

#[async_trait]
impl DownloadProxy for ProxyClient {
    async fn request_download(
        &self,
        asset_uuid: &str,
        format: &str,
    ) -> Result<DownloadLink, DownloadError> {
        let url = endpoint(&self.proxy_url, &["api", "download", asset_uuid])?;
        let body = DownloadRequest {
            format: format.to_string(),
        };

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ProxyErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("Download failed: HTTP {}", status.as_u16()),
            };
            return Err(DownloadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let link = response.json::<DownloadLink>().await?;
        if !link.success {
            return Err(DownloadError::Unsuccessful);
        }
        Ok(link)
    }
}
