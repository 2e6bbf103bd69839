//! Remote search client.
//!
//! Sends `GET {api_url}/search?...` with the public client id. Any transport
//! failure, non-2xx status or undecodable body is logged and replaced with
//! [`RawSearchResponse::empty`], so callers only ever see one shape.

use async_trait::async_trait;
use scout_core::intent::SearchRequest;
use scout_core::wire::RawSearchResponse;

use crate::error::ClientError;
use crate::headers::api_headers;
use crate::transport::SearchTransport;
use crate::{endpoint, parse_base_url};

/// HTTP client for catalog searches.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    api_url: reqwest::Url,
    client_id: String,
}

impl SearchClient {
    /// Create a client for the catalog at `api_url`.
    ///
    /// Fails only when `api_url` is not a usable base URL.
    pub fn new(api_url: &str, client_id: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), api_url, client_id)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_url: &str,
        client_id: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client,
            api_url: parse_base_url(api_url)?,
            client_id: client_id.into(),
        })
    }

    /// Full search URL for `request`.
    pub fn search_url(&self, request: &SearchRequest) -> Result<reqwest::Url, ClientError> {
        let mut url = endpoint(&self.api_url, &["search"])?;
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        Ok(url)
    }

    /// Run the search, surfacing every failure.
    pub async fn try_search(&self, request: &SearchRequest) -> Result<RawSearchResponse, ClientError> {
        let url = self.search_url(request)?;
        tracing::debug!(%url, "Sending catalog search");

        let response = self
            .client
            .get(url)
            .headers(api_headers(&self.client_id, None)?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<RawSearchResponse>().await?)
    }
}

#[async_trait]
impl SearchTransport for SearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResponse, ClientError> {
        match self.try_search(request).await {
            Ok(raw) => Ok(raw),
            Err(e) => {
                tracing::warn!(error = %e, page = request.page(), "Catalog search failed, returning empty page");
                Ok(RawSearchResponse::empty())
            }
        }
    }
}
