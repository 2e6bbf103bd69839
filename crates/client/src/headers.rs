//! Catalog authentication headers.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::error::ClientError;

/// Public client identifier, sent on every catalog request.
pub const CLIENT_ID_HEADER: HeaderName = HeaderName::from_static("client-id");

/// Private secret, sent only on download requests from the server.
pub const CLIENT_SECRET_HEADER: HeaderName = HeaderName::from_static("client-secret");

/// Build catalog request headers. `client_secret` is attached only when given.
pub fn api_headers(client_id: &str, client_secret: Option<&str>) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        CLIENT_ID_HEADER,
        HeaderValue::from_str(client_id).map_err(|_| ClientError::InvalidHeader("Client-ID"))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(secret) = client_secret {
        let mut value = HeaderValue::from_str(secret)
            .map_err(|_| ClientError::InvalidHeader("Client-Secret"))?;
        value.set_sensitive(true);
        headers.insert(CLIENT_SECRET_HEADER, value);
    }

    Ok(headers)
}
