//! HTTP clients for the remote asset catalog and the download proxy.
//!
//! - [`search::SearchClient`] issues catalog searches with the public client
//!   id only and never fails: transport problems come back as an empty,
//!   degraded page.
//! - [`upstream::DownloadClient`] requests download links from the catalog
//!   with the private secret. Server side only.
//! - [`proxy::ProxyClient`] asks the download proxy for a link. This is what
//!   a front end uses instead of holding the secret.

pub mod error;
pub mod headers;
pub mod proxy;
pub mod search;
pub mod transport;
pub mod upstream;

pub use error::{ClientError, DownloadError, UpstreamError};
pub use reqwest::Url;
pub use transport::{DownloadProxy, SearchTransport};

/// Default base URL of the remote catalog API.
pub const DEFAULT_API_URL: &str = "https://api.iconscout.com/v3";

/// Parse a base URL and make sure path segments can be appended to it.
pub(crate) fn parse_base_url(raw: &str) -> Result<reqwest::Url, ClientError> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(format!("{raw}: not a base URL")));
    }
    Ok(url)
}

/// Append path segments to a base URL.
pub(crate) fn endpoint(base: &reqwest::Url, segments: &[&str]) -> Result<reqwest::Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl(format!("{base}: not a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path() {
        let base = parse_base_url("https://api.example.com/v3").unwrap();
        let url = endpoint(&base, &["search"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v3/search");

        let base = parse_base_url("https://api.example.com/v3/").unwrap();
        let url = endpoint(&base, &["items", "a b", "api-download"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v3/items/a%20b/api-download");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("mailto:someone@example.com").is_err());
    }
}
