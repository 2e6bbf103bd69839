//! Download request/response types shared by the proxy and its callers.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::asset::file_extension;
use crate::error::CoreError;

/// Body of `POST /api/download/{asset_uuid}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DownloadRequest {
    #[validate(length(min = 1, message = "Format is required"))]
    pub format: String,
}

/// What the upstream catalog returns for a download request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamDownload {
    pub download_url: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Successful proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub success: bool,
    pub download_url: String,
    pub expires_at: Option<String>,
    pub asset_uuid: String,
    pub format: String,
}

/// Derive the download format token (`png`, `svg`, `mp4`, ...) from the
/// file extension of an asset's image URL.
///
/// Query strings and fragments are ignored. Fails when the URL has no path
/// or its last path segment has no extension, e.g. for the inline
/// placeholder image.
///
/// ```
/// use scout_core::download::format_from_url;
/// assert_eq!(format_from_url("https://cdn/x/sun.png?w=64").unwrap(), "png");
/// assert!(format_from_url("data:image/svg+xml;base64,AAAA").is_err());
/// ```
pub fn format_from_url(url: &str) -> Result<String, CoreError> {
    file_extension(url)
        .ok_or_else(|| CoreError::Validation("Unable to determine asset format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_plain_urls() {
        assert_eq!(format_from_url("http://x/sun.png").unwrap(), "png");
        assert_eq!(format_from_url("http://x/a/b/icon.SVG").unwrap(), "svg");
        assert_eq!(format_from_url("https://x/anim.mp4#t=2").unwrap(), "mp4");
    }

    #[test]
    fn urls_without_extension_fail() {
        for url in ["http://x/asset", "http://x.io/", "", "http://x/.hidden", "http://x/a.p-g"] {
            assert!(format_from_url(url).is_err(), "derived a format for {url:?}");
        }
    }

    #[test]
    fn host_only_urls_fail() {
        for url in ["http://cdn.example.com", "https://cdn.example.com#top", "https://a.b.svg?x=1"] {
            let err = format_from_url(url).unwrap_err();
            assert_eq!(err.to_string(), "Validation failed: Unable to determine asset format");
        }
    }

    #[test]
    fn empty_format_fails_validation() {
        let req = DownloadRequest {
            format: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("format"));

        let ok = DownloadRequest {
            format: "png".into(),
        };
        assert!(ok.validate().is_ok());
    }
}
