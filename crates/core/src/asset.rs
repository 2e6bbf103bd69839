//! Display model for a single catalog item.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// File extensions that mark an asset URL as a video rendition.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// Shown when the upstream record carries no usable image URL.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjgwIiBoZWlnaHQ9IjI4MCIgdmlld0JveD0iMCAwIDI4MCAyODAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+CjxyZWN0IHdpZHRoPSIyODAiIGhlaWdodD0iMjgwIiBmaWxsPSIjRjBGMEYwIi8+Cjx0ZXh0IHg9IjE0MCIgeT0iMTUwIiB0ZXh0LWFuY2hvcj0ibWlkZGxlIiBmaWxsPSIjOTk5OTk5IiBmb250LWZhbWlseT0iQXJpYWwiIGZvbnQtc2l6ZT0iMTYiPk5vIEltYWdlPC90ZXh0Pgo8L3N2Zz4K";

/// How an asset's preview should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    Image,
    Video,
}

impl MediaFormat {
    /// `Video` iff the URL's file extension is a known video extension.
    ///
    /// ```
    /// use scout_core::asset::MediaFormat;
    /// assert_eq!(MediaFormat::from_url("https://cdn/x/anim.mp4"), MediaFormat::Video);
    /// assert_eq!(MediaFormat::from_url("https://cdn/x/sun.png"), MediaFormat::Image);
    /// ```
    pub fn from_url(url: &str) -> Self {
        match file_extension(url) {
            Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaFormat::Video,
            _ => MediaFormat::Image,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaFormat::Image => "image",
            MediaFormat::Video => "video",
        }
    }
}

/// Lowercased extension of the last path segment of `url`.
///
/// The scheme, host, query and fragment never contribute, and inline
/// `data:` URIs have no extension.
pub fn file_extension(url: &str) -> Option<String> {
    if url.starts_with("data:") {
        return None;
    }
    let without_suffix = url.split(['?', '#']).next().unwrap_or_default();
    let authority_start = match without_suffix.find("://") {
        Some(i) => Some(i + 3),
        None => without_suffix.starts_with("//").then_some(2),
    };
    let path = match authority_start {
        Some(start) => {
            let rest = &without_suffix[start..];
            &rest[rest.find('/')?..]
        }
        None => without_suffix,
    };
    let segment = path.rsplit('/').next().unwrap_or_default();
    let (stem, ext) = segment.rsplit_once('.')?;

    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// An `{id, name, slug}` triple used for both category and type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLabel {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl AssetLabel {
    pub fn unknown() -> Self {
        Self {
            id: "unknown".to_string(),
            name: "Unknown".to_string(),
            slug: "unknown".to_string(),
        }
    }
}

/// A searchable catalog item in display form.
///
/// `image_url` is never empty: records without any rendition get
/// [`PLACEHOLDER_IMAGE`]. `format` is always [`MediaFormat::from_url`] of
/// `image_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Numeric upstream id, stringified.
    pub id: String,
    /// Remote unique id; used for downloads and favorites.
    pub uuid: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub is_premium: bool,
    pub tags: Vec<String>,
    pub category: AssetLabel,
    pub asset_type: AssetLabel,
    /// `None` when upstream omits or garbles the creation date.
    pub created_at: Option<Timestamp>,
    pub author: String,
    pub download_count: u64,
    pub format: MediaFormat,
}
