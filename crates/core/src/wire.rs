//! Upstream catalog wire format.
//!
//! Every field is optional: the catalog has shipped several response shapes
//! and the front end must keep working when any of them shows up. Items stay
//! as raw JSON so one malformed record cannot poison the whole page; the
//! transformer decodes them one at a time.

use serde::{Deserialize, Serialize};

use crate::intent::PER_PAGE;

/// Top-level search response: `{ response: { items: { data, total, ... } } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub response: Option<RawResponseBody>,

    /// Set by the search client when this value stands in for a failed
    /// request. Never part of the wire format.
    #[serde(skip)]
    pub degraded: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawResponseBody {
    #[serde(default)]
    pub items: Option<RawItemsPage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawItemsPage {
    #[serde(default)]
    pub data: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
}

impl RawSearchResponse {
    /// The canonical empty page returned when a search request fails.
    pub fn empty() -> Self {
        Self {
            response: Some(RawResponseBody {
                items: Some(RawItemsPage {
                    data: Some(Vec::new()),
                    total: Some(0),
                    per_page: Some(PER_PAGE),
                    current_page: Some(1),
                }),
            }),
            degraded: true,
        }
    }

    /// The items page, if the response has the expected shape.
    pub fn items(&self) -> Option<&RawItemsPage> {
        self.response
            .as_ref()
            .and_then(|r| r.items.as_ref())
            .filter(|items| items.data.is_some())
    }
}

/// Upstream ids arrive as numbers, but older payloads used strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    /// Stringified id, or `None` when the id is falsy (`0` or empty).
    pub fn to_display(&self) -> Option<String> {
        match self {
            RawId::Number(0) => None,
            RawId::Number(n) => Some(n.to_string()),
            RawId::Text(s) if s.trim().is_empty() => None,
            RawId::Text(s) => Some(s.clone()),
        }
    }
}

/// One catalog record.
///
/// Identity fields (`id`, `name`) are decoded strictly. Everything else goes
/// through [`lenient`], so a field of the wrong JSON type degrades to `None`
/// instead of rejecting the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAsset {
    pub id: Option<RawId>,
    /// Numeric uuids are stringified; other shapes fall back to `id`.
    #[serde(default, deserialize_with = "lenient")]
    pub uuid: Option<RawId>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Broad kind: `icon`, `illustration`, `3d`, `lottie`, ...
    #[serde(default, deserialize_with = "lenient")]
    pub asset: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub urls: Option<RawUrls>,
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<RawLabel>,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<RawAuthor>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub download_count: Option<u64>,
}

/// Decode `T` if the value has the right shape, otherwise yield `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUrls {
    pub png_64: Option<String>,
    pub png_128: Option<String>,
    pub png_256: Option<String>,
    pub png_512: Option<String>,
    pub svg: Option<String>,
    pub thumb: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLabel {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAuthor {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_has_no_items() {
        let raw: RawSearchResponse =
            serde_json::from_str(r#"{"response":{"items":{"total":3}}}"#).unwrap();
        assert!(raw.items().is_none());
        assert!(!raw.degraded);
    }

    #[test]
    fn empty_is_degraded_with_first_page() {
        let raw = RawSearchResponse::empty();
        let items = raw.items().unwrap();
        assert_eq!(items.current_page, Some(1));
        assert_eq!(items.total, Some(0));
        assert!(raw.degraded);
    }

    #[test]
    fn mistyped_decorative_field_becomes_none() {
        let raw: RawAsset = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Moon",
            "category": "space",
            "price": "free"
        }))
        .unwrap();
        assert!(raw.category.is_none());
        assert!(raw.price.is_none());
        assert_eq!(raw.name.as_deref(), Some("Moon"));
    }

    #[test]
    fn falsy_ids_have_no_display_form() {
        assert_eq!(RawId::Number(0).to_display(), None);
        assert_eq!(RawId::Text(" ".into()).to_display(), None);
        assert_eq!(RawId::Number(42).to_display().as_deref(), Some("42"));
    }
}
