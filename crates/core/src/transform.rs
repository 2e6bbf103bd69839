//! Asset transformer: upstream record -> display model.
//!
//! Total over its input. A record without identity (`id` and `name`) or
//! with an undecodable shape is rejected with a `warn` log and `None`;
//! callers drop rejected records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::asset::{Asset, AssetLabel, MediaFormat, PLACEHOLDER_IMAGE};
use crate::types::Timestamp;
use crate::wire::{RawAsset, RawId, RawLabel, RawUrls};

const UNKNOWN_AUTHOR: &str = "Unknown";

/// Transform one raw JSON record.
pub fn transform(value: &serde_json::Value) -> Option<Asset> {
    match serde_json::from_value::<RawAsset>(value.clone()) {
        Ok(raw) => transform_raw(raw),
        Err(e) => {
            tracing::warn!(error = %e, "Dropping asset record with unexpected shape");
            None
        }
    }
}

/// Transform every record, dropping rejects and keeping order.
pub fn transform_all(values: &[serde_json::Value]) -> Vec<Asset> {
    let assets: Vec<Asset> = values.iter().filter_map(transform).collect();
    let dropped = values.len() - assets.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = assets.len(), "Dropped invalid asset records");
    }
    assets
}

/// Transform an already decoded record.
pub fn transform_raw(raw: RawAsset) -> Option<Asset> {
    let Some(id) = raw.id.as_ref().and_then(|id| id.to_display()) else {
        tracing::warn!(name = ?raw.name, "Dropping asset record without id");
        return None;
    };
    let Some(title) = non_empty(raw.name.as_deref()) else {
        tracing::warn!(%id, "Dropping asset record without name");
        return None;
    };

    let image_url = pick_image_url(raw.urls.as_ref())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string();
    let format = MediaFormat::from_url(&image_url);
    let kind = non_empty(raw.asset.as_deref());

    Some(Asset {
        uuid: raw
            .uuid
            .as_ref()
            .and_then(RawId::to_display)
            .unwrap_or_else(|| id.clone()),
        id,
        title: title.to_string(),
        description: non_empty(raw.description.as_deref()).map(str::to_string),
        image_url,
        is_premium: raw.price.is_some_and(|p| p > 0.0),
        tags: raw.tags.unwrap_or_default(),
        category: category_label(raw.category.as_ref(), kind),
        asset_type: kind_label(kind),
        created_at: raw.created_at.as_deref().and_then(parse_timestamp),
        author: raw
            .author
            .as_ref()
            .and_then(|a| non_empty(a.name.as_deref()))
            .unwrap_or(UNKNOWN_AUTHOR)
            .to_string(),
        download_count: raw.download_count.unwrap_or(0),
        format,
    })
}

/// First present rendition, largest raster first, then vector, then thumbnail.
fn pick_image_url(urls: Option<&RawUrls>) -> Option<&str> {
    let urls = urls?;
    [&urls.png_256, &urls.png_128, &urls.png_64, &urls.svg, &urls.thumb]
        .into_iter()
        .find_map(|u| non_empty(u.as_deref()))
}

fn category_label(category: Option<&RawLabel>, kind: Option<&str>) -> AssetLabel {
    let fallback = kind_label(kind);
    let Some(category) = category else {
        return fallback;
    };
    AssetLabel {
        id: category
            .id
            .as_ref()
            .and_then(|id| id.to_display())
            .unwrap_or(fallback.id),
        name: non_empty(category.name.as_deref())
            .map(str::to_string)
            .unwrap_or(fallback.name),
        slug: non_empty(category.slug.as_deref())
            .map(str::to_string)
            .unwrap_or(fallback.slug),
    }
}

fn kind_label(kind: Option<&str>) -> AssetLabel {
    match kind {
        Some(kind) => AssetLabel {
            id: kind.to_string(),
            name: capitalize(kind),
            slug: kind.to_string(),
        },
        None => AssetLabel::unknown(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) or a bare date.
fn parse_timestamp(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn minimal_free_icon() {
        let asset = transform(&json!({
            "id": 1, "uuid": "a", "name": "Sun", "asset": "icon", "price": 0,
            "urls": { "png_64": "http://x/sun.png" }
        }))
        .unwrap();

        assert_eq!(asset.id, "1");
        assert_eq!(asset.uuid, "a");
        assert_eq!(asset.title, "Sun");
        assert!(!asset.is_premium);
        assert_eq!(asset.format, MediaFormat::Image);
        assert_eq!(asset.image_url, "http://x/sun.png");
        assert_eq!(asset.asset_type.name, "Icon");
        assert_eq!(asset.category.slug, "icon");
        assert_eq!(asset.author, "Unknown");
        assert_eq!(asset.download_count, 0);
        assert!(asset.created_at.is_none());
    }

    #[test]
    fn premium_without_urls_uses_placeholder() {
        let asset = transform(&json!({ "id": 9, "name": "Moon", "price": 5 })).unwrap();
        assert!(asset.is_premium);
        assert_eq!(asset.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(asset.format, MediaFormat::Image);
    }

    #[test]
    fn records_without_identity_are_rejected() {
        for record in [
            json!({ "name": "No id" }),
            json!({ "id": 3 }),
            json!({ "id": 0, "name": "Zero" }),
            json!({ "id": 3, "name": "" }),
            json!({ "id": 3, "name": 42 }),
            json!("not an object"),
            json!(null),
        ] {
            assert!(transform(&record).is_none(), "accepted {record}");
        }
    }

    #[test]
    fn format_follows_the_file_extension_only() {
        let asset = transform(&json!({
            "id": 1, "name": "Sun",
            "urls": { "png_256": "https://cdn.movable.example/a/sun.png" }
        }))
        .unwrap();
        assert_eq!(asset.format, MediaFormat::Image);
    }

    #[test]
    fn odd_uuid_shapes_do_not_reject_the_record() {
        let numeric = transform(&json!({ "id": 1, "uuid": 123, "name": "Sun" })).unwrap();
        assert_eq!(numeric.uuid, "123");

        for uuid in [json!({ "v": 1 }), json!(true), json!(""), json!(null), json!([1])] {
            let asset = transform(&json!({ "id": 7, "uuid": uuid, "name": "Sun" }))
                .unwrap_or_else(|| panic!("rejected uuid {uuid}"));
            assert_eq!(asset.uuid, "7");
        }
    }

    #[test]
    fn accepted_records_always_have_an_image() {
        for urls in [json!({}), json!({ "svg": "" }), json!(null), json!("bad")] {
            let asset = transform(&json!({ "id": 2, "name": "X", "urls": urls })).unwrap();
            assert!(!asset.image_url.is_empty());
        }
    }

    #[test]
    fn image_url_preference_order() {
        let asset = transform(&json!({
            "id": 2, "name": "X",
            "urls": { "png_64": "s.png", "png_128": "m.png", "png_256": "l.png", "svg": "v.svg" }
        }))
        .unwrap();
        assert_eq!(asset.image_url, "l.png");

        let asset = transform(&json!({
            "id": 2, "name": "X", "urls": { "svg": "v.svg", "thumb": "t.png" }
        }))
        .unwrap();
        assert_eq!(asset.image_url, "v.svg");

        let asset = transform(&json!({ "id": 2, "name": "X", "urls": { "thumb": "t.mp4" } }))
            .unwrap();
        assert_eq!(asset.image_url, "t.mp4");
        assert_eq!(asset.format, MediaFormat::Video);
    }

    #[test]
    fn structured_category_wins_over_kind() {
        let asset = transform(&json!({
            "id": 4, "name": "Leaf", "asset": "illustration",
            "category": { "id": 12, "name": "Nature", "slug": "nature" },
            "author": { "name": "Ana" },
            "tags": ["leaf", "green"],
            "download_count": 17
        }))
        .unwrap();
        assert_eq!(asset.category.id, "12");
        assert_eq!(asset.category.name, "Nature");
        assert_eq!(asset.asset_type.name, "Illustration");
        assert_eq!(asset.author, "Ana");
        assert_eq!(asset.tags, vec!["leaf", "green"]);
        assert_eq!(asset.download_count, 17);
    }

    #[test]
    fn missing_kind_falls_back_to_unknown() {
        let asset = transform(&json!({ "id": 4, "name": "Leaf" })).unwrap();
        assert_eq!(asset.category, AssetLabel::unknown());
        assert_eq!(asset.asset_type.name, "Unknown");
        assert_eq!(asset.asset_type.id, "unknown");
    }

    #[test]
    fn created_at_formats() {
        let parse = |s: &str| {
            transform(&json!({ "id": 1, "name": "T", "created_at": s }))
                .unwrap()
                .created_at
        };
        let rfc = parse("2024-03-05T10:20:30Z").unwrap();
        assert_eq!((rfc.year(), rfc.hour()), (2024, 10));
        let sql = parse("2024-03-05 10:20:30").unwrap();
        assert_eq!(sql.minute(), 20);
        assert_eq!(parse("2024-03-05").unwrap().day(), 5);
        assert!(parse("yesterday").is_none());
    }

    #[test]
    fn transform_all_keeps_order_and_drops_rejects() {
        let values = vec![
            json!({ "id": 1, "name": "A" }),
            json!({ "name": "no id" }),
            json!({ "id": 2, "name": "B" }),
        ];
        let ids: Vec<_> = transform_all(&values).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
