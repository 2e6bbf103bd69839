//! Page-scoped search results and pagination math.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::intent::PER_PAGE;
use crate::transform::transform_all;
use crate::wire::RawSearchResponse;

/// Published result set. Asset order is upstream relevance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub assets: Vec<Asset>,
    pub total: u64,
    /// 1-based.
    pub current_page: u32,
    pub total_pages: u32,
    pub has_more: bool,
}

impl Default for SearchResults {
    fn default() -> Self {
        Self::empty()
    }
}

/// `ceil(total / per_page)`; zero when `per_page` is zero.
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

impl SearchResults {
    pub fn empty() -> Self {
        Self {
            assets: Vec::new(),
            total: 0,
            current_page: 1,
            total_pages: 0,
            has_more: false,
        }
    }

    /// Build a page from already transformed assets.
    pub fn page(assets: Vec<Asset>, total: u64, current_page: u32, per_page: u32) -> Self {
        let total_pages = total_pages(total, per_page);
        Self {
            assets,
            total,
            current_page,
            total_pages,
            has_more: current_page < total_pages,
        }
    }

    /// Transform a raw response into a result page.
    ///
    /// Returns `None` when the response lacks `response.items.data`. Missing
    /// pagination fields fall back to the requested page, [`PER_PAGE`] and
    /// the number of items received.
    pub fn from_raw(raw: &RawSearchResponse, requested_page: u32) -> Option<Self> {
        let items = raw.items()?;
        let data = items.data.as_deref().unwrap_or_default();
        let assets = transform_all(data);
        let total = items.total.unwrap_or(data.len() as u64);
        let per_page = items.per_page.unwrap_or(PER_PAGE);
        let current_page = items.current_page.unwrap_or(requested_page).max(1);
        Some(Self::page(assets, total, current_page, per_page))
    }

    /// Accumulate a following page onto this one.
    ///
    /// Assets already present (by id) are skipped; pagination metadata is
    /// taken from `next`.
    pub fn accumulate(self, next: SearchResults) -> Self {
        let mut seen: HashSet<String> = self.assets.iter().map(|a| a.id.clone()).collect();
        let mut assets = self.assets;
        assets.extend(next.assets.into_iter().filter(|a| seen.insert(a.id.clone())));
        Self { assets, ..next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::transform;

    fn asset(id: u64) -> Asset {
        transform(&serde_json::json!({ "id": id, "uuid": format!("u{id}"), "name": "A" }))
            .unwrap()
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn has_more_iff_current_page_below_total_pages() {
        for (total, page, expected) in [(41, 1, true), (41, 2, true), (41, 3, false), (0, 1, false)] {
            let results = SearchResults::page(Vec::new(), total, page, 20);
            assert_eq!(results.has_more, expected, "total={total} page={page}");
            assert_eq!(results.total_pages, total_pages(total, 20));
        }
    }

    #[test]
    fn from_raw_rejects_missing_data() {
        let raw: RawSearchResponse = serde_json::from_str(r#"{"response":{}}"#).unwrap();
        assert!(SearchResults::from_raw(&raw, 1).is_none());
    }

    #[test]
    fn from_raw_uses_fallbacks_for_missing_paging() {
        let raw: RawSearchResponse = serde_json::from_value(serde_json::json!({
            "response": { "items": { "data": [ { "id": 1, "name": "Sun" } ] } }
        }))
        .unwrap();
        let results = SearchResults::from_raw(&raw, 2).unwrap();
        assert_eq!(results.total, 1);
        assert_eq!(results.current_page, 2);
        assert_eq!(results.total_pages, 1);
        assert!(!results.has_more);
    }

    #[test]
    fn accumulate_appends_and_deduplicates() {
        let first = SearchResults::page(vec![asset(1), asset(2)], 60, 1, 20);
        let second = SearchResults::page(vec![asset(2), asset(3)], 60, 2, 20);
        let merged = first.accumulate(second);
        let ids: Vec<_> = merged.assets.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(merged.current_page, 2);
        assert!(merged.has_more);
    }
}
