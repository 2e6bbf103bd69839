//! Search intent and the outbound request derived from it.
//!
//! [`SearchRequest`] can only be built from a [`SearchIntent`], so the
//! intent is the single source for every outbound search.

use serde::{Deserialize, Serialize};

use crate::filters::{restricting, SelectedFilters, DEFAULT_SORT};

/// Fixed page size for every search.
pub const PER_PAGE: u32 = 20;

/// Query text, filter selection and page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIntent {
    pub query: String,
    pub filters: SelectedFilters,
    /// 1-based.
    pub page: u32,
}

impl Default for SearchIntent {
    fn default() -> Self {
        Self {
            query: String::new(),
            filters: SelectedFilters::default(),
            page: 1,
        }
    }
}

impl SearchIntent {
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }
}

/// Parameters of one outbound search. Absent fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: Option<String>,
    asset: Option<String>,
    category: Option<String>,
    style: Option<String>,
    price: Option<String>,
    page: u32,
    per_page: u32,
    sort: String,
}

impl SearchRequest {
    /// Build the request for `intent`, dropping empty and `all` values.
    pub fn from_intent(intent: &SearchIntent) -> Self {
        let filters = &intent.filters;
        let owned = |v: Option<&str>| v.map(str::to_string);
        let sort = match filters.sort.trim() {
            "" => DEFAULT_SORT.to_string(),
            s => s.to_string(),
        };

        Self {
            query: owned(Some(intent.query.trim()).filter(|q| !q.is_empty())),
            asset: owned(restricting(&filters.asset)),
            category: owned(filters.category.as_deref().and_then(restricting)),
            style: owned(filters.style.as_deref().and_then(restricting)),
            price: owned(restricting(&filters.price)),
            page: intent.page.max(1),
            per_page: PER_PAGE,
            sort,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Query-string pairs in wire order, only for present values.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(8);
        let optional = [
            ("query", &self.query),
            ("asset", &self.asset),
            ("category", &self.category),
            ("style", &self.style),
            ("price", &self.price),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                pairs.push((key, v.clone()));
            }
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("per_page", self.per_page.to_string()));
        pairs.push(("sort", self.sort.clone()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterDimension;

    fn keys(req: &SearchRequest) -> Vec<&'static str> {
        req.query_pairs().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn default_intent_sends_only_paging_and_sort() {
        let req = SearchRequest::from_intent(&SearchIntent::default());
        assert_eq!(keys(&req), vec!["page", "per_page", "sort"]);
        assert_eq!(
            req.query_pairs(),
            vec![
                ("page", "1".to_string()),
                ("per_page", "20".to_string()),
                ("sort", "popular".to_string()),
            ]
        );
    }

    #[test]
    fn price_all_is_never_sent() {
        let mut intent = SearchIntent::default();
        intent.filters.set(FilterDimension::Price, "all");
        assert!(!keys(&SearchRequest::from_intent(&intent)).contains(&"price"));

        for tier in ["free", "premium"] {
            intent.filters.set(FilterDimension::Price, tier);
            let pairs = SearchRequest::from_intent(&intent).query_pairs();
            assert!(pairs.contains(&("price", tier.to_string())));
        }
    }

    #[test]
    fn query_is_trimmed_and_blank_dropped() {
        let mut intent = SearchIntent::default();
        intent.query = "  sun  ".into();
        let pairs = SearchRequest::from_intent(&intent).query_pairs();
        assert_eq!(pairs[0], ("query", "sun".to_string()));

        intent.query = "   ".into();
        assert!(!keys(&SearchRequest::from_intent(&intent)).contains(&"query"));
    }

    #[test]
    fn empty_sort_falls_back_to_popular() {
        let mut intent = SearchIntent::default();
        intent.filters.sort = String::new();
        let pairs = SearchRequest::from_intent(&intent).query_pairs();
        assert!(pairs.contains(&("sort", "popular".to_string())));
    }

    #[test]
    fn restricting_filters_are_sent_in_wire_order() {
        let mut intent = SearchIntent::default().with_page(3);
        intent.query = "cat".into();
        intent.filters.set(FilterDimension::Asset, "icon");
        intent.filters.set(FilterDimension::Style, "outline");
        intent.filters.set(FilterDimension::View, "pack");
        let req = SearchRequest::from_intent(&intent);
        assert_eq!(
            keys(&req),
            vec!["query", "asset", "style", "page", "per_page", "sort"]
        );
        assert_eq!(req.page(), 3);
    }

    #[test]
    fn page_zero_is_clamped() {
        let intent = SearchIntent {
            page: 0,
            ..SearchIntent::default()
        };
        assert_eq!(SearchRequest::from_intent(&intent).page(), 1);
    }
}
