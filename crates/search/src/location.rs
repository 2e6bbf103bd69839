//! Address-bar synchronization for shareable searches.
//!
//! The trimmed query lives in the `q` parameter; it is absent when the
//! query is empty. Other parameters are preserved.

use std::sync::{Mutex, PoisonError};

use scout_client::Url;

/// Name of the shareable query parameter.
pub const QUERY_PARAM: &str = "q";

/// The host's address bar.
pub trait AddressBar: Send + Sync {
    /// Current value of the `q` parameter, if present and non-empty.
    fn query(&self) -> Option<String>;

    /// Push a new history entry with `q` set to `query`, or removed when
    /// `query` is `None`.
    fn push_query(&self, query: Option<&str>);
}

/// Value of `q` in `url`, ignoring empty values.
pub fn query_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == QUERY_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// `url` with `q` replaced by `query` (or removed), other params kept in order.
pub fn with_query_param(url: &Url, query: Option<&str>) -> Url {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != QUERY_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if let Some(q) = query {
        pairs.push((QUERY_PARAM.to_string(), q.to_string()));
    }

    let mut next = url.clone();
    if pairs.is_empty() {
        next.set_query(None);
    } else {
        next.query_pairs_mut().clear().extend_pairs(pairs);
    }
    next
}

/// In-memory address bar with a history stack.
///
/// Used by the terminal front end and by tests. A host that navigates
/// (back/forward, pasted link) calls [`MemoryAddressBar::navigate`] and
/// then notifies the coordinator.
#[derive(Debug)]
pub struct MemoryAddressBar {
    inner: Mutex<History>,
}

#[derive(Debug)]
struct History {
    current: Url,
    previous: Vec<Url>,
}

impl MemoryAddressBar {
    pub fn new(initial: Url) -> Self {
        Self {
            inner: Mutex::new(History {
                current: initial,
                previous: Vec::new(),
            }),
        }
    }

    pub fn current(&self) -> Url {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    /// Number of history entries, including the initial one.
    pub fn history_len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .previous
            .len()
            + 1
    }

    /// Simulate the user landing on `url` (back/forward or pasted link).
    pub fn navigate(&self, url: Url) {
        let mut history = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut history.current, url);
        history.previous.push(previous);
    }
}

impl Default for MemoryAddressBar {
    fn default() -> Self {
        Self::new(Url::parse("http://localhost/").expect("static URL is valid"))
    }
}

impl AddressBar for MemoryAddressBar {
    fn query(&self) -> Option<String> {
        query_param(&self.current())
    }

    fn push_query(&self, query: Option<&str>) {
        let next = with_query_param(&self.current(), query);
        tracing::debug!(url = %next, "Pushing address bar entry");
        self.navigate(next);
    }
}
