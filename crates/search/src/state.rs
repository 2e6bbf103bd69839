//! Canonical search state and its read-only view.

use scout_core::filters::SelectedFilters;
use scout_core::intent::SearchIntent;
use scout_core::results::SearchResults;
use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    Searching,
}

/// Machine-readable category of a user-visible error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Credentials missing; no request was attempted.
    Configuration,
    /// A search transport reported an error.
    Transport,
    /// A download could not be started.
    Download,
}

/// A user-visible error: a short message plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct SearchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl SearchFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Everything a renderer needs to draw the search page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchState {
    pub intent: SearchIntent,
    pub phase: SearchPhase,
    /// Sticky until the next search attempt starts.
    pub error: Option<SearchFailure>,
    /// The last search came back as a stand-in empty page (network failure
    /// or malformed response), as opposed to a genuine zero-match result.
    pub degraded: bool,
    pub results: SearchResults,
}

impl SearchState {
    pub fn new(intent: SearchIntent) -> Self {
        Self {
            intent,
            phase: SearchPhase::Idle,
            error: None,
            degraded: false,
            results: SearchResults::empty(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Searching
    }

    pub fn query(&self) -> &str {
        &self.intent.query
    }

    pub fn filters(&self) -> &SelectedFilters {
        &self.intent.filters
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(SearchIntent::default())
    }
}

/// Read-only handle on the coordinator's state.
#[derive(Debug, Clone)]
pub struct SearchView {
    rx: watch::Receiver<SearchState>,
}

impl SearchView {
    pub(crate) fn new(rx: watch::Receiver<SearchState>) -> Self {
        Self { rx }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SearchState {
        self.rx.borrow().clone()
    }

    /// Run `f` against the current state without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&SearchState) -> R) -> R {
        f(&self.rx.borrow())
    }

    /// Wait until the state changes. Returns `false` once the coordinator
    /// has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
