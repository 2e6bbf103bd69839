//! The search coordinator.
//!
//! Owns the [`SearchState`] behind a `watch` channel and is the only code
//! that mutates it. Every public operation is one user action: edit the
//! query, pick a filter, load more, follow a link, download an asset.
//!
//! Two invariants are enforced here:
//!
//! - **Single flight.** At most one search is outstanding. The claim is made
//!   atomically inside [`watch::Sender::send_if_modified`], so a second
//!   caller racing the first sees `Searching` and gets
//!   [`SearchOutcome::Skipped`].
//! - **No address-bar feedback loop.** While a local mutation is being
//!   applied the sync token is `Applying`, and address-bar notifications
//!   are dropped with [`LocationSync::Suppressed`].

use std::sync::{Arc, Mutex, PoisonError};

use scout_client::proxy::ProxyClient;
use scout_client::search::SearchClient;
use scout_client::{ClientError, DownloadProxy, SearchTransport};
use scout_core::asset::Asset;
use scout_core::download::{format_from_url, DownloadLink};
use scout_core::filters::{asset_value_for_category, FilterDimension};
use scout_core::intent::{SearchIntent, SearchRequest};
use scout_core::results::SearchResults;
use tokio::sync::watch;

use crate::config::SearchConfig;
use crate::location::{AddressBar, MemoryAddressBar};
use crate::opener::{SystemOpener, UrlOpener};
use crate::state::{FailureKind, SearchFailure, SearchPhase, SearchState, SearchView};

/// Shown when a search is attempted without a public client id.
pub const CONFIG_ERROR_MESSAGE: &str =
    "API credentials not configured. Please set ICONSCOUT_CLIENT_ID environment variable.";

const FORMAT_ERROR_MESSAGE: &str = "Unable to determine asset format";
const NO_PROXY_MESSAGE: &str = "Download proxy not configured";

/// What a call to [`SearchCoordinator::search`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A result page was published.
    Published,
    /// The transport handed back a stand-in page; `degraded` is set.
    Degraded,
    /// Nothing happened: a search was already in flight, or there was
    /// nothing more to load.
    Skipped,
    /// Credentials are missing; no request was made.
    ConfigurationError,
    /// The transport returned an error; previous results were kept.
    Failed,
}

/// What an address-bar notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSync {
    Applied(SearchOutcome),
    /// `q` already matches the current query.
    Unchanged,
    /// A local mutation is in progress; the notification is its own echo.
    Suppressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncToken {
    Idle,
    Applying,
}

/// Holds the sync token at `Applying` until dropped.
struct ApplyGuard<'a> {
    token: &'a Mutex<SyncToken>,
}

impl Drop for ApplyGuard<'_> {
    fn drop(&mut self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = SyncToken::Idle;
    }
}

/// Builder for [`SearchCoordinator`].
pub struct CoordinatorBuilder {
    transport: Arc<dyn SearchTransport>,
    downloads: Option<Arc<dyn DownloadProxy>>,
    address: Option<Arc<dyn AddressBar>>,
    opener: Option<Arc<dyn UrlOpener>>,
    credentials_configured: bool,
    intent: SearchIntent,
}

impl CoordinatorBuilder {
    pub fn new(transport: Arc<dyn SearchTransport>) -> Self {
        Self {
            transport,
            downloads: None,
            address: None,
            opener: None,
            credentials_configured: true,
            intent: SearchIntent::default(),
        }
    }

    /// HTTP search client and download proxy, as configured.
    pub fn from_config(config: &SearchConfig) -> Result<Self, ClientError> {
        let client_id = config.client_id.clone().unwrap_or_default();
        let search = SearchClient::new(&config.api_url, client_id)?;
        let proxy = ProxyClient::new(&config.proxy_url)?;
        Ok(Self::new(Arc::new(search))
            .download_proxy(Arc::new(proxy))
            .credentials_configured(config.credentials_configured()))
    }

    pub fn download_proxy(mut self, proxy: Arc<dyn DownloadProxy>) -> Self {
        self.downloads = Some(proxy);
        self
    }

    pub fn address_bar(mut self, address: Arc<dyn AddressBar>) -> Self {
        self.address = Some(address);
        self
    }

    pub fn opener(mut self, opener: Arc<dyn UrlOpener>) -> Self {
        self.opener = Some(opener);
        self
    }

    /// Whether a public client id is available. When `false`, every search
    /// short-circuits to a configuration error.
    pub fn credentials_configured(mut self, configured: bool) -> Self {
        self.credentials_configured = configured;
        self
    }

    pub fn intent(mut self, intent: SearchIntent) -> Self {
        self.intent = intent;
        self
    }

    pub fn build(self) -> SearchCoordinator {
        let (state, _) = watch::channel(SearchState::new(self.intent));
        SearchCoordinator {
            transport: self.transport,
            downloads: self.downloads,
            address: self
                .address
                .unwrap_or_else(|| Arc::new(MemoryAddressBar::default())),
            opener: self.opener.unwrap_or_else(|| Arc::new(SystemOpener)),
            credentials_configured: self.credentials_configured,
            state,
            sync: Mutex::new(SyncToken::Idle),
        }
    }
}

pub struct SearchCoordinator {
    transport: Arc<dyn SearchTransport>,
    downloads: Option<Arc<dyn DownloadProxy>>,
    address: Arc<dyn AddressBar>,
    opener: Arc<dyn UrlOpener>,
    credentials_configured: bool,
    state: watch::Sender<SearchState>,
    sync: Mutex<SyncToken>,
}

impl SearchCoordinator {
    pub fn builder(transport: Arc<dyn SearchTransport>) -> CoordinatorBuilder {
        CoordinatorBuilder::new(transport)
    }

    /// Read-only view for renderers.
    pub fn subscribe(&self) -> SearchView {
        SearchView::new(self.state.subscribe())
    }

    /// Clone of the current state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    // -----------------------------------------------------------------------
    // Searching
    // -----------------------------------------------------------------------

    /// Run the current intent at `page`.
    pub async fn search(&self, page: u32) -> SearchOutcome {
        if !self.credentials_configured {
            tracing::error!("Search attempted without a client id");
            self.state.send_modify(|s| {
                s.error = Some(SearchFailure::new(
                    FailureKind::Configuration,
                    CONFIG_ERROR_MESSAGE,
                ));
                s.results = SearchResults::empty();
                s.degraded = false;
            });
            return SearchOutcome::ConfigurationError;
        }

        let mut claimed = false;
        self.state.send_if_modified(|s| {
            if s.is_loading() {
                return false;
            }
            s.phase = SearchPhase::Searching;
            s.error = None;
            claimed = true;
            true
        });
        if !claimed {
            tracing::debug!(page, "Search already in flight, skipping");
            return SearchOutcome::Skipped;
        }

        let intent = self.state.borrow().intent.with_page(page);
        let request = SearchRequest::from_intent(&intent);
        tracing::info!(query = %intent.query, page = request.page(), "Searching");

        let response = self.transport.search(&request).await;

        let mut outcome = SearchOutcome::Published;
        self.state.send_modify(|s| {
            s.phase = SearchPhase::Idle;
            let raw = match response {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::error!(error = %e, "Search transport failed");
                    s.error = Some(SearchFailure::new(FailureKind::Transport, e.to_string()));
                    outcome = SearchOutcome::Failed;
                    return;
                }
            };

            let page_results = if raw.degraded {
                None
            } else {
                SearchResults::from_raw(&raw, request.page())
            };
            match page_results {
                Some(results) => {
                    s.degraded = false;
                    s.intent.page = results.current_page;
                    s.results = if request.page() > 1 {
                        std::mem::take(&mut s.results).accumulate(results)
                    } else {
                        results
                    };
                }
                None => {
                    s.degraded = true;
                    if request.page() == 1 {
                        s.intent.page = 1;
                        s.results = SearchResults::empty();
                    }
                    outcome = SearchOutcome::Degraded;
                }
            }
        });

        let snapshot = self.state.borrow();
        tracing::debug!(
            ?outcome,
            assets = snapshot.results.assets.len(),
            total = snapshot.results.total,
            "Search finished"
        );
        outcome
    }

    /// Fetch the next page and append it. Skipped unless there is more to
    /// load and nothing is in flight.
    pub async fn load_more(&self) -> SearchOutcome {
        let next_page = {
            let s = self.state.borrow();
            (s.results.has_more && !s.is_loading()).then(|| s.results.current_page + 1)
        };
        match next_page {
            Some(page) => self.search(page).await,
            None => SearchOutcome::Skipped,
        }
    }

    /// Replace the query, reflect it in the address bar and search page 1.
    pub async fn set_query(&self, text: &str) -> SearchOutcome {
        let _guard = self.enter_applying();

        self.state.send_modify(|s| {
            s.intent.query = text.to_string();
            s.intent.page = 1;
        });

        let shared = Some(text.trim()).filter(|q| !q.is_empty());
        if self.address.query().as_deref() != shared {
            self.address.push_query(shared);
        }

        self.search(1).await
    }

    /// Overwrite one filter dimension and search page 1.
    pub async fn set_filter(&self, dimension: FilterDimension, value: &str) -> SearchOutcome {
        let _guard = self.enter_applying();
        self.state.send_modify(|s| {
            s.intent.filters.set(dimension, value);
            s.intent.page = 1;
        });
        self.search(1).await
    }

    /// Navigation shortcut: map `label` to an asset filter value.
    pub async fn set_category(&self, label: &str) -> SearchOutcome {
        self.set_filter(FilterDimension::Asset, asset_value_for_category(label))
            .await
    }

    /// Called by the host when the address bar's `q` may have changed.
    pub async fn on_address_changed(&self) -> LocationSync {
        if self.is_applying() {
            tracing::debug!("Address change during local update, ignoring");
            return LocationSync::Suppressed;
        }

        let incoming = self.address.query().unwrap_or_default();
        let incoming = incoming.trim();
        let unchanged = self.state.borrow().intent.query.trim() == incoming;
        if unchanged {
            return LocationSync::Unchanged;
        }

        self.state.send_modify(|s| {
            s.intent.query = incoming.to_string();
            s.intent.page = 1;
        });
        LocationSync::Applied(self.search(1).await)
    }

    /// Adopt the address bar's `q` and run the first search.
    pub async fn start(&self) -> SearchOutcome {
        let initial = self.address.query();
        self.state.send_modify(|s| {
            if let Some(q) = initial {
                s.intent.query = q.trim().to_string();
            }
            s.intent.page = 1;
        });
        self.search(1).await
    }

    // -----------------------------------------------------------------------
    // Downloads
    // -----------------------------------------------------------------------

    /// Request a download link for `asset` and open it.
    ///
    /// Failures are published as a [`FailureKind::Download`] error; results
    /// are left alone either way.
    pub async fn download_asset(&self, asset: &Asset) -> Result<DownloadLink, SearchFailure> {
        let result = self.try_download(asset).await;
        if let Err(failure) = &result {
            tracing::error!(asset_uuid = %asset.uuid, error = %failure, "Download failed");
            self.state.send_modify(|s| s.error = Some(failure.clone()));
        }
        result
    }

    async fn try_download(&self, asset: &Asset) -> Result<DownloadLink, SearchFailure> {
        let failure = |message: String| SearchFailure::new(FailureKind::Download, message);

        let format = format_from_url(&asset.image_url)
            .map_err(|_| failure(FORMAT_ERROR_MESSAGE.to_string()))?;
        let proxy = self
            .downloads
            .as_ref()
            .ok_or_else(|| failure(NO_PROXY_MESSAGE.to_string()))?;

        tracing::info!(asset_uuid = %asset.uuid, %format, "Requesting download");
        let link = proxy
            .request_download(&asset.uuid, &format)
            .await
            .map_err(|e| failure(e.to_string()))?;

        self.opener
            .open(&link.download_url)
            .map_err(|e| failure(format!("Could not open download link: {e}")))?;
        Ok(link)
    }

    // -----------------------------------------------------------------------
    // Sync token
    // -----------------------------------------------------------------------

    /// Mark a local mutation in progress. Returns `None` when one already
    /// is, so only the outermost caller resets the token.
    fn enter_applying(&self) -> Option<ApplyGuard<'_>> {
        let mut token = self.sync.lock().unwrap_or_else(PoisonError::into_inner);
        match *token {
            SyncToken::Applying => None,
            SyncToken::Idle => {
                *token = SyncToken::Applying;
                Some(ApplyGuard { token: &self.sync })
            }
        }
    }

    fn is_applying(&self) -> bool {
        *self.sync.lock().unwrap_or_else(PoisonError::into_inner) == SyncToken::Applying
    }
}
