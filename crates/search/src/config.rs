//! Session configuration, read once at startup.

use std::path::PathBuf;

use scout_client::DEFAULT_API_URL;

/// Default location of the download proxy.
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000";

/// Configuration for the search front end.
///
/// | Env Var                | Default                                  |
/// |------------------------|------------------------------------------|
/// | `ICONSCOUT_CLIENT_ID`  | unset (searches report a config error)   |
/// | `ICONSCOUT_API_URL`    | `https://api.iconscout.com/v3`           |
/// | `SCOUT_PROXY_URL`      | `http://localhost:3000`                  |
/// | `SCOUT_FAVORITES_PATH` | `<local data dir>/scout/favorites.json`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub api_url: String,
    /// Public client identifier. `None` when unset or blank.
    pub client_id: Option<String>,
    pub proxy_url: String,
    pub favorites_path: PathBuf,
}

impl SearchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            api_url: non_blank("ICONSCOUT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            client_id: non_blank("ICONSCOUT_CLIENT_ID"),
            proxy_url: non_blank("SCOUT_PROXY_URL").unwrap_or_else(|| DEFAULT_PROXY_URL.to_string()),
            favorites_path: non_blank("SCOUT_FAVORITES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_favorites_path),
        }
    }

    pub fn credentials_configured(&self) -> bool {
        self.client_id.is_some()
    }
}

fn default_favorites_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scout")
        .join("favorites.json")
}
