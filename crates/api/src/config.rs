use scout_client::upstream::ApiCredentials;
use scout_client::DEFAULT_API_URL;

/// Invalid server configuration. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Catalog
/// credentials have none: without them the server still starts, reports
/// `degraded` on `/health` and answers downloads with a configuration error.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub upstream: UpstreamConfig,
}

/// Where the catalog lives and how to authenticate against it.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub api_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_url", &self.api_url)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl UpstreamConfig {
    /// Both credentials, or `None` if either is missing.
    pub fn credentials(&self) -> Option<ApiCredentials> {
        Some(ApiCredentials {
            client_id: self.client_id.clone()?,
            client_secret: self.client_secret.clone()?,
        })
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                        |
    /// |---------------------------|--------------------------------|
    /// | `HOST`                    | `0.0.0.0`                      |
    /// | `PORT`                    | `3000`                         |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                           |
    /// | `ICONSCOUT_API_URL`       | `https://api.iconscout.com/v3` |
    /// | `ICONSCOUT_CLIENT_ID`     | unset                          |
    /// | `ICONSCOUT_CLIENT_SECRET` | unset                          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let secret = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("HOST", "0.0.0.0");

        let port_raw = var("PORT", "3000");
        let port: u16 = port_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var: "PORT",
            expected: "a valid u16",
            value: port_raw.clone(),
        })?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let timeout_raw = var("REQUEST_TIMEOUT_SECS", "30");
        let request_timeout_secs: u64 =
            timeout_raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                expected: "a valid u64",
                value: timeout_raw.clone(),
            })?;

        let upstream = UpstreamConfig {
            api_url: secret("ICONSCOUT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            client_id: secret("ICONSCOUT_CLIENT_ID"),
            client_secret: secret("ICONSCOUT_CLIENT_SECRET"),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upstream,
        })
    }
}
