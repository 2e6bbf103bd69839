/// Errors from building or sending catalog requests.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("API request failed: {status} - {body}")]
    Status { status: u16, body: String },

    /// A configured base URL cannot be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A credential contains characters not allowed in a header.
    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),
}

/// Errors from the catalog's download endpoint, classified by status.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Invalid API credentials")]
    Unauthorized,

    #[error("Asset not found")]
    NotFound,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Any other non-2xx status; `reason` is the canonical status text.
    #[error("Download failed: {reason}")]
    Status { status: u16, reason: String },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Client(ClientError::Request(err))
    }
}

/// Errors a front end sees when asking the proxy for a download link.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The proxy answered with an error status and message.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The proxy answered 2xx but reported `success: false`.
    #[error("Download request failed")]
    Unsuccessful,

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        DownloadError::Client(ClientError::Request(err))
    }
}
