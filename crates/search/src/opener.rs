//! Opening download links.

/// Opens a URL on behalf of the user.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Hands the URL to the platform's default handler (browser).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        tracing::info!(url, "Opening download link");
        open::that_detached(url)
    }
}
