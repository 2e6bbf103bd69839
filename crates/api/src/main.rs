use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scout_api::config::{ConfigError, ServerConfig};
use scout_api::router::build_app_router;
use scout_api::state::AppState;
use scout_client::upstream::DownloadClient;
use scout_client::ClientError;

/// Anything that stops the proxy from coming up or keeps it from serving.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("ICONSCOUT_API_URL is not a usable base URL: {0}")]
    CatalogUrl(#[from] ClientError),
    #[error("HOST '{0}' is not an IP address")]
    Host(String),
    #[error("Server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scout_api=debug,scout_client=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = serve().await {
        tracing::error!(error = %err, "Download proxy stopped");
        std::process::exit(1);
    }
}

async fn serve() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    match config.upstream.credentials() {
        Some(creds) => tracing::info!(client_id = %creds.client_id, "Catalog credentials loaded"),
        None => tracing::warn!("Catalog credentials missing, download requests will fail"),
    }

    let downloads = DownloadClient::new(&config.upstream.api_url)?;
    let state = AppState {
        config: Arc::new(config.clone()),
        downloads: Arc::new(downloads),
    };
    let app = build_app_router(state, &config)?;

    let ip: IpAddr = config
        .host
        .parse()
        .map_err(|_| StartupError::Host(config.host.clone()))?;
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, api_url = %config.upstream.api_url, "Download proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_stop())
        .await?;

    tracing::info!("Download proxy shut down");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn wait_for_stop() {
    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!(signal = "SIGINT", "Draining connections"),
        () = terminate => tracing::info!(signal = "SIGTERM", "Draining connections"),
    }
}
