//! `scout`: terminal front end for the asset catalog.

mod args;
mod render;

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scout_core::asset::Asset;
use scout_search::config::SearchConfig;
use scout_search::favorites::{FavoritesStore, JsonFileStore};
use scout_search::{CoordinatorBuilder, SearchCoordinator, SearchOutcome, SearchState};

use args::{Cli, Command, FavoritesCommand, SearchArgs};
use render::render_state;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = SearchConfig::from_env();
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Command::Search { search, pages } => run_search(&config, &search, pages, cli.json).await,
        Command::Download { search, index } => run_download(&config, &search, index).await,
        Command::Favorites(FavoritesCommand::List) => {
            let favorites = FavoritesStore::open(JsonFileStore::new(&config.favorites_path));
            let mut out = io::stdout().lock();
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(favorites.list())?)?;
            } else {
                writeln!(out, "{} favorites", favorites.count())?;
                for uuid in favorites.list() {
                    writeln!(out, "  {uuid}")?;
                }
            }
            Ok(())
        }
        Command::Favorites(FavoritesCommand::Toggle { search, index }) => {
            let coordinator = first_page(&config, &search).await?;
            let asset = pick(&coordinator.state(), index)?;
            let mut favorites = FavoritesStore::open(JsonFileStore::new(&config.favorites_path));
            let now_favorite = favorites.toggle(&asset)?;
            let verb = if now_favorite { "Added" } else { "Removed" };
            println!("{verb} {} ({})", asset.title, asset.uuid);
            Ok(())
        }
    }
}

/// Build a coordinator for `search` and run the first page.
async fn first_page(config: &SearchConfig, search: &SearchArgs) -> Result<SearchCoordinator> {
    let coordinator = CoordinatorBuilder::from_config(config)
        .context("Invalid catalog or proxy URL")?
        .intent(search.intent())
        .build();

    let outcome = match &search.nav {
        Some(label) => coordinator.set_category(label).await,
        None => coordinator.start().await,
    };
    tracing::debug!(?outcome, "First page");

    if let Some(error) = coordinator.state().error {
        bail!(error);
    }
    Ok(coordinator)
}

async fn run_search(config: &SearchConfig, search: &SearchArgs, pages: u32, json: bool) -> Result<()> {
    let coordinator = first_page(config, search).await?;
    let favorites = FavoritesStore::open(JsonFileStore::new(&config.favorites_path));
    let view = coordinator.subscribe();

    for page in 1..=pages.max(1) {
        if page > 1 && coordinator.load_more().await == SearchOutcome::Skipped {
            break;
        }
        let state = view.snapshot();
        let mut out = io::stdout().lock();
        if json {
            writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
        } else {
            render_state(&mut out, &state, |uuid| favorites.is_favorite(uuid))?;
        }
        if let Some(error) = state.error {
            bail!(error);
        }
    }
    Ok(())
}

async fn run_download(config: &SearchConfig, search: &SearchArgs, index: usize) -> Result<()> {
    let coordinator = first_page(config, search).await?;
    let asset = pick(&coordinator.state(), index)?;

    let link = coordinator.download_asset(&asset).await?;
    println!("Opened {} ({})", link.download_url, link.format);
    if let Some(expires_at) = link.expires_at {
        println!("Link expires at {expires_at}");
    }
    Ok(())
}

/// The `index`-th (1-based) asset of the current results.
fn pick(state: &SearchState, index: usize) -> Result<Asset> {
    let assets = &state.results.assets;
    index
        .checked_sub(1)
        .and_then(|i| assets.get(i))
        .cloned()
        .with_context(|| format!("No result at index {index} ({} results)", assets.len()))
}
