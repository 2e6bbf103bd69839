use clap::{Args, Parser, Subcommand};
use scout_core::filters::{is_known_value, FilterDimension, SelectedFilters};
use scout_core::intent::SearchIntent;

#[derive(Parser, Debug)]
#[command(author, version, about = "Search the asset catalog from the terminal", long_about = None)]
pub struct Cli {
    /// Print the published state as JSON instead of a listing.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search and print results, loading more pages on request.
    Search {
        #[command(flatten)]
        search: SearchArgs,

        /// Number of pages to load (each "load more" appends a page).
        #[arg(short = 'p', long = "pages", default_value_t = 1)]
        pages: u32,
    },

    /// Download one asset from the first result page and open the link.
    Download {
        #[command(flatten)]
        search: SearchArgs,

        /// 1-based position in the result listing.
        #[arg(short = 'i', long = "index")]
        index: usize,
    },

    /// Manage favorited assets.
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// List favorited asset uuids.
    List,

    /// Add or remove one asset from the first result page.
    Toggle {
        #[command(flatten)]
        search: SearchArgs,

        /// 1-based position in the result listing.
        #[arg(short = 'i', long = "index")]
        index: usize,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Search text.
    pub query: Option<String>,

    /// Asset type: all, 3d, lottie, illustration, icon.
    #[arg(long, value_parser = known(FilterDimension::Asset))]
    pub asset: Option<String>,

    /// Navigation label, e.g. "Lottie Animations". Overrides --asset.
    #[arg(long, conflicts_with = "asset")]
    pub nav: Option<String>,

    /// Price: all, free, premium.
    #[arg(long, value_parser = known(FilterDimension::Price))]
    pub price: Option<String>,

    /// Sort: popular, latest, featured, relevant.
    #[arg(long, value_parser = known(FilterDimension::Sort))]
    pub sort: Option<String>,

    /// Free-form category slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Free-form style slug.
    #[arg(long)]
    pub style: Option<String>,
}

/// Value parser accepting only catalog values for `dimension`.
fn known(
    dimension: FilterDimension,
) -> impl Fn(&str) -> Result<String, String> + Clone + Send + Sync + 'static {
    move |value| {
        if is_known_value(dimension, value) {
            Ok(value.to_string())
        } else {
            Err(format!("unknown {} value '{value}'", dimension.as_str()))
        }
    }
}

impl SearchArgs {
    /// The search intent these arguments describe (page 1).
    pub fn intent(&self) -> SearchIntent {
        let mut filters = SelectedFilters::default();
        let pairs = [
            (FilterDimension::Asset, &self.asset),
            (FilterDimension::Price, &self.price),
            (FilterDimension::Sort, &self.sort),
            (FilterDimension::Category, &self.category),
            (FilterDimension::Style, &self.style),
        ];
        for (dimension, value) in pairs {
            if let Some(value) = value {
                filters.set(dimension, value.as_str());
            }
        }

        SearchIntent {
            query: self.query.clone().unwrap_or_default(),
            filters,
            page: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("scout").chain(args.iter().copied()))
    }

    #[test]
    fn search_with_filters() {
        let cli = parse(&["search", "sun", "--price", "free", "--pages", "3"]).unwrap();
        let Command::Search { search, pages } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(pages, 3);

        let intent = search.intent();
        assert_eq!(intent.query, "sun");
        assert_eq!(intent.filters.price, "free");
        assert_eq!(intent.filters.sort, "popular");
        assert_eq!(intent.page, 1);
    }

    #[test]
    fn unknown_filter_value_is_rejected() {
        assert!(parse(&["search", "--price", "cheap"]).is_err());
        assert!(parse(&["search", "--sort", "random"]).is_err());
    }

    #[test]
    fn nav_conflicts_with_asset() {
        assert!(parse(&["search", "--asset", "icon", "--nav", "Icons"]).is_err());
    }

    #[test]
    fn download_requires_index() {
        assert!(parse(&["download", "sun"]).is_err());
        let cli = parse(&["download", "sun", "-i", "2", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Download { index: 2, .. }));
    }

    #[test]
    fn favorites_subcommands() {
        assert!(matches!(
            parse(&["favorites", "list"]).unwrap().command,
            Command::Favorites(FavoritesCommand::List)
        ));
        assert!(matches!(
            parse(&["favorites", "toggle", "moon", "--index", "1"]).unwrap().command,
            Command::Favorites(FavoritesCommand::Toggle { index: 1, .. })
        ));
    }

    #[test]
    fn category_all_is_not_restricting() {
        let cli = parse(&["search", "--category", "all", "--style", "flat"]).unwrap();
        let Command::Search { search, .. } = cli.command else {
            panic!("expected search");
        };
        let intent = search.intent();
        assert_eq!(intent.filters.category, None);
        assert_eq!(intent.filters.style.as_deref(), Some("flat"));
    }
}
