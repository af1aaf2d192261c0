//! CLI command implementations

use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use reelscout_core::{ReelscoutConfig, RuntimeMode};
use reelscout_search::{Movie, MovieSearchService};
use reelscout_trending::{TrendingEntry, TrendingService};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web UI
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory served under /static
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Fetch movies for a term once, counting it like a UI search
    Search {
        /// Search term; omit for the popular listing
        #[arg(default_value = "")]
        term: String,
    },
    /// Show the most searched terms
    Trending {
        /// Number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the error of whichever command fails
pub async fn handle_command(
    command: Commands,
    mut config: ReelscoutConfig,
    mode: RuntimeMode,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(static_dir) = static_dir {
                config.server.static_dir = static_dir;
            }
            reelscout_web::run_server(config, mode)
                .await
                .context("Web server failed")
        }
        Commands::Search { term } => search(&term, &config, mode).await,
        Commands::Trending { limit } => {
            let limit = limit.unwrap_or(config.search.trending_limit);
            trending(limit, &config, mode).await
        }
    }
}

/// Fetches one listing and prints it.
///
/// A non-empty term with results is counted in the trending store, same as
/// a committed search in the UI. Process-local stores are skipped since the
/// count would be dropped when the command exits.
///
/// # Errors
/// - Catalog setup or fetch failure
pub async fn search(term: &str, config: &ReelscoutConfig, mode: RuntimeMode) -> anyhow::Result<()> {
    let search = MovieSearchService::from_runtime_mode(mode, &config.catalog)?;
    let movies = search
        .fetch_movies(term)
        .await
        .with_context(|| format!("Failed to fetch movies for '{term}'"))?;

    if term.is_empty() {
        println!("Popular movies ({})", search.provider_name());
    } else {
        println!("Results for '{term}' ({})", search.provider_name());
    }
    println!("{:-<72}", "");

    if movies.is_empty() {
        println!("No movies found.");
        return Ok(());
    }
    for movie in &movies {
        println!("{}", movie_line(movie));
    }

    if let Some(top) = movies.first().filter(|_| !term.is_empty()) {
        let trending = TrendingService::from_runtime_mode(mode, &config.appwrite, &config.catalog)?;
        if let Some(note) = unrecorded_note(&trending) {
            tracing::info!(
                store = trending.store_name(),
                "Trending store not kept between runs, search not recorded"
            );
            println!("{note}");
        } else if let Err(e) = trending.record_search(term, top).await {
            tracing::warn!(term = %term, error = %e, "Failed to record search");
        }
    }

    Ok(())
}

/// Prints the most searched terms.
///
/// # Errors
/// - Analytics store setup or query failure
pub async fn trending(limit: usize, config: &ReelscoutConfig, mode: RuntimeMode) -> anyhow::Result<()> {
    let trending = TrendingService::from_runtime_mode(mode, &config.appwrite, &config.catalog)?;
    let entries = trending
        .get_trending(limit)
        .await
        .context("Failed to load trending searches")?;

    println!("Trending searches ({})", trending.store_name());
    println!("{:-<72}", "");

    if entries.is_empty() {
        println!("{}", empty_trending_message(&trending));
    }
    for (rank, entry) in entries.iter().enumerate() {
        println!("{}", trending_line(rank + 1, entry));
    }

    Ok(())
}

fn movie_line(movie: &Movie) -> String {
    format!(
        "{:<44} {:>4}  {:>4}  {}",
        movie.title,
        movie.rating_label(),
        movie.release_year().unwrap_or("N/A"),
        movie.language_label()
    )
}

fn trending_line(rank: usize, entry: &TrendingEntry) -> String {
    format!("{rank:>2}. {:<40} {:>6}", entry.search_term, entry.count)
}

/// Explains why a search was not counted, or `None` when it will be.
fn unrecorded_note(trending: &TrendingService) -> Option<String> {
    (!trending.is_persistent()).then(|| {
        format!(
            "Search not counted: the {} trending store is not kept between runs.",
            trending.store_name()
        )
    })
}

fn empty_trending_message(trending: &TrendingService) -> &'static str {
    if trending.is_persistent() {
        "Nothing trending yet."
    } else {
        "Nothing trending yet. Development mode keeps trending searches in memory \
         only, so run with --mode production and Appwrite settings to see history."
    }
}
