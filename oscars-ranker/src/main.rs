//! oscars-ranker - Academy Award nominee ranking
//!
//! Fetches the nominations dataset, enriches picture nominees with OMDb
//! metadata, rebuilds the local SQLite store and ranks nominees by a chosen
//! metric on the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use oscars_common::config::{
    CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig, OMDB_API_KEY_ENV,
};
use oscars_ranker::cache::CacheStore;
use oscars_ranker::cli::{TextBarRenderer, UserPrompt};
use oscars_ranker::config::{build_datapackage_client, build_omdb_client, resolve_omdb_api_key};
use oscars_ranker::services::{reconcile, retrieve_with_cache, Sources};
use oscars_ranker::PipelineError;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Rank Oscar nominees by runtime and ratings
#[derive(Parser, Debug)]
#[command(name = "oscars-ranker", version, about)]
struct Args {
    /// Folder holding the SQLite store and JSON cache
    #[arg(long, value_name = "DIR")]
    root_folder: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// OMDb API key, only needed when the cache is empty
    #[arg(long, env = OMDB_API_KEY_ENV, hide_env_values = true)]
    omdb_api_key: Option<String>,

    /// Discard the cache and fetch everything again
    #[arg(long)]
    refresh: bool,

    /// Rebuild the store and exit without prompting
    #[arg(long)]
    no_prompt: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&toml_config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!("Starting oscars-ranker");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let defaults = CompiledDefaults::for_current_platform();

    // Step 1: Resolve root folder and make sure it exists
    let root_folder = RootFolderResolver::new(args.root_folder.clone(), toml_config.root_folder.clone())
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;
    info!("Root folder: {}", initializer.root_folder().display());

    // Step 2: Load the cache, fetching whatever is missing
    let store = CacheStore::new(initializer.cache_path());
    if args.refresh {
        info!("Refresh requested, clearing cache");
        store.clear().context("Failed to clear cache")?;
    }

    let cache = retrieve_with_cache(&store, || {
        let api_key = resolve_omdb_api_key(args.omdb_api_key.as_deref(), &toml_config)?;
        let awards = build_datapackage_client(&toml_config, &defaults)
            .map_err(|e| PipelineError::SourceUnavailable(e.to_string()))?;
        let movies = build_omdb_client(api_key, &toml_config, &defaults)
            .map_err(|e| PipelineError::SourceUnavailable(e.to_string()))?;
        Ok(Sources {
            awards: Box::new(awards),
            movies: Box::new(movies),
        })
    })
    .await
    .context("Failed to retrieve awards and movie data")?;

    // Step 3: Rebuild the store from the cache
    let db_path = initializer.database_path();
    info!("Database: {}", db_path.display());
    let pool = oscars_ranker::db::init_database_pool(&db_path)
        .await
        .context("Failed to open database")?;

    let summary = reconcile(&pool, &cache)
        .await
        .context("Failed to populate database")?;
    info!(
        movies = summary.movies.inserted,
        awards = summary.awards.inserted,
        linked = summary.awards.linked,
        "Database ready"
    );

    if args.no_prompt {
        return Ok(());
    }

    // Step 4: Interactive ranking
    let stdin = io::stdin();
    let mut renderer = TextBarRenderer::new(io::stdout());
    let mut prompt = UserPrompt::new(stdin.lock(), io::stdout());
    prompt
        .run(&pool, &mut renderer)
        .await
        .context("Interactive session failed")?;

    pool.close().await;
    Ok(())
}
