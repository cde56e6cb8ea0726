//! ptcg-sets - Set → Pokémon dataset builder
//!
//! Two front ends produce the same artifact:
//! - `build`: from a local clone of the catalog data repository
//! - `fetch`: from the remote catalog API, resumable across runs
//!
//! Settings resolve CLI → environment → TOML config → default.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ptcg_common::config;
use ptcg_sets::services::catalog_client::{
    CatalogClient, CatalogClientConfig, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS,
};
use ptcg_sets::services::retry::RetryPolicy;
use ptcg_sets::services::set_lister::SeriesFilter;
use ptcg_sets::workflow::{self, LocalLayout, RemoteOptions, RunSummary};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Command-line arguments for ptcg-sets
#[derive(Parser, Debug)]
#[command(name = "ptcg-sets")]
#[command(about = "Build a set → Pokémon mapping from the Pokémon TCG catalog")]
#[command(version)]
struct Args {
    /// TOML config file (default: <config dir>/ptcg/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output artifact path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Series to include (repeatable, case-insensitive); omit for all series
    #[arg(short, long = "series", value_name = "NAME")]
    series: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build from the local catalog mirror (no API calls)
    Build {
        /// Root of the cloned pokemon-tcg-data repository
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Fetch from the remote catalog API, resuming a previous run
    Fetch {
        /// Catalog API base URL
        #[arg(long, env = "PTCG_API_BASE")]
        api_base: Option<String>,

        /// File holding the API key (used when POKEMON_TCG_API_KEY is unset)
        #[arg(long, value_name = "FILE")]
        api_key_file: Option<PathBuf>,

        /// Cards requested per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// Attempts per request before giving up
        #[arg(long, default_value_t = 3)]
        max_retries: u32,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },
}

fn init_tracing(level: &str) {
    let level = level.to_lowercase();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("ptcg_sets={},ptcg_common={}", level, level).into()
            }),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Parsed before tracing starts so its log level can apply; the outcome
    // is reported below
    let config_file = config::config_path(args.config.as_deref());
    let loaded = match &config_file {
        Some(path) => config::load_toml_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => None,
    };
    let found = loaded.is_some();
    let toml_config = loaded.unwrap_or_default();

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| toml_config.logging.level.clone());
    init_tracing(&log_level);

    info!("ptcg-sets v{}", env!("CARGO_PKG_VERSION"));
    match &config_file {
        Some(path) if found => info!("Loaded config from {}", path.display()),
        Some(path) => warn!("Config file not found: {} (using defaults)", path.display()),
        None => {}
    }

    let output = config::resolve_path(
        args.output.as_deref(),
        "PTCG_OUTPUT",
        toml_config.output.as_deref(),
        config::DEFAULT_OUTPUT_FILE,
    );

    let filter = if args.series.is_empty() {
        SeriesFilter::from_names(toml_config.series.clone().unwrap_or_default())
    } else {
        SeriesFilter::from_names(args.series.clone())
    };

    if filter.is_all() {
        info!("Processing ALL series");
    } else {
        info!("Filtering to series: {}", filter);
    }

    let outcome = match args.command {
        Command::Build { data_dir } => {
            let data_dir = config::resolve_path(
                data_dir.as_deref(),
                "PTCG_DATA_DIR",
                toml_config.data_dir.as_deref(),
                config::DEFAULT_DATA_DIR,
            );
            info!("Data directory: {}", data_dir.display());

            workflow::run_local_from_dir(&LocalLayout::new(data_dir), &filter, &output)
                .context("Local build failed")?
        }
        Command::Fetch {
            api_base,
            api_key_file,
            page_size,
            max_retries,
            timeout_secs,
        } => {
            let key_file = api_key_file
                .or_else(|| toml_config.api_key_file.clone())
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_API_KEY_FILE));

            let client = CatalogClient::new(CatalogClientConfig {
                base_url: api_base
                    .or_else(|| toml_config.api_base.clone())
                    .unwrap_or_else(|| config::DEFAULT_API_BASE.to_string()),
                api_key: config::resolve_api_key(&key_file),
                timeout: Duration::from_secs(timeout_secs),
                retry: RetryPolicy::new(max_retries, Duration::from_secs(1)),
            })
            .context("Failed to create catalog client")?;
            info!("Catalog API: {}", client.base_url());

            let options = RemoteOptions {
                output: output.clone(),
                page_size,
                ..Default::default()
            };

            workflow::run_remote(&client, &filter, &options)
                .await
                .context("Remote fetch failed")?
        }
    };

    info!("Output file: {}", output.display());
    let summary = RunSummary::from_outcome(&outcome);
    summary.log();
    if summary.has_failures() {
        warn!("Re-run to retry the failed sets; completed sets are kept");
    }

    Ok(())
}
