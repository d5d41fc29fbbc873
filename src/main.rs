//! Shelf-Scrape main entry point
//!
//! This is the command-line interface for the Shelf-Scrape book catalog scraper.

use anyhow::Context;
use clap::Parser;
use shelf_scrape::config::{load_config_with_hash, Config};
use shelf_scrape::crawler::{scrape, spawn_daily, DailySchedule};
use shelf_scrape::Scraper;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Shelf-Scrape: a book catalog scraper
///
/// Walks the catalog page by page, extracts a record for every listed book,
/// and writes the records to a text file. Runs once, or daily on a schedule.
#[derive(Parser, Debug)]
#[command(name = "shelf-scrape")]
#[command(version)]
#[command(about = "A book catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// First catalog page to scrape (defaults to 1)
    #[arg(long, value_name = "PAGE", conflicts_with = "schedule")]
    from: Option<u32>,

    /// Last catalog page to scrape (defaults to the last page)
    #[arg(long, value_name = "PAGE", conflicts_with = "schedule")]
    to: Option<u32>,

    /// Do not write records to the output file
    #[arg(long, conflicts_with = "schedule")]
    no_save: bool,

    /// Override the output file path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Run the full scrape every day at the configured time until interrupted
    #[arg(long)]
    schedule: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output.records_path = output.display().to_string();
    }

    if cli.schedule {
        handle_schedule(config).await
    } else {
        handle_scrape(config, !cli.no_save, cli.from, cli.to).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_scrape=info,warn"),
            1 => EnvFilter::new("shelf_scrape=debug,info"),
            2 => EnvFilter::new("shelf_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles a one-shot scrape over the requested pages
async fn handle_scrape(
    config: Config,
    persist: bool,
    from: Option<u32>,
    to: Option<u32>,
) -> anyhow::Result<()> {
    let (records, stats) = scrape(&config, persist, from, to)
        .await
        .context("scrape failed")?;

    if persist && !stats.persisted {
        anyhow::bail!(
            "scraped {} books but could not write them to {}",
            records.len(),
            config.output.records_path
        );
    }

    if persist {
        println!(
            "✓ Scraped {} books into {}",
            records.len(),
            config.output.records_path
        );
    } else {
        println!("✓ Scraped {} books", records.len());
    }

    Ok(())
}

/// Handles the --schedule mode: daily runs until Ctrl-C
async fn handle_schedule(config: Config) -> anyhow::Result<()> {
    let schedule = DailySchedule::from_config(&config.schedule)?;
    let scraper = Arc::new(Scraper::new(&config)?);

    tracing::info!(
        "Scheduling daily scrape at {} (checking every {:?}), press Ctrl-C to stop",
        schedule.at.format("%H:%M"),
        schedule.poll_interval
    );
    let handle = spawn_daily(scraper, schedule);

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;

    tracing::info!("Interrupted, stopping scheduler");
    handle.stop().await;

    Ok(())
}
