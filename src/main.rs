//! Windward main entry point
//!
//! This is the command-line interface for the Windward listing harvester.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use windward::config::load_config_with_hash;
use windward::extract::schema::ALL_COLUMNS;

/// Windward: a resilient harvester for sailing-vessel listings
///
/// Windward fetches listing pages through a rotating pool of client
/// identities with adaptive backoff and appends one fixed-schema record
/// per listing to a durable CSV table. Interrupted runs resume from the
/// last row already written.
#[derive(Parser, Debug)]
#[command(name = "windward")]
#[command(version = "1.0.0")]
#[command(about = "A resilient harvester for sailing-vessel listings", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Truncate the output table and start from the beginning
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be processed without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("configuration loaded (hash: {config_hash})");

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    let stats = windward::runner::run(config, cli.fresh)
        .await
        .context("harvest run failed")?;

    println!(
        "Done: {} records appended, {} pages skipped, {} URLs failed",
        stats.appended, stats.skipped, stats.failed
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("windward=info,warn"),
            1 => EnvFilter::new("windward=debug,info"),
            2 => EnvFilter::new("windward=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &windward::Config) -> anyhow::Result<()> {
    println!("=== Windward Dry Run ===\n");

    println!("Input:");
    println!("  URL list: {}", config.input.url_list_path);

    println!("\nOutput:");
    println!("  Table: {}", config.output.table_path);
    println!("  Columns: {}", ALL_COLUMNS.len());

    println!("\nFetch:");
    println!("  Max attempts per URL: {}", config.fetch.max_attempts);
    println!("  Identity pool size: {}", config.fetch.pool_size);

    let urls = windward::input::read_url_list(std::path::Path::new(&config.input.url_list_path))
        .context("failed to read URL list")?;
    let offset = windward::output::compute_start_offset(
        &urls,
        std::path::Path::new(&config.output.table_path),
    );

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would process {} of {} URLs (resuming at offset {offset})",
        urls.len() - offset,
        urls.len()
    );

    Ok(())
}
