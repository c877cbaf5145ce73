//! USNews-Ranker main entry point
//!
//! This is the command-line interface for the USNews-Ranker collector.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use usnews_ranker::config::{load_config_with_hash, Config};
use usnews_ranker::crawler::{Ranker, RunMode, RunOptions, RunOutcome, TransportFailure};
use usnews_ranker::OutputFormat;

/// USNews-Ranker: collects the U.S. News college rankings
///
/// Pages through the ranking search API and writes one table with rank,
/// name, state, tuition, acceptance rate, test ranges and reputation scores.
#[derive(Parser, Debug)]
#[command(name = "usnews-ranker")]
#[command(version = "1.0.0")]
#[command(about = "Collects data from usnews and generates an excel file", long_about = None)]
struct Cli {
    /// The output file name without extension
    #[arg(value_name = "OUTPUTFILENAME")]
    outputfilename: String,

    /// The pause time between loading pages from usnews. Minimum pause time is 1 sec.
    #[arg(short, long, allow_negative_numbers = true)]
    pause: Option<i64>,

    /// The format of the output file
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// The page number from which the scraper starts working
    #[arg(short, long, allow_negative_numbers = true)]
    start: Option<i64>,

    /// The page number up to which the scraper works
    #[arg(short, long, allow_negative_numbers = true)]
    end: Option<i64>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_run_config(&cli)?;
    let options = RunOptions {
        config,
        output_name: cli.outputfilename.clone(),
        output_dir: PathBuf::from("."),
    };

    let mut ranker = Ranker::new(options).context("Failed to prepare the run")?;

    if !cli.quiet {
        println!("\nCollecting data from U.S.News...");
    }

    match ranker.run(RunMode::Standalone).await? {
        RunOutcome::Exported(report) => {
            if let Some(failure) = &report.interrupted {
                print_request_error(failure);
            }
            if !cli.quiet {
                println!(
                    "Pages {} to {}: {} stored, {} records",
                    report.range.start, report.range.end, report.pages_stored, report.records
                );
                println!("✓ Saved to {}", report.output.display());
            }
        }
        RunOutcome::Aborted(failure) => {
            print_request_error(&failure);
        }
    }

    Ok(())
}

/// Loads the configuration file, if any, and applies command-line overrides
fn load_run_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(pause) = cli.pause {
        config.run.pause_secs = pause;
    }
    if let Some(format) = cli.format {
        config.run.format = format;
    }
    if let Some(start) = cli.start {
        config.run.start_page = start;
    }
    if let Some(end) = cli.end {
        config.run.end_page = end;
    }

    Ok(config)
}

/// Prints the diagnostics for a request the source refused
fn print_request_error(failure: &TransportFailure) {
    println!("An error occured while processing the url :\n{}", failure.url);
    match failure.status {
        Some(status) => println!("Status Code : {}\n\n", status),
        None => println!("Error : {}\n\n", failure.message),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("usnews_ranker=info,warn"),
            1 => EnvFilter::new("usnews_ranker=debug,info"),
            2 => EnvFilter::new("usnews_ranker=trace,debug"),
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
