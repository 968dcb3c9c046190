//! dirstats - directory tree statistics.
//!
//! Usage:
//!   dirstats [PATH]                 Summary of the tree under PATH
//!   dirstats [PATH] --format csv    Snapshot time series as CSV
//!   dirstats [PATH] --format json   Full report as JSON
//!   dirstats --help                 Show help

mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use dirstats_core::{DEFAULT_SAMPLE_INTERVAL, WalkConfig};
use dirstats_scan::StatsScanner;

use crate::render::Palette;

#[derive(Parser)]
#[command(
    name = "dirstats",
    version,
    about = "Directory tree statistics",
    long_about = "dirstats walks a directory tree without following symlinks and reports \
                  entry counts, path lengths and sizes.\n\n\
                  Every N visited entries the running totals are sampled; `--format csv` \
                  prints those samples as a time series of the walk."
)]
struct Cli {
    /// Path to walk (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Number of visited entries between two samples
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_INTERVAL)]
    interval: u64,

    /// Visit directory entries in name order instead of native listing order
    #[arg(short, long)]
    sorted: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Truncate the human readable total size to this many decimals
    #[arg(short, long)]
    decimals: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log every unreadable entry to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = WalkConfig::builder()
        .root(cli.path.clone())
        .sample_interval(cli.interval)
        .sort_children(cli.sorted)
        .build()
        .context("Invalid configuration")?;

    let report = StatsScanner::new()
        .scan(&config)
        .with_context(|| format!("Scan of {} failed", cli.path.display()))?;

    if report.has_errors() {
        warn!(
            errors = report.stats.error_count,
            "some entries could not be read"
        );
    }

    match cli.format {
        OutputFormat::Text => {
            let palette = Palette::new(!cli.no_color && std::io::stdout().is_terminal());
            print!("{}", render::summary(&report.stats, cli.decimals, palette));
        }
        OutputFormat::Csv => {
            print!("{}", render::csv(&report.snapshots));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Filter used when `RUST_LOG` is not set.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "dirstats=debug,dirstats_scan=debug,warn"
    } else {
        "warn"
    }
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
