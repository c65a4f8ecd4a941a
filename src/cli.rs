//! Shared setup for the command-line tools.

use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::batch::{BatchOptions, BatchReport};

/// Flags accepted by both tools.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Print the batch report as JSON instead of progress lines
    #[arg(long)]
    pub json: bool,
}

impl CommonArgs {
    pub fn options(&self) -> BatchOptions {
        BatchOptions {
            dry_run: self.dry_run,
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`), so stdout only
/// carries progress output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_json(report: &BatchReport) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
