//! rom-minder - sort, remerge, and analyze ROM libraries by language.
//!
//! Infers language/region tags from ROM filenames and relocates files that
//! miss the keep-set into a structure-mirroring quarantine directory, with
//! an exact inverse (remerge) and a read-only census report.

pub mod census;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod mover;
pub mod planner;
pub mod report;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("rom_minder=info".parse().unwrap()))
        .init();

    cli::run(cli)
}
