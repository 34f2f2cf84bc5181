//! Command-line interface for rom-minder.
//!
//! One flat flag surface drives the three run modes: sort (default),
//! remerge, and the read-only language census.

mod commands;

pub use commands::{Cli, Mode, run};
