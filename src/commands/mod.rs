//! Command handlers for the `sessdex` binary
//!
//! Each handler takes the loaded configuration plus its CLI arguments,
//! prints to stdout, and logs through `tracing`. Lookup and per-record
//! failures are reported as messages, not returned as errors, so the
//! process exits 0 in normal operation.

pub mod content;
pub mod repair;
pub mod search;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;

/// Dispatch to the handler selected by the CLI flags
///
/// `--repair` wins over `--content`, which wins over searching.
pub fn run(config: &Config, cli: &Cli) -> Result<()> {
    if cli.repair {
        tracing::info!("Starting repair mode");
        return repair::run_repair(config);
    }

    if let Some(session_id) = &cli.content {
        tracing::info!("Showing content for session {}", session_id);
        return content::show_content(config, session_id);
    }

    search::run_search(config, &search::SearchArgs::from(cli))
}
