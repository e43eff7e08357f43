//! Command-line interface definition for Sessdex
//!
//! This module defines the CLI structure using clap's derive API. The tool
//! has a single flat surface: search filters plus the `--content` and
//! `--repair` modes, which short-circuit the search.

use clap::Parser;
use std::path::PathBuf;

/// Sessdex - search recorded session metadata
///
/// Filters the JSON metadata records in a session directory by tag, date,
/// keyword, status and type, and prints the matches newest first.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sessdex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "SESSDEX_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the metadata directory
    #[arg(long)]
    pub metadata_dir: Option<PathBuf>,

    /// Override the sessions directory used for relative transcript paths
    #[arg(long)]
    pub sessions_dir: Option<PathBuf>,

    /// Search by tag (comma-separated, any one matches)
    #[arg(long)]
    pub tag: Option<String>,

    /// Search by date (any timestamp substring, e.g. YYYY-MM)
    #[arg(long)]
    pub date: Option<String>,

    /// Search by keyword in session name and summary
    #[arg(long)]
    pub keyword: Option<String>,

    /// Enable fuzzy keyword matching
    #[arg(long)]
    pub fuzzy: bool,

    /// Fuzzy match threshold (0-100); defaults to the configured value
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fuzzy_threshold: Option<u8>,

    /// Search by status (e.g. completed, in_progress)
    #[arg(long)]
    pub status: Option<String>,

    /// Search by session type (e.g. regular, checkpoint, finalize)
    #[arg(long = "type")]
    pub session_type: Option<String>,

    /// Show only the N most recent sessions
    #[arg(long)]
    pub recent: Option<usize>,

    /// Show file path and session id for each result
    #[arg(long)]
    pub detail: bool,

    /// Show statistics for the results
    #[arg(long)]
    pub stats: bool,

    /// Print results as JSON instead of the formatted list
    #[arg(long)]
    pub json: bool,

    /// Show the full transcript of the given session id
    #[arg(long, value_name = "SESSION_ID")]
    pub content: Option<String>,

    /// Quarantine corrupted metadata files and exit
    #[arg(long)]
    pub repair: bool,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, None);
        assert!(!cli.verbose);
        assert!(!cli.repair);
        assert_eq!(cli.content, None);
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["sessdex"]).unwrap();
        assert_eq!(cli.tag, None);
        assert_eq!(cli.recent, None);
        assert!(!cli.fuzzy);
    }

    #[test]
    fn test_cli_parse_filters() {
        let cli = Cli::try_parse_from([
            "sessdex",
            "--tag",
            "frontend,api",
            "--date",
            "2025-06",
            "--keyword",
            "シフト",
            "--status",
            "completed",
            "--type",
            "checkpoint",
            "--recent",
            "10",
        ])
        .unwrap();

        assert_eq!(cli.tag.as_deref(), Some("frontend,api"));
        assert_eq!(cli.date.as_deref(), Some("2025-06"));
        assert_eq!(cli.keyword.as_deref(), Some("シフト"));
        assert_eq!(cli.status.as_deref(), Some("completed"));
        assert_eq!(cli.session_type.as_deref(), Some("checkpoint"));
        assert_eq!(cli.recent, Some(10));
    }

    #[test]
    fn test_cli_parse_fuzzy_threshold() {
        let cli = Cli::try_parse_from([
            "sessdex",
            "--keyword",
            "calender",
            "--fuzzy",
            "--fuzzy-threshold",
            "80",
        ])
        .unwrap();
        assert!(cli.fuzzy);
        assert_eq!(cli.fuzzy_threshold, Some(80));
    }

    #[test]
    fn test_cli_rejects_threshold_above_100() {
        let cli = Cli::try_parse_from(["sessdex", "--fuzzy-threshold", "101"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_modes_and_flags() {
        let cli = Cli::try_parse_from([
            "sessdex",
            "--repair",
            "--content",
            "20250601_0900",
            "--detail",
            "--stats",
            "--json",
            "--metadata-dir",
            "/tmp/meta",
        ])
        .unwrap();
        assert!(cli.repair);
        assert_eq!(cli.content.as_deref(), Some("20250601_0900"));
        assert!(cli.detail && cli.stats && cli.json);
        assert_eq!(cli.metadata_dir, Some(PathBuf::from("/tmp/meta")));
    }

    #[test]
    fn test_cli_rejects_negative_recent() {
        assert!(Cli::try_parse_from(["sessdex", "--recent", "-1"]).is_err());
    }
}
