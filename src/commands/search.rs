//! Search command: filter, display, and summarize session metadata

use crate::cli::Cli;
use crate::config::{Config, SearchConfig};
use crate::error::{Result, SessdexError};
use crate::index::{FrequencyReport, ScanReport, SearchCriteria, SessionIndexScanner};
use crate::storage::SessionMetadata;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use colored::Colorize;
use prettytable::{format, Table};
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for a search run
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub tag: Option<String>,
    pub date: Option<String>,
    pub keyword: Option<String>,
    pub fuzzy: bool,
    pub fuzzy_threshold: Option<u8>,
    pub status: Option<String>,
    pub session_type: Option<String>,
    pub recent: Option<usize>,
    pub detail: bool,
    pub stats: bool,
    pub json: bool,
}

impl From<&Cli> for SearchArgs {
    fn from(cli: &Cli) -> Self {
        Self {
            tag: cli.tag.clone(),
            date: cli.date.clone(),
            keyword: cli.keyword.clone(),
            fuzzy: cli.fuzzy,
            fuzzy_threshold: cli.fuzzy_threshold,
            status: cli.status.clone(),
            session_type: cli.session_type.clone(),
            recent: cli.recent,
            detail: cli.detail,
            stats: cli.stats,
            json: cli.json,
        }
    }
}

/// Build search criteria, applying the fuzzy fallback policy
///
/// When fuzzy matching is requested but disabled in configuration, the
/// criteria use exact matching and a warning message is returned for the
/// caller to show.
pub fn build_criteria(search: &SearchConfig, args: &SearchArgs) -> (SearchCriteria, Option<String>) {
    let mut criteria = SearchCriteria {
        tags: args.tag.clone(),
        date_filter: args.date.clone(),
        keyword: args.keyword.clone(),
        status: args.status.clone(),
        session_type: args.session_type.clone(),
        recent: args.recent,
        ..Default::default()
    };

    let mut warning = None;
    if args.fuzzy {
        if search.fuzzy_enabled {
            criteria = criteria.with_fuzzy(args.fuzzy_threshold.unwrap_or(search.fuzzy_threshold));
        } else {
            warning = Some(
                "Fuzzy search is disabled (search.fuzzy_enabled = false); using exact keyword matching"
                    .to_string(),
            );
        }
    }

    (criteria, warning)
}

/// Run a search and print the results
pub fn run_search(config: &Config, args: &SearchArgs) -> Result<()> {
    let scanner = SessionIndexScanner::from_config(&config.storage);

    let (criteria, warning) = build_criteria(&config.search, args);
    if let Some(message) = warning {
        tracing::warn!("{}", message);
        eprintln!("{}", format!("⚠️ {}", message).yellow());
    }

    let report = scanner.search(&criteria);

    if report.has_corrupted() {
        eprint!("{}", render_corrupted(&report));
    }

    let stats = if args.stats {
        Some(scanner.summarize(&report.sessions, config.search.top_tags))
    } else {
        None
    };

    if args.json {
        let output = JsonOutput {
            sessions: &report.sessions,
            corrupted: &report.corrupted,
            statistics: stats.as_ref(),
        };
        println!("{}", render_json(&output)?);
        return Ok(());
    }

    print!("{}", render_results(&report.sessions, args.detail));

    if let Some(stats) = stats.filter(|s| !s.is_empty()) {
        print_statistics(&stats);
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    sessions: &'a [SessionMetadata],
    corrupted: &'a [PathBuf],
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<&'a FrequencyReport>,
}

fn render_json(output: &JsonOutput<'_>) -> std::result::Result<String, SessdexError> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Corrupted-file report with a repair hint
pub fn render_corrupted(report: &ScanReport) -> String {
    let mut out = format!(
        "{}\n",
        format!(
            "⚠️ {} corrupted metadata files found:",
            report.corrupted.len()
        )
        .yellow()
    );
    for path in &report.corrupted {
        out.push_str(&format!("   - {}\n", path.display()));
    }
    out.push_str(&format!(
        "💡 Consider running recovery: {}\n",
        "sessdex --repair".cyan()
    ));
    out
}

/// Numbered result list
pub fn render_results(sessions: &[SessionMetadata], detail: bool) -> String {
    if sessions.is_empty() {
        return "🔍 No matching sessions found\n".to_string();
    }

    let mut out = format!("🔍 Found {} matching session(s)\n\n", sessions.len());
    for (i, session) in sessions.iter().enumerate() {
        out.push_str(&render_session(i + 1, session, detail));
        out.push('\n');
    }
    out
}

fn render_session(index: usize, session: &SessionMetadata, detail: bool) -> String {
    let status_emoji = if session.status.as_deref() == Some("completed") {
        "✅"
    } else {
        "🔄"
    };

    let mut out = format!(
        "{:2}. {} {}\n",
        index,
        status_emoji,
        session.session_name.bold()
    );
    out.push_str(&format!("    📅 {}\n", format_timestamp(&session.timestamp)));
    out.push_str(&format!("    🏷️  {}\n", session.tags.join(", ")));
    out.push_str(&format!(
        "    📝 {}\n",
        session.summary.as_deref().unwrap_or("No summary")
    ));

    if detail {
        out.push_str(&format!(
            "    📁 {}\n",
            session.file_path.as_deref().unwrap_or("N/A")
        ));
        out.push_str(&format!("    🆔 {}\n", session.session_id.cyan()));
    }

    out
}

/// Format an ISO-8601 timestamp as `YYYY/MM/DD HH:MM`
///
/// Unparsable values are returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    const DISPLAY: &str = "%Y/%m/%d %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format(DISPLAY).to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d") {
        return date.format("%Y/%m/%d").to_string();
    }

    timestamp.to_string()
}

fn print_statistics(stats: &FrequencyReport) {
    println!("{}", "📊 Statistics".bold());

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Group".bold(),
        "Value".bold(),
        "Count".bold()
    ]);

    for (group, frequencies) in [
        ("Status", &stats.by_status),
        ("Type", &stats.by_type),
        ("Top tags", &stats.top_tags),
    ] {
        for (key, count) in frequencies.entries() {
            table.add_row(prettytable::row![group.cyan(), key, count]);
        }
    }

    table.printstd();
    println!();
}
