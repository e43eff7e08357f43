//! Sessdex - session metadata search library
//!
//! This library provides the core functionality behind the `sessdex` CLI:
//! scanning a directory of JSON session-metadata records, filtering them,
//! summarizing results, and quarantining corrupted records.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `index`: The session index scanner, search criteria, fuzzy scoring, and statistics
//! - `storage`: Metadata record schema, validation, and flat-file access
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `logging`: Tracing subscriber setup
//! - `cli`: Command-line interface definition
//! - `commands`: Console handlers for search, content lookup, and repair
//!
//! # Example
//!
//! ```no_run
//! use sessdex::{SearchCriteria, SessionIndexScanner};
//!
//! let scanner = SessionIndexScanner::new("sessions/metadata", "sessions");
//! let report = scanner.search(&SearchCriteria::new().with_tags("frontend").with_recent(5));
//! println!("{} matches, {} corrupted", report.sessions.len(), report.corrupted.len());
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SessdexError};
pub use index::{
    summarize, FrequencyReport, KeywordMode, ScanReport, SearchCriteria, SessionFilter,
    SessionIndexScanner,
};
pub use storage::SessionMetadata;

#[cfg(test)]
pub mod test_utils;
