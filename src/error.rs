//! Error types for Sessdex
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sessdex operations
///
/// Per-record failures (`InvalidMetadata`, `CorruptedMetadata`) are logged
/// and isolated by the scanner; lookup failures (`MetadataNotFound`,
/// `SessionBodyNotFound`) are surfaced to the user as distinct messages.
#[derive(Error, Debug)]
pub enum SessdexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record parses as JSON but lacks required fields or has ill-typed ones
    #[error("Invalid metadata structure in {}: {reason}", .path.display())]
    InvalidMetadata {
        /// File the record was read from (empty when validated in memory)
        path: PathBuf,
        /// First failing field check
        reason: String,
    },

    /// Record cannot be parsed as JSON at all
    #[error("JSON decode error in {}: {message}", .path.display())]
    CorruptedMetadata {
        /// File that failed to parse
        path: PathBuf,
        /// Parser error message
        message: String,
    },

    /// No metadata record exists for the requested session id
    #[error("Metadata file not found for session {session_id}")]
    MetadataNotFound {
        /// Requested session id
        session_id: String,
    },

    /// Metadata exists but the transcript it points at does not
    #[error("Session file not found for session {session_id}: {reason}")]
    SessionBodyNotFound {
        /// Requested session id
        session_id: String,
        /// Why the body could not be loaded
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SessdexError {
    /// Returns true for either of the two lookup failure kinds
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SessdexError::MetadataNotFound { .. } | SessdexError::SessionBodyNotFound { .. }
        )
    }
}

/// Result type alias for Sessdex operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
