//! Session metadata record schema
//!
//! Defines [`SessionMetadata`] and the validation that turns a parsed JSON
//! document into a record.

use crate::error::SessdexError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata for one recorded session
///
/// Mirrors the on-disk JSON document. Only `session_id`, `session_name` and
/// `timestamp` are required; see [`SessionMetadata::from_value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Unique identifier, also the record's filename stem
    pub session_id: String,
    /// Human label
    pub session_name: String,
    /// ISO-8601 timestamp, compared as a string
    pub timestamp: String,
    /// Tags in recorded order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Status such as `completed` or `in_progress`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Session type such as `regular`, `checkpoint` or `finalize`
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub session_type: Option<String>,
    /// Free-text summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Path to the full transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Lenient shape used to tell missing fields apart from ill-typed ones
///
/// Every field is kept as raw JSON so a wrong type in an optional field
/// never rejects the whole record.
#[derive(Debug, Default, Deserialize)]
struct RawSessionMetadata {
    #[serde(default)]
    session_id: Option<serde_json::Value>,
    #[serde(default)]
    session_name: Option<serde_json::Value>,
    #[serde(default)]
    timestamp: Option<serde_json::Value>,
    #[serde(default)]
    tags: Option<serde_json::Value>,
    #[serde(default)]
    status: Option<serde_json::Value>,
    #[serde(rename = "type", default)]
    session_type: Option<serde_json::Value>,
    #[serde(default)]
    summary: Option<serde_json::Value>,
    #[serde(default)]
    file_path: Option<serde_json::Value>,
}

impl SessionMetadata {
    /// Validate a parsed JSON document and build a record from it
    ///
    /// A document is valid iff it is an object with non-null string
    /// `session_id`, `session_name` and `timestamp`. Optional fields are
    /// read leniently: a value of the wrong type counts as absent, and
    /// non-string `tags` elements are dropped.
    ///
    /// # Errors
    ///
    /// Returns `SessdexError::InvalidMetadata` with an empty path and the
    /// first failing check as the reason.
    ///
    /// # Examples
    ///
    /// ```
    /// use sessdex::storage::SessionMetadata;
    ///
    /// let value = serde_json::json!({
    ///     "session_id": "s1",
    ///     "session_name": "Shift planner",
    ///     "timestamp": "2025-06-01T09:00:00",
    ///     "summary": 42,
    /// });
    /// let meta = SessionMetadata::from_value(value).unwrap();
    /// assert!(meta.tags.is_empty());
    /// assert!(meta.summary.is_none());
    ///
    /// let missing = serde_json::json!({ "session_id": "s2" });
    /// assert!(SessionMetadata::from_value(missing).is_err());
    /// ```
    pub fn from_value(value: serde_json::Value) -> Result<Self, SessdexError> {
        if !value.is_object() {
            return Err(invalid("top-level JSON value is not an object"));
        }

        let raw: RawSessionMetadata =
            serde_json::from_value(value).map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            session_id: required(raw.session_id, "session_id")?,
            session_name: required(raw.session_name, "session_name")?,
            timestamp: required(raw.timestamp, "timestamp")?,
            tags: tag_list(raw.tags),
            status: optional(raw.status),
            session_type: optional(raw.session_type),
            summary: optional(raw.summary),
            file_path: optional(raw.file_path),
        })
    }

    /// Lowercased `session_name + " " + summary` used for keyword matching
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.session_name,
            self.summary.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}

fn required(value: Option<serde_json::Value>, field: &str) -> Result<String, SessdexError> {
    match value {
        None | Some(serde_json::Value::Null) => Err(invalid(&format!("missing `{}`", field))),
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(other) => Err(invalid(&format!(
            "`{}` must be a string, found {}",
            field, other
        ))),
    }
}

fn optional(value: Option<serde_json::Value>) -> Option<String> {
    match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    }
}

fn tag_list(value: Option<serde_json::Value>) -> Vec<String> {
    match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn invalid(reason: &str) -> SessdexError {
    SessdexError::InvalidMetadata {
        path: PathBuf::new(),
        reason: reason.to_string(),
    }
}
