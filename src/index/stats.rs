//! Frequency statistics over a result set

use crate::storage::SessionMetadata;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Bucket used for records without a status or type
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Number of tags kept in the tag table by default
pub const DEFAULT_TOP_TAGS: usize = 5;

/// Counts keyed by value, in first-encountered order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

// Serialized as a JSON object whose keys keep table order
impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`
    pub fn add(&mut self, key: &str) {
        match self.positions.get(key) {
            Some(&idx) => self.entries[idx].1 += 1,
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// Count for `key`, if seen
    pub fn get(&self, key: &str) -> Option<usize> {
        self.positions.get(key).map(|&idx| self.entries[idx].1)
    }

    /// Entries in their current order
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was counted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep the `n` most frequent keys, ties in first-encountered order
    pub fn top(&self, n: usize) -> Self {
        let mut entries = self.entries.clone();
        // stable sort keeps first-encountered order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);

        let positions = entries
            .iter()
            .enumerate()
            .map(|(i, (k, _))| (k.clone(), i))
            .collect();
        Self { entries, positions }
    }
}

/// Status, type and tag frequencies for a result set
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FrequencyReport {
    /// Counts by status
    pub by_status: FrequencyTable,
    /// Counts by session type
    pub by_type: FrequencyTable,
    /// Most frequent tags
    pub top_tags: FrequencyTable,
}

impl FrequencyReport {
    /// Returns true if the report was built from no records
    pub fn is_empty(&self) -> bool {
        self.by_status.is_empty()
    }
}

/// Build a frequency report for `results`
///
/// Records without a status or type are counted under `unknown`. Every tag
/// occurrence counts once, and the tag table keeps the `top_tags` most
/// frequent entries.
///
/// # Examples
///
/// ```
/// use sessdex::index::stats::summarize;
/// use sessdex::storage::SessionMetadata;
///
/// let record = SessionMetadata::from_value(serde_json::json!({
///     "session_id": "s1",
///     "session_name": "n",
///     "timestamp": "2025-06-01",
///     "tags": ["a", "b"],
/// }))
/// .unwrap();
///
/// let report = summarize(&[record], 5);
/// assert_eq!(report.by_status.get("unknown"), Some(1));
/// assert_eq!(report.top_tags.get("b"), Some(1));
/// ```
pub fn summarize(results: &[SessionMetadata], top_tags: usize) -> FrequencyReport {
    let mut by_status = FrequencyTable::new();
    let mut by_type = FrequencyTable::new();
    let mut by_tag = FrequencyTable::new();

    for session in results {
        by_status.add(session.status.as_deref().unwrap_or(UNKNOWN_BUCKET));
        by_type.add(session.session_type.as_deref().unwrap_or(UNKNOWN_BUCKET));
        for tag in &session.tags {
            by_tag.add(tag);
        }
    }

    FrequencyReport {
        by_status,
        by_type,
        top_tags: by_tag.top(top_tags),
    }
}
