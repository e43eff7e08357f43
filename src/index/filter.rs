//! Session filtering
//!
//! This module turns a [`SearchCriteria`] bundle into a [`SessionFilter`]
//! that decides which metadata records are included in a search.

use crate::index::fuzzy;
use crate::storage::SessionMetadata;

/// How the keyword is compared against a record's name and summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordMode {
    /// Case-insensitive substring containment
    #[default]
    Exact,
    /// Partial-ratio score of at least `threshold` (0–100)
    Fuzzy {
        /// Minimum score for a match
        threshold: u8,
    },
}

/// Search criteria; every field is optional and unset fields do not filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Comma-separated tags, any one of which must be present
    pub tags: Option<String>,
    /// Substring of the raw timestamp (e.g. `2025-06`)
    pub date_filter: Option<String>,
    /// Keyword matched against `session_name + " " + summary`
    pub keyword: Option<String>,
    /// Keyword comparison mode
    pub keyword_mode: KeywordMode,
    /// Exact status
    pub status: Option<String>,
    /// Exact session type
    pub session_type: Option<String>,
    /// Keep only the N most recent matches
    pub recent: Option<usize>,
}

impl SearchCriteria {
    /// Criteria that match every valid record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag filter
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Set the timestamp substring filter
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date_filter = Some(date.into());
        self
    }

    /// Set an exact-mode keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Switch keyword comparison to fuzzy mode
    pub fn with_fuzzy(mut self, threshold: u8) -> Self {
        self.keyword_mode = KeywordMode::Fuzzy { threshold };
        self
    }

    /// Set the status filter
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the session type filter
    pub fn with_type(mut self, session_type: impl Into<String>) -> Self {
        self.session_type = Some(session_type.into());
        self
    }

    /// Limit the result to the N most recent matches
    pub fn with_recent(mut self, recent: usize) -> Self {
        self.recent = Some(recent);
        self
    }
}

/// Compiled per-record predicate built from [`SearchCriteria`]
///
/// Predicates run in the order tags, date, keyword, status, type and stop
/// at the first one that fails.
#[derive(Debug, Clone)]
pub struct SessionFilter {
    tags: Vec<String>,
    date_filter: Option<String>,
    keyword: Option<String>,
    keyword_mode: KeywordMode,
    status: Option<String>,
    session_type: Option<String>,
}

impl SessionFilter {
    /// Compile criteria into a filter
    ///
    /// Tags are split on commas and trimmed; empty fragments are dropped.
    /// Empty date and keyword strings are treated as unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use sessdex::index::{SearchCriteria, SessionFilter};
    ///
    /// let filter = SessionFilter::new(&SearchCriteria::new().with_tags(" ui , api ,"));
    /// assert_eq!(filter.tags(), ["ui", "api"]);
    /// ```
    pub fn new(criteria: &SearchCriteria) -> Self {
        let tags = criteria
            .tags
            .as_deref()
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            tags,
            date_filter: non_empty(&criteria.date_filter),
            keyword: non_empty(&criteria.keyword).map(|k| k.to_lowercase()),
            keyword_mode: criteria.keyword_mode,
            status: criteria.status.clone(),
            session_type: criteria.session_type.clone(),
        }
    }

    /// Parsed tag list
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Check whether a record passes every configured predicate
    pub fn matches(&self, session: &SessionMetadata) -> bool {
        // Filter by tags (any one present)
        if !self.tags.is_empty() && !self.tags.iter().any(|t| session.tags.contains(t)) {
            return false;
        }

        // Filter by timestamp substring
        if let Some(date) = &self.date_filter {
            if !session.timestamp.contains(date.as_str()) {
                return false;
            }
        }

        // Filter by keyword
        if let Some(keyword) = &self.keyword {
            let text = session.search_text();
            let hit = match self.keyword_mode {
                KeywordMode::Exact => text.contains(keyword.as_str()),
                KeywordMode::Fuzzy { threshold } => fuzzy::fuzzy_matches(keyword, &text, threshold),
            };
            if !hit {
                return false;
            }
        }

        // Filter by status
        if let Some(status) = &self.status {
            if session.status.as_ref() != Some(status) {
                return false;
            }
        }

        // Filter by type
        if let Some(session_type) = &self.session_type {
            if session.session_type.as_ref() != Some(session_type) {
                return false;
            }
        }

        true
    }

    /// Human-readable summary of active filters, for logging
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if !self.tags.is_empty() {
            parts.push(format!("tags={}", self.tags.join("|")));
        }

        if let Some(date) = &self.date_filter {
            parts.push(format!("date~{}", date));
        }

        if let Some(keyword) = &self.keyword {
            match self.keyword_mode {
                KeywordMode::Exact => parts.push(format!("keyword~{}", keyword)),
                KeywordMode::Fuzzy { threshold } => {
                    parts.push(format!("keyword≈{} (>={})", keyword, threshold))
                }
            }
        }

        if let Some(status) = &self.status {
            parts.push(format!("status={}", status));
        }

        if let Some(session_type) = &self.session_type {
            parts.push(format!("type={}", session_type));
        }

        if parts.is_empty() {
            "no filters (all sessions)".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
