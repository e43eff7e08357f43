//! Session index scanning
//!
//! [`SessionIndexScanner`] walks the metadata directory, validates each
//! record, applies a [`SessionFilter`], and returns the matches newest
//! first. It also quarantines unparsable records and loads transcripts.
//!
//! Every record is handled on its own: a file that cannot be read, parsed
//! or validated is logged and skipped without affecting the rest of the
//! scan.

pub mod filter;
pub mod fuzzy;
pub mod stats;

pub use filter::{KeywordMode, SearchCriteria, SessionFilter};
pub use stats::{summarize, FrequencyReport, FrequencyTable};

use crate::config::StorageConfig;
use crate::error::{Result, SessdexError};
use crate::storage::{MetadataStore, SessionMetadata};
use std::path::{Path, PathBuf};

/// Outcome of one search scan
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Matching records, newest first, after the `recent` limit
    pub sessions: Vec<SessionMetadata>,
    /// Files that could not be parsed as JSON
    pub corrupted: Vec<PathBuf>,
    /// Number of metadata files examined
    pub scanned: usize,
}

impl ScanReport {
    /// Returns true if any corrupted files were found
    pub fn has_corrupted(&self) -> bool {
        !self.corrupted.is_empty()
    }
}

/// Scanner over a directory of session metadata records
///
/// # Examples
///
/// ```no_run
/// use sessdex::index::{SearchCriteria, SessionIndexScanner};
///
/// let scanner = SessionIndexScanner::new("sessions/metadata", "sessions");
/// let report = scanner.search(&SearchCriteria::new().with_date("2025-06").with_recent(10));
/// for session in &report.sessions {
///     println!("{} {}", session.timestamp, session.session_name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionIndexScanner {
    store: MetadataStore,
    sessions_dir: PathBuf,
    span: tracing::Span,
}

impl SessionIndexScanner {
    /// Create a scanner over `metadata_dir`, resolving relative transcript
    /// paths against `sessions_dir`
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(metadata_dir: P, sessions_dir: Q) -> Self {
        let store = MetadataStore::new(metadata_dir);
        let span = tracing::info_span!("session_index", dir = %store.dir().display());
        Self {
            store,
            sessions_dir: sessions_dir.into(),
            span,
        }
    }

    /// Create a scanner from storage configuration
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.metadata_dir.clone(), config.sessions_dir.clone())
    }

    /// Replace the span every operation runs in
    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the metadata directory
    pub fn metadata_dir(&self) -> &Path {
        self.store.dir()
    }

    /// Returns the sessions directory
    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    /// Search the metadata directory
    ///
    /// Records are read in path order, validated, filtered, sorted by
    /// `timestamp` descending (ties keep path order), and finally cut to
    /// `criteria.recent`. A missing or empty directory gives an empty
    /// report and a warning.
    pub fn search(&self, criteria: &SearchCriteria) -> ScanReport {
        let _guard = self.span.enter();
        let filter = SessionFilter::new(criteria);
        let mut report = ScanReport::default();

        let files = self.metadata_files();
        if files.is_empty() {
            tracing::warn!(
                "No metadata files found in {}",
                self.store.dir().display()
            );
            return report;
        }

        tracing::info!("Scanning {} metadata files...", files.len());
        tracing::debug!("Active filters: {}", filter.summary());
        report.scanned = files.len();

        for path in files {
            self.scan_file(path, &filter, &mut report);
        }

        report
            .sessions
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if let Some(limit) = criteria.recent {
            report.sessions.truncate(limit);
        }

        tracing::debug!(
            matched = report.sessions.len(),
            corrupted = report.corrupted.len(),
            "Scan complete"
        );

        report
    }

    /// Quarantine every metadata file that cannot be parsed as JSON
    ///
    /// Each corrupted `X.json` is renamed to `X.json.backup`, which takes it
    /// out of future scans without deleting it. Files that are valid JSON,
    /// even structurally invalid records, are left alone.
    ///
    /// # Returns
    ///
    /// Returns the number of files quarantined
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory cannot be enumerated; a
    /// failed rename is logged and skipped.
    pub fn repair_corrupted(&self) -> Result<usize> {
        let _guard = self.span.enter();

        if !self.store.exists() {
            tracing::warn!(
                "Metadata directory {} does not exist, nothing to repair",
                self.store.dir().display()
            );
            return Ok(0);
        }

        let mut repaired = 0;
        for path in self.store.list_files()? {
            if self.repair_file(&path) {
                repaired += 1;
            }
        }

        tracing::info!("Repaired {} metadata files", repaired);
        Ok(repaired)
    }

    /// Load the full transcript of a session
    ///
    /// # Errors
    ///
    /// - `SessdexError::MetadataNotFound` if no readable, parsable metadata
    ///   record exists for `session_id`
    /// - `SessdexError::SessionBodyNotFound` if the record has no
    ///   `file_path` or the transcript cannot be read
    pub fn load_session_body(&self, session_id: &str) -> std::result::Result<String, SessdexError> {
        let _guard = self.span.enter();
        let not_found = || SessdexError::MetadataNotFound {
            session_id: session_id.to_string(),
        };

        let meta_path = self.store.metadata_path(session_id).ok_or_else(not_found)?;
        let value = self.store.parse(&meta_path).map_err(|e| {
            tracing::debug!("Metadata lookup failed: {}", e);
            not_found()
        })?;

        let file_path = value
            .get("file_path")
            .and_then(|v| v.as_str())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| SessdexError::SessionBodyNotFound {
                session_id: session_id.to_string(),
                reason: "metadata has no file_path".to_string(),
            })?;

        let body_path = self
            .resolve_body_path(Path::new(file_path))
            .ok_or_else(|| SessdexError::SessionBodyNotFound {
                session_id: session_id.to_string(),
                reason: format!("{} does not exist", file_path),
            })?;

        std::fs::read_to_string(&body_path).map_err(|e| SessdexError::SessionBodyNotFound {
            session_id: session_id.to_string(),
            reason: format!("{} could not be read: {}", body_path.display(), e),
        })
    }

    /// Build a frequency report for `results`
    pub fn summarize(&self, results: &[SessionMetadata], top_tags: usize) -> FrequencyReport {
        stats::summarize(results, top_tags)
    }

    // Classify one file into the report; I/O failures are logged only
    fn scan_file(&self, path: PathBuf, filter: &SessionFilter, report: &mut ScanReport) {
        match self.store.load(&path) {
            Ok(session) => {
                if filter.matches(&session) {
                    report.sessions.push(session);
                }
            }
            Err(e @ SessdexError::CorruptedMetadata { .. }) => {
                tracing::error!("{}", e);
                report.corrupted.push(path);
            }
            Err(e @ SessdexError::InvalidMetadata { .. }) => {
                tracing::warn!("{}", e);
            }
            Err(e) => {
                tracing::error!("Unexpected error processing {}: {}", path.display(), e);
            }
        }
    }

    // Returns true if the file was unparsable and moved aside
    fn repair_file(&self, path: &Path) -> bool {
        match self.store.parse(path) {
            Ok(_) => false,
            Err(SessdexError::CorruptedMetadata { message, .. }) => {
                tracing::info!("Repairing {}: {}", path.display(), message);
                match self.store.quarantine(path) {
                    Ok(target) => {
                        tracing::info!("Quarantined {} as {}", path.display(), target.display());
                        true
                    }
                    Err(e) => {
                        tracing::error!("{:#}", e);
                        false
                    }
                }
            }
            Err(e) => {
                tracing::error!("Could not check {}: {}", path.display(), e);
                false
            }
        }
    }

    fn metadata_files(&self) -> Vec<PathBuf> {
        if !self.store.exists() {
            return Vec::new();
        }
        self.store.list_files().unwrap_or_else(|e| {
            tracing::error!("Failed to list metadata files: {:#}", e);
            Vec::new()
        })
    }

    fn resolve_body_path(&self, file_path: &Path) -> Option<PathBuf> {
        if file_path.is_file() {
            return Some(file_path.to_path_buf());
        }
        if file_path.is_relative() {
            let candidate = self.sessions_dir.join(file_path);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}
