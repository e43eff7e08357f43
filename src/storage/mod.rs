//! Flat-file metadata storage
//!
//! One JSON document per session lives in the metadata directory as
//! `<session_id>.json`. This module enumerates those documents, classifies
//! each one as valid, invalid or corrupted, and moves corrupted documents
//! aside under the `.backup` suffix.

use crate::error::{Result, SessdexError};
use anyhow::Context;
use std::path::{Path, PathBuf};

pub mod types;
pub use types::SessionMetadata;

/// Extension of active metadata documents
pub const METADATA_EXTENSION: &str = "json";

/// Suffix appended to quarantined documents
pub const QUARANTINE_SUFFIX: &str = ".backup";

/// Read-only view of a metadata directory (plus the quarantine rename)
#[derive(Debug, Clone)]
pub struct MetadataStore {
    dir: PathBuf,
}

impl MetadataStore {
    /// Create a store rooted at `dir`
    ///
    /// The directory is not required to exist.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the metadata directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns true if the metadata directory exists
    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// List every active metadata document, sorted by path
    ///
    /// Only regular files directly inside the directory whose name ends in
    /// `.json` are returned; quarantined `*.json.backup` files and hidden
    /// files such as `.draft.json` never match. A missing directory yields
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error only if the glob pattern cannot be built.
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(&self.dir.to_string_lossy()),
            METADATA_EXTENSION
        );

        let options = glob::MatchOptions {
            require_literal_leading_dot: true,
            ..glob::MatchOptions::new()
        };

        let mut files = Vec::new();
        let entries =
            glob::glob_with(&pattern, options).context("Invalid metadata glob pattern")?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping unreadable directory entry: {}", e),
            }
        }
        files.sort();

        Ok(files)
    }

    /// Read, parse and validate one metadata document
    ///
    /// The file is read in one call so the handle is released before
    /// parsing starts.
    ///
    /// # Errors
    ///
    /// - `SessdexError::Io` if the file cannot be read
    /// - `SessdexError::CorruptedMetadata` if the content is not JSON
    /// - `SessdexError::InvalidMetadata` if required fields are missing
    pub fn load(&self, path: &Path) -> std::result::Result<SessionMetadata, SessdexError> {
        let value = self.parse(path)?;
        SessionMetadata::from_value(value).map_err(|e| match e {
            SessdexError::InvalidMetadata { reason, .. } => SessdexError::InvalidMetadata {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Read and parse one document as untyped JSON
    ///
    /// # Errors
    ///
    /// - `SessdexError::Io` if the file cannot be read
    /// - `SessdexError::CorruptedMetadata` if the content is not JSON
    pub fn parse(&self, path: &Path) -> std::result::Result<serde_json::Value, SessdexError> {
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| SessdexError::CorruptedMetadata {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Path of the metadata document for `session_id`
    ///
    /// Returns `None` when the id cannot be a plain file stem (empty, `.`,
    /// `..`, or containing a path separator).
    pub fn metadata_path(&self, session_id: &str) -> Option<PathBuf> {
        if session_id.is_empty()
            || session_id == "."
            || session_id == ".."
            || session_id.contains('/')
            || session_id.contains('\\')
        {
            return None;
        }
        Some(
            self.dir
                .join(format!("{}.{}", session_id, METADATA_EXTENSION)),
        )
    }

    /// Move a document aside so it no longer takes part in scans
    ///
    /// `X.json` becomes `X.json.backup`. If that name is taken, the first
    /// free `X.json.backup.N` is used; an existing backup is never
    /// overwritten.
    ///
    /// # Returns
    ///
    /// Returns the quarantine path
    ///
    /// # Errors
    ///
    /// Returns error if the rename fails
    pub fn quarantine(&self, path: &Path) -> Result<PathBuf> {
        let target = quarantine_target(path);
        std::fs::rename(path, &target).with_context(|| {
            format!(
                "Failed to quarantine {} as {}",
                path.display(),
                target.display()
            )
        })?;
        Ok(target)
    }
}

fn quarantine_target(path: &Path) -> PathBuf {
    let mut base = path.as_os_str().to_os_string();
    base.push(QUARANTINE_SUFFIX);
    let base = PathBuf::from(base);
    if !base.exists() {
        return base;
    }

    let mut n = 1u32;
    loop {
        let mut candidate = base.as_os_str().to_os_string();
        candidate.push(format!(".{}", n));
        let candidate = PathBuf::from(candidate);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
