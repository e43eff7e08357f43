//! Test utilities for Sessdex
//!
//! This module provides common test utilities including temporary directory
//! management, metadata fixture creation, and assertion helpers.

use crate::config::Config;
use crate::error::SessdexError;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Write a minimal valid metadata record named `<id>.json`
pub fn write_metadata(dir: &TempDir, id: &str, name: &str, timestamp: &str) -> PathBuf {
    write_record(
        dir,
        serde_json::json!({
            "session_id": id,
            "session_name": name,
            "timestamp": timestamp,
        }),
    )
}

/// Write an arbitrary JSON record, named after its `session_id`
///
/// # Panics
///
/// Panics if the record has no string `session_id`
pub fn write_record(dir: &TempDir, record: serde_json::Value) -> PathBuf {
    let id = record["session_id"]
        .as_str()
        .expect("fixture record needs a session_id")
        .to_string();
    let content = serde_json::to_string_pretty(&record).expect("Failed to serialize fixture");
    create_test_file(dir, &format!("{}.json", id), &content)
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T, SessdexError>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Create a test configuration pointing at `dir` for metadata
pub fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.storage.metadata_dir = dir.path().to_path_buf();
    config.storage.sessions_dir = dir.path().to_path_buf();
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_write_record_uses_session_id_as_stem() {
        let dir = temp_dir();
        let path = write_record(
            &dir,
            serde_json::json!({"session_id": "abc", "session_name": "n", "timestamp": "t"}),
        );
        assert_eq!(path, dir.path().join("abc.json"));
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["session_name"], "n");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<(), SessdexError> =
            Err(SessdexError::Config("test error message".to_string()));
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<(), SessdexError> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    fn test_test_config_is_valid() {
        let dir = temp_dir();
        let config = test_config(&dir);
        assert_eq!(config.storage.metadata_dir, dir.path());
        assert!(config.validate().is_ok());
    }
}
