//! Configuration management for Sessdex
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, SessdexError};
use anyhow::Context;
use crate::index::fuzzy::DEFAULT_FUZZY_THRESHOLD;
use crate::index::stats::DEFAULT_TOP_TAGS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Sessdex
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where metadata records and transcripts live
    #[serde(default)]
    pub storage: StorageConfig,
    /// Search behavior
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Problems noticed while loading, logged once tracing is initialized
    #[serde(skip)]
    pub load_warnings: Vec<String>,
}

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one `<session_id>.json` per session
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: PathBuf,

    /// Directory relative transcript paths are resolved against
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: PathBuf,
}

fn default_metadata_dir() -> PathBuf {
    PathBuf::from("sessions/metadata")
}

fn default_sessions_dir() -> PathBuf {
    PathBuf::from("sessions")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            metadata_dir: default_metadata_dir(),
            sessions_dir: default_sessions_dir(),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether fuzzy keyword matching is available
    ///
    /// When false, a fuzzy request falls back to exact matching with a
    /// warning.
    #[serde(default = "default_fuzzy_enabled")]
    pub fuzzy_enabled: bool,

    /// Default fuzzy threshold (0–100)
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: u8,

    /// Number of tags shown in statistics
    #[serde(default = "default_top_tags")]
    pub top_tags: usize,
}

fn default_fuzzy_enabled() -> bool {
    true
}

fn default_fuzzy_threshold() -> u8 {
    DEFAULT_FUZZY_THRESHOLD
}

fn default_top_tags() -> usize {
    DEFAULT_TOP_TAGS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fuzzy_enabled: default_fuzzy_enabled(),
            fuzzy_threshold: default_fuzzy_threshold(),
            top_tags: default_top_tags(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable logs
    #[serde(default)]
    pub json_format: bool,

    /// Optional file that receives a copy of every log line
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: None,
        }
    }
}

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            let mut config = Self::default();
            config
                .load_warnings
                .push(format!("Config file not found at {}, using defaults", path));
            config
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SessdexError::Config(format!("Failed to read config file: {}", e)))?;
        let config = serde_yaml::from_str(&contents)
            .map_err(SessdexError::from)
            .with_context(|| format!("Failed to parse config file {}", path))?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(dir) = std::env::var("SESSDEX_METADATA_DIR") {
            self.storage.metadata_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("SESSDEX_SESSIONS_DIR") {
            self.storage.sessions_dir = PathBuf::from(dir);
        }

        if let Ok(enabled) = std::env::var("SESSDEX_FUZZY_ENABLED") {
            match enabled.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.search.fuzzy_enabled = true,
                "0" | "false" | "no" | "off" => self.search.fuzzy_enabled = false,
                _ => self
                    .load_warnings
                    .push(format!("Invalid SESSDEX_FUZZY_ENABLED: {}", enabled)),
            }
        }

        if let Ok(threshold) = std::env::var("SESSDEX_FUZZY_THRESHOLD") {
            if let Ok(value) = threshold.parse() {
                self.search.fuzzy_threshold = value;
            } else {
                self.load_warnings
                    .push(format!("Invalid SESSDEX_FUZZY_THRESHOLD: {}", threshold));
            }
        }

        if let Ok(top_tags) = std::env::var("SESSDEX_TOP_TAGS") {
            if let Ok(value) = top_tags.parse() {
                self.search.top_tags = value;
            } else {
                self.load_warnings
                    .push(format!("Invalid SESSDEX_TOP_TAGS: {}", top_tags));
            }
        }

        if let Ok(level) = std::env::var("SESSDEX_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }

        if let Ok(json) = std::env::var("SESSDEX_LOG_JSON") {
            match json.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.logging.json_format = true,
                "0" | "false" | "no" | "off" => self.logging.json_format = false,
                _ => self
                    .load_warnings
                    .push(format!("Invalid SESSDEX_LOG_JSON: {}", json)),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(dir) = &cli.metadata_dir {
            self.storage.metadata_dir = dir.clone();
        }

        if let Some(dir) = &cli.sessions_dir {
            self.storage.sessions_dir = dir.clone();
        }

        if cli.verbose {
            self.logging.level = "debug".to_string();
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges
    /// and that required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.storage.metadata_dir.as_os_str().is_empty() {
            return Err(
                SessdexError::Config("storage.metadata_dir cannot be empty".to_string()).into(),
            );
        }

        if self.search.fuzzy_threshold > 100 {
            return Err(SessdexError::Config(
                "search.fuzzy_threshold must be between 0 and 100".to_string(),
            )
            .into());
        }

        if self.search.top_tags == 0 {
            return Err(
                SessdexError::Config("search.top_tags must be greater than 0".to_string()).into(),
            );
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(SessdexError::Config(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use serial_test::serial;

    const ENV_VARS: [&str; 7] = [
        "SESSDEX_METADATA_DIR",
        "SESSDEX_SESSIONS_DIR",
        "SESSDEX_FUZZY_ENABLED",
        "SESSDEX_FUZZY_THRESHOLD",
        "SESSDEX_TOP_TAGS",
        "SESSDEX_LOG_LEVEL",
        "SESSDEX_LOG_JSON",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.metadata_dir, PathBuf::from("sessions/metadata"));
        assert_eq!(config.storage.sessions_dir, PathBuf::from("sessions"));
        assert!(config.search.fuzzy_enabled);
        assert_eq!(config.search.fuzzy_threshold, 70);
        assert_eq!(config.search.top_tags, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_threshold_out_of_range() {
        let mut config = Config::default();
        config.search.fuzzy_threshold = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_top_tags() {
        let mut config = Config::default();
        config.search.top_tags = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_metadata_dir() {
        let mut config = Config::default();
        config.storage.metadata_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
storage:
  metadata_dir: /data/meta
search:
  fuzzy_enabled: false
  fuzzy_threshold: 85
logging:
  level: warn
  json_format: true
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.storage.metadata_dir, PathBuf::from("/data/meta"));
        assert_eq!(config.storage.sessions_dir, PathBuf::from("sessions"));
        assert!(!config.search.fuzzy_enabled);
        assert_eq!(config.search.fuzzy_threshold, 85);
        assert_eq!(config.search.top_tags, 5);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_config_from_empty_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.search.fuzzy_threshold, 70);
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        clear_env();
        let cli = Cli::try_parse_from(["sessdex"]).unwrap();
        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        assert_eq!(config.storage.metadata_dir, PathBuf::from("sessions/metadata"));
        assert_eq!(config.load_warnings.len(), 1);
        assert!(config.load_warnings[0].contains("nonexistent.yaml"));
    }

    #[test]
    #[serial]
    fn test_load_invalid_yaml_is_config_error() {
        clear_env();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "search: [not, a, map]").unwrap();

        let cli = Cli::try_parse_from(["sessdex"]).unwrap();
        let err = Config::load(path.to_str().unwrap(), &cli).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
        assert!(matches!(
            err.downcast_ref::<SessdexError>(),
            Some(SessdexError::Yaml(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_vars_override_file_values() {
        clear_env();
        std::env::set_var("SESSDEX_METADATA_DIR", "/env/meta");
        std::env::set_var("SESSDEX_FUZZY_ENABLED", "off");
        std::env::set_var("SESSDEX_FUZZY_THRESHOLD", "55");
        std::env::set_var("SESSDEX_TOP_TAGS", "not-a-number");

        let cli = Cli::try_parse_from(["sessdex"]).unwrap();
        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        clear_env();

        assert_eq!(config.storage.metadata_dir, PathBuf::from("/env/meta"));
        assert!(!config.search.fuzzy_enabled);
        assert_eq!(config.search.fuzzy_threshold, 55);
        assert_eq!(config.search.top_tags, 5);
        assert_eq!(
            config.load_warnings,
            vec![
                "Config file not found at nonexistent.yaml, using defaults".to_string(),
                "Invalid SESSDEX_TOP_TAGS: not-a-number".to_string(),
            ]
        );
    }

    #[test]
    #[serial]
    fn test_cli_overrides_env() {
        clear_env();
        std::env::set_var("SESSDEX_METADATA_DIR", "/env/meta");

        let cli = Cli::try_parse_from(["sessdex", "--metadata-dir", "/cli/meta", "--verbose"])
            .unwrap();
        let config = Config::load("nonexistent.yaml", &cli).unwrap();
        clear_env();

        assert_eq!(config.storage.metadata_dir, PathBuf::from("/cli/meta"));
        assert_eq!(config.logging.level, "debug");
    }
}
