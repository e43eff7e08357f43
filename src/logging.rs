//! Structured logging setup
//!
//! Provides JSON-formatted and human-readable logging with optional file
//! output. Console logs go to stderr so stdout carries only results.

use crate::config::LoggingConfig;
use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the env filter: `RUST_LOG` wins, otherwise the configured level
/// applied to this crate.
///
/// # Errors
///
/// Returns error if the configured level is not a valid directive
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(format!("sessdex={}", config.level))?),
    }
}

/// Initialize process-wide logging based on configuration.
///
/// Call once at startup; a second call fails because a global subscriber
/// is already set.
///
/// # Errors
///
/// Returns error if the filter is invalid, the log file cannot be opened,
/// or a subscriber is already installed
///
/// # Examples
///
/// ```no_run
/// use sessdex::config::LoggingConfig;
/// use sessdex::logging::init_logging;
///
/// init_logging(&LoggingConfig::default()).unwrap();
/// tracing::info!("ready");
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config)?);

    let file = match &config.file_path {
        Some(path) => Some(Arc::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };

    if config.json_format {
        let stderr_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr);

        if let Some(file) = file {
            let file_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(file);

            registry.with(stderr_layer).with(file_layer).try_init()?;
        } else {
            registry.with(stderr_layer).try_init()?;
        }
    } else {
        let stderr_layer = fmt::layer()
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr);

        if let Some(file) = file {
            let file_layer = fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_writer(file);

            registry.with(stderr_layer).with(file_layer).try_init()?;
        } else {
            registry.with(stderr_layer).try_init()?;
        }
    }

    Ok(())
}
