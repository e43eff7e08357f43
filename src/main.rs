//! Sessdex - session metadata search CLI
//!
//! Main entry point for the sessdex application.

use anyhow::Result;

use sessdex::cli::Cli;
use sessdex::commands;
use sessdex::config::Config;
use sessdex::logging::init_logging;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/sessdex.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Initialize tracing once the configured level is known
    init_logging(&config.logging)?;
    for warning in &config.load_warnings {
        tracing::warn!("{}", warning);
    }
    tracing::debug!("Loaded configuration from {}", config_path);

    commands::run(&config, &cli)
}
