use crate::config::Config;
use crate::error::Result;
use crate::index::SessionIndexScanner;
use colored::Colorize;

/// Quarantine corrupted metadata files and print how many were moved
pub fn run_repair(config: &Config) -> Result<()> {
    let scanner = SessionIndexScanner::from_config(&config.storage);

    println!("🔧 Repairing corrupted metadata files...");
    let repaired = scanner.repair_corrupted()?;
    println!(
        "{}",
        format!("✅ Repaired {} file(s)", repaired).green()
    );

    Ok(())
}
