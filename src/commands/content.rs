use crate::config::Config;
use crate::error::{Result, SessdexError};
use crate::index::SessionIndexScanner;
use colored::Colorize;

/// Print the transcript of one session
///
/// A missing record or transcript is printed as a message rather than
/// returned as an error.
pub fn show_content(config: &Config, session_id: &str) -> Result<()> {
    let scanner = SessionIndexScanner::from_config(&config.storage);

    println!("📄 Session ID: {}", session_id);
    println!("{}", "=".repeat(50));

    match scanner.load_session_body(session_id) {
        Ok(body) => println!("{}", body),
        Err(e) if e.is_not_found() => {
            tracing::debug!("{}", e);
            println!("{}", not_found_message(&e).yellow());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// User-facing text for the two lookup failures
pub fn not_found_message(error: &SessdexError) -> String {
    match error {
        SessdexError::MetadataNotFound { .. } => "Metadata file not found".to_string(),
        SessdexError::SessionBodyNotFound { reason, .. } => {
            format!("Session file not found ({})", reason)
        }
        other => other.to_string(),
    }
}
