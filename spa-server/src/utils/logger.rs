//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::fs;
use std::path::Path;

/// Initialize the logger
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file(None, None)
}

/// Initialize the logger with optional file output
///
/// Fails if a global subscriber is already installed or the log directory
/// cannot be created.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) -> anyhow::Result<()> {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        fs::create_dir_all(log_path)?;
        let file_appender = tracing_appender::rolling::daily(log_path, "spa-server");
        subscriber
            .with_writer(file_appender)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    subscriber.try_init().map_err(|e| anyhow::anyhow!(e))
}
