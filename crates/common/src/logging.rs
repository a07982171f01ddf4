//! Tracing bootstrap for the editor core and the CLI.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the
//! configured level (e.g. "info" or "reelcore=debug,warn"). Output goes
//! to stderr so the CLI's plan/export streams on stdout stay clean, or
//! to an append-mode log file when `LoggingConfig.file` is set.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber from the logging config.
///
/// Safe to call more than once; only the first call installs a
/// subscriber. If the configured log file cannot be opened, logging
/// falls back to stderr rather than failing startup.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, to_file) = match config.file.as_deref().map(open_log_file) {
        Some(Ok(file)) => (BoxMakeWriter::new(Mutex::new(file)), true),
        Some(Err(e)) => {
            eprintln!(
                "reelcore: cannot open log file {:?}: {e}; logging to stderr",
                config.file
            );
            (BoxMakeWriter::new(std::io::stderr), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), false),
    };

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(writer)
        // ANSI escapes would end up verbatim in log files.
        .with_ansi(!to_file);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish()).ok();
    } else {
        tracing::subscriber::set_global_default(builder.with_target(true).finish()).ok();
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

/// Open the configured log file for appending, creating parent
/// directories as needed.
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_missing_directories() {
        let dir = std::env::temp_dir().join(format!("reelcore-log-test-{}", std::process::id()));
        let path = dir.join("session").join("core.log");
        let file = open_log_file(&path).unwrap();
        drop(file);
        assert!(path.exists());

        // Append mode: a second open must not truncate.
        std::fs::write(&path, b"line\n").unwrap();
        drop(open_log_file(&path).unwrap());
        assert_eq!(std::fs::read(&path).unwrap(), b"line\n");

        std::fs::remove_dir_all(&dir).ok();
    }
}
