//! Tracing subscriber setup driven by [`LoggingConfig`].
//!
//! Events go to stderr unless `logging.file` names a log file, in which
//! case they are appended there without ANSI colors. `RUST_LOG` overrides
//! the configured level.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::ReelcutResult;

/// A type-erased subscriber, plain-text or JSON.
pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Install the global subscriber. Later calls are ignored.
///
/// If the log file cannot be opened, logging falls back to stderr and the
/// failure is reported as the first event.
pub fn init_logging(config: &LoggingConfig) {
    match build_subscriber(config) {
        Ok(subscriber) => {
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        Err(err) => {
            let stderr_only = LoggingConfig {
                file: None,
                ..config.clone()
            };
            if let Ok(subscriber) = build_subscriber(&stderr_only) {
                tracing::subscriber::set_global_default(subscriber).ok();
            }
            tracing::warn!(
                path = ?config.file,
                error = %err,
                "Log file unavailable, logging to stderr"
            );
        }
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

/// Build the subscriber described by `config` without installing it.
pub fn build_subscriber(config: &LoggingConfig) -> ReelcutResult<BoxedSubscriber> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, ansi) = match &config.file {
        Some(path) => (BoxMakeWriter::new(Mutex::new(open_log_file(path)?)), false),
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(ansi);

    if config.json {
        Ok(Box::new(builder.json().finish()))
    } else {
        Ok(Box::new(
            builder
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        ))
    }
}

fn open_log_file(path: &Path) -> ReelcutResult<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_appended_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("reelcut.log");
        let config = LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(path.clone()),
        };

        let subscriber = build_subscriber(&config).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(clip = "video-1", "Clip clamped into timeline");
        });

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Clip clamped into timeline"));
        assert!(written.contains("video-1"));
        assert!(!written.contains('\u{1b}'));
    }

    #[test]
    fn test_json_log_file_lines_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reelcut.jsonl");
        let config = LoggingConfig {
            level: "info".to_string(),
            json: true,
            file: Some(path.clone()),
        };

        let subscriber = build_subscriber(&config).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(cues = 3, "Caption generation failed");
        });

        let written = std::fs::read_to_string(&path).unwrap();
        let line = written.lines().next().unwrap();
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["fields"]["message"], "Caption generation failed");
    }

    #[test]
    fn test_unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file: Some(dir.path().to_path_buf()),
            ..LoggingConfig::default()
        };
        assert!(build_subscriber(&config).is_err());
    }
}
