//! Logging bootstrap: every event lands in an append-only, line-oriented log file.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context};
use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Open the log file for appending, creating it when missing.
pub fn open_log_file(path: &Path) -> anyhow::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))
}

/// `RUST_LOG` wins over the configured level.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.log_level)
            .with_context(|| format!("invalid log level '{}'", settings.log_level)),
    }
}

/// Install the global subscriber writing to the configured log file.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let file = open_log_file(&settings.log_file)?;
    let filter = env_filter(settings)?;
    let writer = Mutex::new(file);

    let layer = match settings.log_format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::info!(
        target: "bookshelf-telemetry",
        log_file = %settings.log_file.display(),
        format = ?settings.log_format,
        "logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_log_file_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.log");

        {
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "first").unwrap();
        }
        {
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "second").unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("server.log");

        let err = open_log_file(&path).unwrap_err();
        assert!(err.to_string().contains("cannot open log file"));
    }

    #[test]
    fn test_configured_level_is_rejected_when_malformed() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let settings = TelemetrySettings {
            log_level: "bookshelf=verbose".to_string(),
            ..TelemetrySettings::default()
        };
        assert!(env_filter(&settings).is_err());
    }

    #[test]
    fn test_init_writes_to_log_file() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let settings = TelemetrySettings {
            log_file: dir.path().join("server.log"),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        };

        init(&settings).unwrap();
        tracing::info!(rows = 3, "access line");

        let contents = std::fs::read_to_string(&settings.log_file).unwrap();
        assert!(contents.contains("logging initialized"));
        assert!(contents.contains("access line"));
    }
}
