//! Logging configuration and initialization.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::Deserialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use super::invalid;
use super::rolling::RollingFile;
use crate::error::Result;

const MIB: u64 = 1024 * 1024;

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
    /// Also write logs here, rotated by size.
    pub file: Option<PathBuf>,
    pub max_file_mb: u64,
    /// Rotated files kept next to the live one.
    pub max_files: usize,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Calling this
    /// twice is harmless; the second subscriber is discarded. Fails only when
    /// the log file cannot be opened.
    #[allow(clippy::result_large_err)]
    pub fn init(&self) -> Result<()> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let file = self
            .file
            .as_ref()
            .map(|path| RollingFile::open(path, self.max_file_mb * MIB, self.max_files))
            .transpose()
            .map_err(|e| invalid("logging.file", e.to_string()))?;
        let registry = tracing_subscriber::registry().with(filter);
        let _ = if self.is_json() {
            registry
                .with(fmt::layer().json())
                .with(file.map(|f| {
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(f))
                        .json()
                }))
                .try_init()
        } else {
            registry
                .with(fmt::layer())
                .with(file.map(|f| fmt::layer().with_ansi(false).with_writer(Mutex::new(f))))
                .try_init()
        };
        Ok(())
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
            file: None,
            max_file_mb: 10,
            max_files: 5,
        }
    }
}
