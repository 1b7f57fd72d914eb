//! Tracing subscriber setup.
//!
//! The interactive demo owns the terminal, so its logs go to a file or
//! nowhere. Headless subcommands log to stderr. `RUST_LOG` overrides the
//! level chosen with `-v`.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, LogLevel};

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to this file, without colors.
    File(PathBuf),
    Discard,
}

impl LogTarget {
    /// Picks the target for a command line.
    pub fn for_cli(cli: &Cli) -> Self {
        match (&cli.log_file, cli.is_headless()) {
            (Some(path), _) => Self::File(path.clone()),
            (None, true) => Self::Stderr,
            (None, false) => Self::Discard,
        }
    }
}

/// Logging setup error.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A global subscriber was already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Builds the filter: `RUST_LOG` if set and valid, otherwise `level`.
pub fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`LoggingError::Open`] if the log file cannot be opened and
/// [`LoggingError::Install`] if a subscriber is already set.
pub fn init(level: LogLevel, target: &LogTarget) -> Result<(), LoggingError> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(level));
    let installed = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = open_log(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Discard => builder.with_writer(io::sink).try_init(),
    };
    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

fn open_log(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })
}
