//! Error types for MindMate

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`MoodLog`](crate::store::MoodLog) backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Mood log I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Mood log {path} is corrupt at line {line}: {source}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode check-in entry: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned by the check-in journal
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Check-in text is empty")]
    EmptyInput,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Report encoding failed: {0}")]
    ReportEncode(#[source] serde_json::Error),

    #[error("Cannot write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
