//! Journal configuration
//!
//! Settings come from an optional TOML file; anything missing falls back to
//! the defaults below.
//!
//! ```toml
//! log_path = "data/mood_logs.jsonl"
//! report_dir = "data"
//! recent_limit = 20
//! ```

use crate::error::ConfigError;
use crate::summary::DEFAULT_RECENT_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the mood log
pub const DEFAULT_LOG_PATH: &str = "data/mood_logs.jsonl";

/// Default directory for exported reports
pub const DEFAULT_REPORT_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalConfig {
    /// JSON Lines file holding the mood log
    pub log_path: PathBuf,
    /// Directory that receives exported reports
    pub report_dir: PathBuf,
    /// Entries shown in the "recent" section of a summary
    pub recent_limit: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl JournalConfig {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
