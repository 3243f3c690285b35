//! History configuration from TOML (`[history]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Research history configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    /// Record completed runs
    pub enabled: bool,
    /// History file; defaults to `<data dir>/scribe/history.jsonl`
    pub path: Option<String>,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl FileHistoryConfig {
    /// The history file to use. A leading `~/` is expanded.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => match path.strip_prefix("~/") {
                Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
                None => Some(PathBuf::from(path)),
            },
            None => dirs::data_dir().map(|d| d.join("scribe").join("history.jsonl")),
        }
    }
}
