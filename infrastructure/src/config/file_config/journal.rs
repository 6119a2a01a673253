//! Journal configuration from TOML (`[journal]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw journal configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJournalConfig {
    /// Write workflow events as JSONL
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for FileJournalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("award-journal.jsonl"),
        }
    }
}
