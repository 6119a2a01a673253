//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw storage configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// JSON snapshot holding forms, logs, profiles and periods
    pub snapshot: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("award-state.json"),
        }
    }
}
