//! Upload configuration from TOML (`[uploads]` section)

use award_domain::nomination::attachment::DEFAULT_MAX_TOTAL_BYTES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw upload configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUploadsConfig {
    /// Where attachment files are written
    pub directory: PathBuf,
    /// Accepted file extensions (case-insensitive)
    pub allowed_extensions: Vec<String>,
    /// Aggregate size cap across all files of one submission
    pub max_total_bytes: u64,
}

impl Default for FileUploadsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("uploads"),
            allowed_extensions: vec!["pdf".to_string()],
            max_total_bytes: DEFAULT_MAX_TOTAL_BYTES,
        }
    }
}
