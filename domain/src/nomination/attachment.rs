//! Attachment upload policy
//!
//! Every upload is checked before any file is written: an unsupported
//! extension or an aggregate size over the cap rejects the whole batch.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default aggregate cap across all files of one submission (10 MiB)
pub const DEFAULT_MAX_TOTAL_BYTES: u64 = 10 * 1024 * 1024;

/// A file received with a submission, not yet stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Lower-cased extension without the dot
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

/// Metadata of a file that has been written to attachment storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub file_type: String,
    pub file_size: u64,
    pub file_path: String,
}

/// Allow-list and aggregate size cap for uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPolicy {
    pub allowed_extensions: Vec<String>,
    pub max_total_bytes: u64,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: vec!["pdf".to_string()],
            max_total_bytes: DEFAULT_MAX_TOTAL_BYTES,
        }
    }
}

impl AttachmentPolicy {
    pub fn new(allowed_extensions: Vec<String>, max_total_bytes: u64) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            max_total_bytes,
        }
    }

    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == extension)
    }

    /// Validate the whole batch, returning the aggregate size
    pub fn validate(&self, uploads: &[Upload]) -> Result<u64, DomainError> {
        let mut total: u64 = 0;
        for upload in uploads {
            let extension = upload.extension().unwrap_or_default();
            if !self.allows_extension(&extension) {
                return Err(DomainError::validation(
                    "files",
                    format!(
                        "file type '.{}' of {} is not allowed (allowed: {})",
                        extension,
                        upload.file_name,
                        self.allowed_extensions.join(", ")
                    ),
                ));
            }
            total = total.saturating_add(upload.size());
        }

        if total > self.max_total_bytes {
            return Err(DomainError::validation(
                "files",
                format!(
                    "total attachment size {:.2} MB exceeds {:.2} MB",
                    total as f64 / (1024.0 * 1024.0),
                    self.max_total_bytes as f64 / (1024.0 * 1024.0)
                ),
            ));
        }

        Ok(total)
    }
}
