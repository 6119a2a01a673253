//! Attachment file storage port

use async_trait::async_trait;
use award_domain::{StoredFile, Upload};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("Failed to store {file}: {source}")]
    Write {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {file}: {source}")]
    Remove {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Stores uploaded file content and hands back its metadata
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    async fn save(&self, upload: &Upload) -> Result<StoredFile, AttachmentError>;

    async fn remove(&self, file: &StoredFile) -> Result<(), AttachmentError>;
}
