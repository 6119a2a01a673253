//! Infrastructure layer for award-workflow
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod attachments;
pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use attachments::LocalAttachmentStore;
pub use config::{
    ConfigLoader, ConfigSource, FileCommitteeConfig, FileConfig, FileJournalConfig,
    FileOutputConfig, FileOutputFormat, FileSearchConfig, FileStorageConfig, FileUploadsConfig,
};
pub use logging::JsonlEventJournal;
pub use storage::{AwardSnapshot, InMemoryAwardStore, ProfileRecord, StateLock, StateSession};
