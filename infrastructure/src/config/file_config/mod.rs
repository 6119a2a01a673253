//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod committee;
mod journal;
mod output;
mod search;
mod storage;
mod uploads;

pub use committee::FileCommitteeConfig;
pub use journal::FileJournalConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use search::FileSearchConfig;
pub use storage::FileStorageConfig;
pub use uploads::FileUploadsConfig;

use award_application::{PagingPolicy, WorkflowPolicy};
use award_domain::{AttachmentPolicy, CommitteeRule, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Attachment storage and limits
    pub uploads: FileUploadsConfig,
    /// Committee vote settings
    pub committee: FileCommitteeConfig,
    /// Paging limits
    pub search: FileSearchConfig,
    /// Workflow event journal
    pub journal: FileJournalConfig,
    /// State file used by the CLI
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Callers abort on any issue with `Severity::Error`.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.uploads.allowed_extensions.iter().all(|e| e.trim().is_empty()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoAllowedExtensions,
                "uploads.allowed_extensions: no extension is allowed, every upload would fail",
            ));
        }
        if self.uploads.max_total_bytes == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroUploadLimit,
                "uploads.max_total_bytes: must be greater than 0",
            ));
        }

        issues.extend(self.search.validate());

        if self.committee.reject_reason.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyRejectReason,
                "committee.reject_reason: must not be blank",
            ));
        }

        if self.journal.enabled && self.journal.path.as_os_str().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::JournalWithoutPath,
                "journal.path: empty, the journal will be disabled",
            ));
        }

        issues
    }

    /// Build the workflow policy handed to the use cases
    pub fn to_policy(&self) -> WorkflowPolicy {
        WorkflowPolicy::default()
            .with_attachments(AttachmentPolicy::new(
                self.uploads.allowed_extensions.clone(),
                self.uploads.max_total_bytes,
            ))
            .with_committee(CommitteeRule::new(self.committee.reject_reason.trim()))
            .with_paging(PagingPolicy {
                default_page_size: self.search.default_page_size,
                max_page_size: self.search.max_page_size,
                history_page_size: self.search.history_page_size,
            })
    }
}
