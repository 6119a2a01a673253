//! Committee configuration from TOML (`[committee]` section)

use award_domain::committee::tally::DEFAULT_COMMITTEE_REJECT_REASON;
use serde::{Deserialize, Serialize};

/// Raw committee configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCommitteeConfig {
    /// Reason stored on a form when the majority rejects it
    pub reject_reason: String,
}

impl Default for FileCommitteeConfig {
    fn default() -> Self {
        Self {
            reject_reason: DEFAULT_COMMITTEE_REJECT_REASON.to_string(),
        }
    }
}
