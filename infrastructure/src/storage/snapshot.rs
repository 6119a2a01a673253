//! JSON snapshot of the whole store

use award_application::RepositoryError;
use award_domain::{
    AcademicPeriod, ActorProfile, ApprovalLog, Form, SignedLog, TypeLog, UserId, VoteLog,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A user's profile row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: UserId,
    pub profile: ActorProfile,
}

/// Everything the store holds, in serializable form.
///
/// Profiles and academic periods are reference data supplied by the
/// operator; forms and logs are written by the workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardSnapshot {
    pub periods: Vec<AcademicPeriod>,
    pub profiles: Vec<ProfileRecord>,
    pub forms: Vec<Form>,
    pub approval_logs: Vec<ApprovalLog>,
    pub type_logs: Vec<TypeLog>,
    pub signed_logs: Vec<SignedLog>,
    pub vote_logs: Vec<VoteLog>,
}

impl AwardSnapshot {
    /// Read a snapshot; a missing file yields an empty snapshot
    pub async fn read(path: &Path) -> Result<Self, RepositoryError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}, starting empty", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(RepositoryError::Storage(format!(
                    "reading {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        serde_json::from_str(&content).map_err(|e| {
            RepositoryError::Storage(format!("parsing {}: {}", path.display(), e))
        })
    }

    /// Write the snapshot through a temporary file and rename it into place
    pub async fn write(&self, path: &Path) -> Result<(), RepositoryError> {
        let storage = |e: std::io::Error| {
            RepositoryError::Storage(format!("writing {}: {}", path.display(), e))
        };
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RepositoryError::Storage(format!("serializing snapshot: {}", e)))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(storage)?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(storage)?;
        tokio::fs::rename(&tmp, path).await.map_err(storage)?;
        debug!("Snapshot written to {}", path.display());
        Ok(())
    }
}
