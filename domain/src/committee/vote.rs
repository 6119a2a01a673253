//! Vote primitives

use crate::core::error::DomainError;
use crate::core::ids::{FormId, LogId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A committee member's choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOperation {
    Approve,
    Reject,
}

impl VoteOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteOperation::Approve => "approve",
            VoteOperation::Reject => "reject",
        }
    }

    pub fn is_approve(&self) -> bool {
        matches!(self, VoteOperation::Approve)
    }
}

impl std::fmt::Display for VoteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoteOperation {
    type Err = DomainError;

    /// Accepts `approve`/`approved` and `reject`/`rejected`, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approve" | "approved" => Ok(VoteOperation::Approve),
            "reject" | "rejected" => Ok(VoteOperation::Reject),
            _ => Err(DomainError::InvalidOperation(s.to_string())),
        }
    }
}

/// A vote to be recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub form_id: FormId,
    pub voter_id: UserId,
    pub operation: VoteOperation,
}

/// The current vote of one member on one form.
///
/// Keyed by `(form_id, voter_id)`; a later vote replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteLog {
    pub id: LogId,
    pub form_id: FormId,
    pub voter_id: UserId,
    pub operation: VoteOperation,
    pub voted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_synonyms() {
        assert_eq!("approve".parse::<VoteOperation>(), Ok(VoteOperation::Approve));
        assert_eq!(" Approved ".parse::<VoteOperation>(), Ok(VoteOperation::Approve));
        assert_eq!("REJECTED".parse::<VoteOperation>(), Ok(VoteOperation::Reject));
        assert_eq!("reject".parse::<VoteOperation>(), Ok(VoteOperation::Reject));
    }

    #[test]
    fn test_unknown_operation() {
        let err = "abstain".parse::<VoteOperation>().unwrap_err();
        assert_eq!(err, DomainError::InvalidOperation("abstain".to_string()));
        assert!("".parse::<VoteOperation>().is_err());
    }
}
