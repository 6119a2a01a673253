//! Append-only audit records
//!
//! Three independent trails exist: the approval log (single-reviewer
//! decisions), the type log (student-development decisions, carrying the
//! award type on rejection) and the signed log (chairman and chancellor
//! signatures). Rows are never mutated.

use crate::core::ids::{FormId, LogId, UserId};
use crate::nomination::status::{Decision, FormStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalLog {
    pub id: LogId,
    pub form_id: FormId,
    pub user_id: UserId,
    pub decision: Decision,
    pub reject_reason: Option<String>,
    pub approved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeLogKind {
    Approval,
    Rejection,
}

impl TypeLogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeLogKind::Approval => "approval",
            TypeLogKind::Rejection => "rejection",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeLog {
    pub id: LogId,
    pub form_id: FormId,
    pub user_id: UserId,
    pub log_type: TypeLogKind,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub status: Decision,
    pub reject_reason: Option<String>,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedLog {
    pub id: LogId,
    pub form_id: FormId,
    pub user_id: UserId,
    /// 12 (chairman) or 13 (chancellor)
    pub signed_status: FormStatus,
    pub signed_at: DateTime<Utc>,
}

/// An audit row to append together with a status change.
///
/// The store assigns ids and timestamps when it commits the change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "trail", rename_all = "snake_case")]
pub enum AuditEntry {
    Approval {
        user_id: UserId,
        decision: Decision,
        reject_reason: Option<String>,
    },
    Type {
        user_id: UserId,
        log_type: TypeLogKind,
        old_value: Option<String>,
        status: Decision,
        reject_reason: Option<String>,
    },
    Signed {
        user_id: UserId,
        signed_status: FormStatus,
    },
}

impl AuditEntry {
    pub fn trail(&self) -> &'static str {
        match self {
            AuditEntry::Approval { .. } => "approval",
            AuditEntry::Type { .. } => "type",
            AuditEntry::Signed { .. } => "signed",
        }
    }
}
