//! Status transition engine
//!
//! Pure planning of a status change: which role may move a form from which
//! status to which, whether a reason is mandatory, and which single audit
//! row accompanies the change. Persisting the plan is the store's job.

use super::audit::{AuditEntry, TypeLogKind};
use crate::actor::{Actor, Role};
use crate::core::error::DomainError;
use crate::core::ids::{FormId, UserId};
use crate::nomination::entities::Form;
use crate::nomination::status::{Decision, FormStatus};
use serde::{Deserialize, Serialize};

/// A planned status change.
///
/// The store applies it only if the form is still in `from`; if the form is
/// already in `to` the change is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub form_id: FormId,
    pub from: FormStatus,
    pub to: FormStatus,
    pub reject_reason: Option<String>,
    pub audit: Option<AuditEntry>,
}

/// Which audit trail a single-reviewer decision writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionPath {
    /// Approval log for decisions, signed log for signatures
    Plain,
    /// Type log for decisions, signed log for signatures
    StudentDevelopment,
}

impl TransitionPath {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::StudentDevelopment => TransitionPath::StudentDevelopment,
            _ => TransitionPath::Plain,
        }
    }

    /// The audit row written when a form moves to `to`
    pub fn audit_for(
        &self,
        form: &Form,
        to: FormStatus,
        reject_reason: Option<&str>,
        user_id: UserId,
    ) -> Option<AuditEntry> {
        if to.is_signing() {
            return Some(AuditEntry::Signed {
                user_id,
                signed_status: to,
            });
        }

        let decision = to.decision()?;
        let reject_reason = reject_reason.map(str::to_string);
        match self {
            TransitionPath::Plain => Some(AuditEntry::Approval {
                user_id,
                decision,
                reject_reason,
            }),
            TransitionPath::StudentDevelopment => {
                let (log_type, old_value) = match decision {
                    Decision::Approve => (TypeLogKind::Approval, None),
                    Decision::Reject => (TypeLogKind::Rejection, Some(form.award_type.clone())),
                };
                Some(AuditEntry::Type {
                    user_id,
                    log_type,
                    old_value,
                    status: decision,
                    reject_reason,
                })
            }
        }
    }
}

/// Targets a single reviewer may choose from a given status
pub fn allowed_targets(role: Role, from: FormStatus) -> &'static [FormStatus] {
    use FormStatus::*;
    match (role, from) {
        (Role::HeadOfDepartment, New) => &[HeadApproved, HeadRejected],
        (Role::AssociateDean, HeadApproved) => &[AssociateDeanApproved, AssociateDeanRejected],
        (Role::Dean, AssociateDeanApproved) => &[DeanApproved, DeanRejected],
        (Role::StudentDevelopment, DeanApproved) => {
            &[ForwardedToCommittee, ReturnedByStudentDevelopment]
        }
        (Role::Chancellor, ChairmanSigned) => &[ChancellorSigned],
        _ => &[],
    }
}

/// Plan a change requested through the generic status entry point.
///
/// Returns `Ok(None)` when the form already has the requested status.
pub fn plan_status_change(
    form: &Form,
    requested: FormStatus,
    reason: &str,
    actor: Actor,
) -> Result<Option<StatusChange>, DomainError> {
    if actor.role == Role::Committee {
        return Err(DomainError::WrongChannel(actor.role));
    }

    if form.status == requested {
        return Ok(None);
    }

    if !allowed_targets(actor.role, form.status).contains(&requested) {
        return Err(DomainError::IllegalTransition {
            role: actor.role,
            from: form.status,
            to: requested,
        });
    }

    let reason = reason.trim();
    let reject_reason = if requested.requires_reason() {
        if reason.is_empty() {
            return Err(DomainError::MissingReason(requested));
        }
        Some(reason.to_string())
    } else {
        None
    };

    let audit = TransitionPath::for_role(actor.role).audit_for(
        form,
        requested,
        reject_reason.as_deref(),
        actor.user_id,
    );

    Ok(Some(StatusChange {
        form_id: form.id,
        from: form.status,
        to: requested,
        reject_reason,
        audit,
    }))
}

/// Plan the chairman's signature on a committee-approved form.
///
/// The caller has already verified that `chairman` holds the chair.
pub fn plan_chairman_signature(
    form: &Form,
    chairman: UserId,
) -> Result<Option<StatusChange>, DomainError> {
    match form.status {
        FormStatus::ChairmanSigned => Ok(None),
        FormStatus::CommitteeApproved => Ok(Some(StatusChange {
            form_id: form.id,
            from: form.status,
            to: FormStatus::ChairmanSigned,
            reject_reason: None,
            audit: Some(AuditEntry::Signed {
                user_id: chairman,
                signed_status: FormStatus::ChairmanSigned,
            }),
        })),
        other => Err(DomainError::IllegalTransition {
            role: Role::Committee,
            from: other,
            to: FormStatus::ChairmanSigned,
        }),
    }
}
