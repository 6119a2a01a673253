//! Port for the structured workflow journal.
//!
//! Defines the [`EventJournal`] trait for recording workflow events
//! (submissions, status changes, votes, signatures) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures every
//! decision in a machine-readable format (JSONL).

use award_domain::{
    Actor, CommitteeVoteResult, Form, FormId, FormStatus, Role, StatusChange, UserId,
};
use serde::Serialize;
use serde_json::{Value, json};

/// What happened to a nomination or the committee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NominationSubmitted,
    StatusChanged,
    AwardTypeChanged,
    VoteCast,
    NominationSigned,
    ChairmanChanged,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::NominationSubmitted => "nomination_submitted",
            EventKind::StatusChanged => "status_changed",
            EventKind::AwardTypeChanged => "award_type_changed",
            EventKind::VoteCast => "vote_cast",
            EventKind::NominationSigned => "nomination_signed",
            EventKind::ChairmanChanged => "chairman_changed",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One journal record.
///
/// The form and the acting user sit at the top level so the journal can be
/// filtered per form or per reviewer; the rest is kind-specific `detail`.
/// The journal adds the timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowEvent {
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<FormId>,
    /// Acting user; absent for committee tallies and operator commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub detail: Value,
}

impl WorkflowEvent {
    fn on_form(kind: EventKind, form_id: FormId, actor: Option<Actor>, detail: Value) -> Self {
        Self {
            kind,
            form_id: Some(form_id),
            actor: actor.map(|a| a.user_id),
            role: actor.map(|a| a.role),
            detail,
        }
    }

    pub fn nomination_submitted(form: &Form, actor: Actor) -> Self {
        Self::on_form(
            EventKind::NominationSubmitted,
            form.id,
            Some(actor),
            json!({
                "period": form.period.to_string(),
                "award_type": form.award_type,
                "attachments": form.attachments.len(),
            }),
        )
    }

    pub fn status_changed(change: &StatusChange, actor: Option<Actor>) -> Self {
        Self::on_form(
            EventKind::StatusChanged,
            change.form_id,
            actor,
            json!({
                "from": change.from,
                "to": change.to,
                "reject_reason": change.reject_reason,
                "audit": change.audit.as_ref().map(|a| a.trail()),
            }),
        )
    }

    pub fn award_type_changed(form_id: FormId, award_type: &str) -> Self {
        Self::on_form(
            EventKind::AwardTypeChanged,
            form_id,
            None,
            json!({ "award_type": award_type }),
        )
    }

    pub fn vote_cast(form_id: FormId, voter: UserId, result: &CommitteeVoteResult) -> Self {
        Self::on_form(
            EventKind::VoteCast,
            form_id,
            Some(Actor::new(voter, Role::Committee)),
            json!({
                "operation": result.operation,
                "approve_count": result.approve_count,
                "reject_count": result.reject_count,
                "total_voters": result.total_voters,
                "form_status": result.form_status,
                "status_changed": result.status_changed,
            }),
        )
    }

    pub fn nomination_signed(form_id: FormId, signer: Actor, status: FormStatus) -> Self {
        Self::on_form(
            EventKind::NominationSigned,
            form_id,
            Some(signer),
            json!({ "signed_status": status }),
        )
    }

    pub fn chairman_changed(member: UserId, is_chairman: bool) -> Self {
        Self {
            kind: EventKind::ChairmanChanged,
            form_id: None,
            actor: None,
            role: None,
            detail: json!({ "member": member, "is_chairman": is_chairman }),
        }
    }
}

/// Port for recording workflow events to a structured journal
pub trait EventJournal: Send + Sync {
    /// Record a workflow event.
    fn record(&self, event: WorkflowEvent);
}

/// No-op implementation for tests and when the journal is disabled.
pub struct NoEventJournal;

impl EventJournal for NoEventJournal {
    fn record(&self, _event: WorkflowEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use award_domain::{VoteOperation, VoteTally};

    #[test]
    fn test_vote_cast_event() {
        let tally = VoteTally::new(5, 3, 1);
        let result = CommitteeVoteResult::new(
            VoteOperation::Approve,
            &tally,
            FormStatus::CommitteeApproved,
            true,
        );
        let event = WorkflowEvent::vote_cast(FormId(7), UserId(3), &result);
        assert_eq!(event.kind, EventKind::VoteCast);
        assert_eq!(event.form_id, Some(FormId(7)));
        assert_eq!(event.actor, Some(UserId(3)));
        assert_eq!(event.detail["approve_count"], 3);
        assert_eq!(event.detail["form_status"], 10);
        assert_eq!(event.detail["status_changed"], true);
    }

    #[test]
    fn test_chairman_change_has_no_form() {
        let event = WorkflowEvent::chairman_changed(UserId(9), true);
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["kind"], "chairman_changed");
        assert!(value.get("form_id").is_none());
        assert_eq!(value["detail"]["member"], 9);
        assert_eq!(value["detail"]["is_chairman"], true);
    }
}
