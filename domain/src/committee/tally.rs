//! Vote tally and the committee decision rule

use super::vote::VoteOperation;
use crate::core::ids::FormId;
use crate::nomination::status::FormStatus;
use crate::review::transition::StatusChange;
use serde::{Deserialize, Serialize};

/// Default reason stored on a majority rejection
pub const DEFAULT_COMMITTEE_REJECT_REASON: &str = "Not endorsed by the committee";

/// Outcome of the committee tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitteeOutcome {
    /// Majority approved
    Approved,
    /// Majority rejected
    Rejected,
    /// No majority yet (including ties)
    Pending,
}

impl CommitteeOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, CommitteeOutcome::Approved)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, CommitteeOutcome::Rejected)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, CommitteeOutcome::Pending)
    }

    /// Status the form moves to for this outcome
    pub fn target_status(&self) -> Option<FormStatus> {
        match self {
            CommitteeOutcome::Approved => Some(FormStatus::CommitteeApproved),
            CommitteeOutcome::Rejected => Some(FormStatus::CommitteeRejected),
            CommitteeOutcome::Pending => None,
        }
    }
}

impl std::fmt::Display for CommitteeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitteeOutcome::Approved => write!(f, "Approved"),
            CommitteeOutcome::Rejected => write!(f, "Rejected"),
            CommitteeOutcome::Pending => write!(f, "Pending"),
        }
    }
}

/// Snapshot of the committed votes on one form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Non-chairman committee members at evaluation time
    pub eligible_voters: usize,
    pub approve_count: usize,
    pub reject_count: usize,
}

impl VoteTally {
    pub fn new(eligible_voters: usize, approve_count: usize, reject_count: usize) -> Self {
        Self {
            eligible_voters,
            approve_count,
            reject_count,
        }
    }

    /// Count the current votes of a form
    pub fn from_votes<'a>(
        eligible_voters: usize,
        votes: impl IntoIterator<Item = &'a VoteOperation>,
    ) -> Self {
        let (approve_count, reject_count) =
            votes.into_iter().fold((0, 0), |(a, r), op| match op {
                VoteOperation::Approve => (a + 1, r),
                VoteOperation::Reject => (a, r + 1),
            });
        Self::new(eligible_voters, approve_count, reject_count)
    }

    /// `N / 2`, floored
    pub fn half(&self) -> usize {
        self.eligible_voters / 2
    }

    /// Votes needed for a decision (`half + 1`)
    pub fn majority_target(&self) -> usize {
        self.half() + 1
    }

    pub fn has_approve_majority(&self) -> bool {
        self.eligible_voters > 0 && self.approve_count > self.half()
    }

    pub fn has_reject_majority(&self) -> bool {
        self.eligible_voters > 0 && self.reject_count > self.half()
    }

    pub fn has_majority(&self) -> bool {
        self.has_approve_majority() || self.has_reject_majority()
    }

    /// Distinct members who have voted so far
    pub fn voted_count(&self) -> usize {
        self.approve_count + self.reject_count
    }

    /// Approval is checked first
    pub fn outcome(&self) -> CommitteeOutcome {
        if self.has_approve_majority() {
            CommitteeOutcome::Approved
        } else if self.has_reject_majority() {
            CommitteeOutcome::Rejected
        } else {
            CommitteeOutcome::Pending
        }
    }

    /// Visual summary, e.g. `[●●○··]` (approve, reject, not yet voted)
    pub fn vote_summary(&self) -> String {
        let pending = self.eligible_voters.saturating_sub(self.voted_count());
        let mut summary = String::from("[");
        summary.extend(std::iter::repeat_n('●', self.approve_count));
        summary.extend(std::iter::repeat_n('○', self.reject_count));
        summary.extend(std::iter::repeat_n('·', pending));
        summary.push(']');
        summary
    }
}

/// Turns a tally into a status change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeRule {
    /// Reason stored on the form when the majority rejects
    pub reject_reason: String,
}

impl Default for CommitteeRule {
    fn default() -> Self {
        Self {
            reject_reason: DEFAULT_COMMITTEE_REJECT_REASON.to_string(),
        }
    }
}

impl CommitteeRule {
    pub fn new(reject_reason: impl Into<String>) -> Self {
        Self {
            reject_reason: reject_reason.into(),
        }
    }

    /// Statuses during which committee votes are accepted
    pub fn accepts_votes(status: FormStatus) -> bool {
        status.is_committee_controlled()
    }

    /// Plan the transition the tally calls for.
    ///
    /// Returns `None` while pending, or when the form already carries the
    /// resulting status (re-applying it is a no-op).
    pub fn resolve(
        &self,
        form_id: FormId,
        current: FormStatus,
        tally: &VoteTally,
    ) -> Option<StatusChange> {
        let outcome = tally.outcome();
        let to = outcome.target_status()?;
        if to == current {
            return None;
        }
        let reject_reason = outcome
            .is_rejected()
            .then(|| self.reject_reason.clone());
        Some(StatusChange {
            form_id,
            from: current,
            to,
            reject_reason,
            audit: None,
        })
    }
}

/// What a vote call reports back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitteeVoteResult {
    pub operation: VoteOperation,
    pub approve_count: usize,
    pub reject_count: usize,
    pub total_voters: usize,
    pub voted_count: usize,
    pub has_majority: bool,
    pub majority_target: usize,
    pub form_status: FormStatus,
    /// Whether this call moved the form
    pub status_changed: bool,
}

impl CommitteeVoteResult {
    pub fn new(
        operation: VoteOperation,
        tally: &VoteTally,
        form_status: FormStatus,
        status_changed: bool,
    ) -> Self {
        Self {
            operation,
            approve_count: tally.approve_count,
            reject_count: tally.reject_count,
            total_voters: tally.eligible_voters,
            voted_count: tally.voted_count(),
            has_majority: tally.has_majority(),
            majority_target: tally.majority_target(),
            form_status,
            status_changed,
        }
    }
}
