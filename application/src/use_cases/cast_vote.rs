//! Cast vote use case
//!
//! Records a committee member's current vote on a form. The store upserts
//! the vote, recounts and applies any majority transition in one
//! transaction, so concurrent votes never decide on stale counts.

use crate::error::WorkflowError;
use crate::ports::award_repository::AwardRepository;
use crate::ports::event_journal::{EventJournal, WorkflowEvent};
use crate::ports::profile_directory::ProfileDirectory;
use award_domain::{
    Actor, ActorProfile, Ballot, CommitteeRule, CommitteeVoteResult, DomainError, FormId,
    StatusChange, VoteOperation,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CastVoteInput {
    pub form_id: FormId,
    pub actor: Actor,
    /// Free-form operation; `approve(d)` or `reject(ed)`
    pub operation: String,
}

pub struct CastVoteUseCase {
    repository: Arc<dyn AwardRepository>,
    profiles: Arc<dyn ProfileDirectory>,
    journal: Arc<dyn EventJournal>,
    rule: CommitteeRule,
}

impl CastVoteUseCase {
    pub fn new(
        repository: Arc<dyn AwardRepository>,
        profiles: Arc<dyn ProfileDirectory>,
        journal: Arc<dyn EventJournal>,
        rule: CommitteeRule,
    ) -> Self {
        Self {
            repository,
            profiles,
            journal,
            rule,
        }
    }

    pub async fn execute(
        &self,
        input: CastVoteInput,
    ) -> Result<CommitteeVoteResult, WorkflowError> {
        let CastVoteInput {
            form_id,
            actor,
            operation,
        } = input;

        let eligible = matches!(
            self.profiles.profile(actor.user_id).await?,
            Some(ActorProfile::Committee(p)) if !p.is_chairman
        );
        if !eligible {
            return Err(DomainError::NotEligibleVoter(actor.user_id).into());
        }

        let operation: VoteOperation = operation.parse()?;

        let ballot = Ballot {
            form_id,
            voter_id: actor.user_id,
            operation,
        };
        let recorded = self.repository.record_vote(ballot, &self.rule).await?;
        let result = CommitteeVoteResult::new(
            operation,
            &recorded.tally,
            recorded.form_status,
            recorded.status_changed,
        );

        info!(
            "User {} voted {} on form {}: {} (majority at {})",
            actor.user_id,
            operation,
            form_id,
            recorded.tally.vote_summary(),
            result.majority_target
        );
        self.journal
            .record(WorkflowEvent::vote_cast(form_id, actor.user_id, &result));

        if recorded.status_changed {
            info!("Committee majority moved form {} to {}", form_id, recorded.form_status);
            let change = StatusChange {
                form_id,
                from: recorded.previous_status,
                to: recorded.form_status,
                reject_reason: recorded
                    .form_status
                    .requires_reason()
                    .then(|| self.rule.reject_reason.clone()),
                audit: None,
            };
            self.journal.record(WorkflowEvent::status_changed(&change, None));
        }

        Ok(result)
    }
}
