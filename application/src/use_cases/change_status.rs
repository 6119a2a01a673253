//! Change status use case
//!
//! The generic entry point single reviewers (and the chancellor) use to move
//! a form along the review chain. Committee members are routed to
//! [`CastVoteUseCase`](super::cast_vote::CastVoteUseCase) instead.

use super::resolve_scope::ScopeResolver;
use crate::error::WorkflowError;
use crate::ports::award_repository::AwardRepository;
use crate::ports::event_journal::{EventJournal, WorkflowEvent};
use award_domain::{Actor, DomainError, FormId, FormStatus, Role, plan_status_change};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ChangeStatusInput {
    pub form_id: FormId,
    pub requested: FormStatus,
    /// Required for reject and return statuses, ignored otherwise
    pub reason: String,
    pub actor: Actor,
}

/// Result of a status change request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChangeOutcome {
    pub form_id: FormId,
    pub previous: FormStatus,
    pub status: FormStatus,
    /// `false` when the form already had the requested status
    pub changed: bool,
}

pub struct ChangeStatusUseCase {
    repository: Arc<dyn AwardRepository>,
    scopes: Arc<ScopeResolver>,
    journal: Arc<dyn EventJournal>,
}

impl ChangeStatusUseCase {
    pub fn new(
        repository: Arc<dyn AwardRepository>,
        scopes: Arc<ScopeResolver>,
        journal: Arc<dyn EventJournal>,
    ) -> Self {
        Self {
            repository,
            scopes,
            journal,
        }
    }

    pub async fn execute(
        &self,
        input: ChangeStatusInput,
    ) -> Result<StatusChangeOutcome, WorkflowError> {
        let ChangeStatusInput {
            form_id,
            requested,
            reason,
            actor,
        } = input;

        if actor.role == Role::Committee {
            return Err(DomainError::WrongChannel(actor.role).into());
        }

        let form = self
            .repository
            .find_form(form_id)
            .await?
            .ok_or_else(|| DomainError::not_found("form", form_id))?;

        let scope = self.scopes.resolve(actor).await?;
        if !scope.covers(&form) {
            return Err(DomainError::OutOfScope(actor.user_id).into());
        }

        let Some(change) = plan_status_change(&form, requested, &reason, actor)? else {
            debug!("Form {} already in status {}, nothing to do", form_id, requested);
            return Ok(StatusChangeOutcome {
                form_id,
                previous: form.status,
                status: form.status,
                changed: false,
            });
        };

        let changed = self.repository.apply_status_change(&change).await?;
        if changed {
            info!(
                "Form {} moved {} -> {} by user {} ({})",
                form_id, change.from, change.to, actor.user_id, actor.role
            );
            self.journal
                .record(WorkflowEvent::status_changed(&change, Some(actor)));
            if change.to.is_signing() {
                self.journal
                .record(WorkflowEvent::nomination_signed(form_id, actor, change.to));
            }
        }

        Ok(StatusChangeOutcome {
            form_id,
            previous: change.from,
            status: change.to,
            changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::event_journal::NoEventJournal;
    use crate::use_cases::test_support::{FakeProfiles, FakeRepository, form_in};
    use award_domain::{ActorProfile, AuditEntry, Decision, HeadOfDepartmentProfile};

    fn use_case(repository: Arc<FakeRepository>) -> ChangeStatusUseCase {
        let profiles = FakeProfiles::default().with(
            20,
            ActorProfile::HeadOfDepartment(HeadOfDepartmentProfile {
                faculty_id: 1,
                department_id: 1,
            }),
        );
        ChangeStatusUseCase::new(
            repository,
            Arc::new(ScopeResolver::new(Arc::new(profiles))),
            Arc::new(NoEventJournal),
        )
    }

    fn request(status: FormStatus, reason: &str, actor: Actor) -> ChangeStatusInput {
        ChangeStatusInput {
            form_id: FormId(1),
            requested: status,
            reason: reason.to_string(),
            actor,
        }
    }

    #[tokio::test]
    async fn test_reject_requires_reason() {
        let repository = Arc::new(FakeRepository::with_form(form_in(FormStatus::New)));
        let uc = use_case(repository.clone());
        let hod = Actor::new(20u64, Role::HeadOfDepartment);

        let err = uc
            .execute(request(FormStatus::HeadRejected, "", hod))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::MissingReason(FormStatus::HeadRejected))
        );
        assert!(repository.applied().is_empty());

        let outcome = uc
            .execute(request(FormStatus::HeadRejected, "incomplete documents", hod))
            .await
            .unwrap();
        assert!(outcome.changed);
        let applied = repository.applied();
        assert_eq!(applied.len(), 1);
        assert!(matches!(
            &applied[0].audit,
            Some(AuditEntry::Approval { decision: Decision::Reject, reject_reason: Some(r), .. })
                if r == "incomplete documents"
        ));
    }

    #[tokio::test]
    async fn test_same_status_is_noop() {
        let repository = Arc::new(FakeRepository::with_form(form_in(FormStatus::New)));
        let uc = use_case(repository.clone());
        let hod = Actor::new(20u64, Role::HeadOfDepartment);

        uc.execute(request(FormStatus::HeadApproved, "", hod))
            .await
            .unwrap();
        let second = uc
            .execute(request(FormStatus::HeadApproved, "", hod))
            .await
            .unwrap();

        assert!(!second.changed);
        assert_eq!(repository.applied().len(), 1);
    }

    #[tokio::test]
    async fn test_committee_uses_vote_channel() {
        let repository = Arc::new(FakeRepository::with_form(form_in(
            FormStatus::ForwardedToCommittee,
        )));
        let err = use_case(repository)
            .execute(request(
                FormStatus::CommitteeApproved,
                "",
                Actor::new(30u64, Role::Committee),
            ))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::WrongChannel(Role::Committee))
        );
    }

    #[tokio::test]
    async fn test_out_of_department_form() {
        let mut form = form_in(FormStatus::New);
        form.department_id = 9;
        let repository = Arc::new(FakeRepository::with_form(form));
        let err = use_case(repository)
            .execute(request(
                FormStatus::HeadApproved,
                "",
                Actor::new(20u64, Role::HeadOfDepartment),
            ))
            .await
            .unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::OutOfScope(20u64.into())));
    }

    #[tokio::test]
    async fn test_missing_form() {
        let repository = Arc::new(FakeRepository::default());
        let err = use_case(repository)
            .execute(request(
                FormStatus::HeadApproved,
                "",
                Actor::new(20u64, Role::HeadOfDepartment),
            ))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::NotFound);
    }
}
