//! Chairman signing use case
//!
//! The committee chairman does not vote; once the majority approved a form
//! (status 10) the chairman signs it, moving it to status 12. The chancellor
//! signs afterwards through [`ChangeStatusUseCase`](super::change_status::ChangeStatusUseCase).

use super::change_status::StatusChangeOutcome;
use crate::error::WorkflowError;
use crate::ports::award_repository::AwardRepository;
use crate::ports::event_journal::{EventJournal, WorkflowEvent};
use crate::ports::profile_directory::ProfileDirectory;
use award_domain::{
    Actor, DomainError, FormId, FormStatus, Role, plan_chairman_signature,
};
use std::sync::Arc;
use tracing::info;

pub struct SignNominationUseCase {
    repository: Arc<dyn AwardRepository>,
    profiles: Arc<dyn ProfileDirectory>,
    journal: Arc<dyn EventJournal>,
}

impl SignNominationUseCase {
    pub fn new(
        repository: Arc<dyn AwardRepository>,
        profiles: Arc<dyn ProfileDirectory>,
        journal: Arc<dyn EventJournal>,
    ) -> Self {
        Self {
            repository,
            profiles,
            journal,
        }
    }

    /// Sign `form_id` as committee chairman.
    ///
    /// Signing an already signed form is a no-op.
    pub async fn execute(
        &self,
        form_id: FormId,
        actor: Actor,
    ) -> Result<StatusChangeOutcome, WorkflowError> {
        let form = self
            .repository
            .find_form(form_id)
            .await?
            .ok_or_else(|| DomainError::not_found("form", form_id))?;

        let is_chairman = actor.role == Role::Committee
            && self
                .profiles
                .profile(actor.user_id)
                .await?
                .is_some_and(|p| p.is_chairman());
        if !is_chairman {
            return Err(DomainError::IllegalTransition {
                role: actor.role,
                from: form.status,
                to: FormStatus::ChairmanSigned,
            }
            .into());
        }

        let Some(change) = plan_chairman_signature(&form, actor.user_id)? else {
            return Ok(StatusChangeOutcome {
                form_id,
                previous: form.status,
                status: form.status,
                changed: false,
            });
        };

        let changed = self.repository.apply_status_change(&change).await?;
        if changed {
            info!("Form {} signed by chairman {}", form_id, actor.user_id);
            self.journal
                .record(WorkflowEvent::status_changed(&change, Some(actor)));
            self.journal
                .record(WorkflowEvent::nomination_signed(form_id, actor, change.to));
        }

        Ok(StatusChangeOutcome {
            form_id,
            previous: change.from,
            status: change.to,
            changed,
        })
    }
}
