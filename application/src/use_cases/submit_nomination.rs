//! Submit nomination use case
//!
//! Creates a form in status 1 for the current academic period. All uploads
//! are validated before any is stored; stored files are removed again when
//! the form cannot be persisted.

use crate::config::WorkflowPolicy;
use crate::error::WorkflowError;
use crate::ports::academic_calendar::AcademicCalendar;
use crate::ports::attachment_store::AttachmentStore;
use crate::ports::award_repository::AwardRepository;
use crate::ports::event_journal::{EventJournal, WorkflowEvent};
use crate::ports::profile_directory::ProfileDirectory;
use award_domain::{Actor, DomainError, Form, NominationInput, StoredFile, Upload};
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the SubmitNomination use case.
#[derive(Debug, Clone)]
pub struct SubmitNominationInput {
    pub actor: Actor,
    pub nomination: NominationInput,
    pub uploads: Vec<Upload>,
}

impl SubmitNominationInput {
    pub fn new(actor: Actor, nomination: NominationInput) -> Self {
        Self {
            actor,
            nomination,
            uploads: Vec::new(),
        }
    }

    pub fn with_uploads(mut self, uploads: Vec<Upload>) -> Self {
        self.uploads = uploads;
        self
    }
}

pub struct SubmitNominationUseCase {
    repository: Arc<dyn AwardRepository>,
    profiles: Arc<dyn ProfileDirectory>,
    calendar: Arc<dyn AcademicCalendar>,
    attachments: Arc<dyn AttachmentStore>,
    journal: Arc<dyn EventJournal>,
    policy: WorkflowPolicy,
}

impl SubmitNominationUseCase {
    pub fn new(
        repository: Arc<dyn AwardRepository>,
        profiles: Arc<dyn ProfileDirectory>,
        calendar: Arc<dyn AcademicCalendar>,
        attachments: Arc<dyn AttachmentStore>,
        journal: Arc<dyn EventJournal>,
        policy: WorkflowPolicy,
    ) -> Self {
        Self {
            repository,
            profiles,
            calendar,
            attachments,
            journal,
            policy,
        }
    }

    pub async fn execute(&self, input: SubmitNominationInput) -> Result<Form, WorkflowError> {
        let SubmitNominationInput {
            actor,
            nomination,
            uploads,
        } = input;

        if !actor.role.is_submitter() {
            return Err(DomainError::UnauthorizedSubmitter(actor.role).into());
        }

        let period = self
            .calendar
            .current_open_period()
            .await?
            .ok_or(DomainError::NoOpenPeriod)?;

        let profile = self
            .profiles
            .profile(actor.user_id)
            .await?
            .filter(|p| p.role() == actor.role)
            .ok_or_else(|| DomainError::not_found("profile", actor.user_id))?;

        let draft = nomination.prepare(actor.user_id, &profile, period)?;

        if self
            .repository
            .exists_for_period(actor.user_id, period)
            .await?
        {
            return Err(DomainError::DuplicateSubmission {
                user: actor.user_id,
                period,
            }
            .into());
        }

        let total_bytes = self.policy.attachments.validate(&uploads)?;

        let stored = self.store_all(&uploads).await?;

        match self.repository.create_nomination(draft, stored.clone()).await {
            Ok(form) => {
                info!(
                    "Nomination {} submitted by user {} for {} ({} files, {} bytes)",
                    form.id,
                    actor.user_id,
                    period,
                    stored.len(),
                    total_bytes
                );
                self.journal
                    .record(WorkflowEvent::nomination_submitted(&form, actor));
                Ok(form)
            }
            Err(e) => {
                warn!("Persisting nomination failed, removing {} stored files", stored.len());
                self.remove_all(&stored).await;
                Err(e.into())
            }
        }
    }

    /// Store every upload; on the first failure remove what was stored
    async fn store_all(&self, uploads: &[Upload]) -> Result<Vec<StoredFile>, WorkflowError> {
        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            match self.attachments.save(upload).await {
                Ok(file) => stored.push(file),
                Err(e) => {
                    self.remove_all(&stored).await;
                    return Err(e.into());
                }
            }
        }
        Ok(stored)
    }

    async fn remove_all(&self, files: &[StoredFile]) {
        for file in files {
            if let Err(e) = self.attachments.remove(file).await {
                warn!("Failed to clean up {}: {}", file.file_path, e);
            }
        }
    }
}
