//! Update award type use case
//!
//! Reclassifies a form. Independent of its status and writes no audit row.

use crate::error::WorkflowError;
use crate::ports::award_repository::AwardRepository;
use crate::ports::event_journal::{EventJournal, WorkflowEvent};
use award_domain::{DomainError, FormId};
use std::sync::Arc;
use tracing::info;

pub struct UpdateAwardTypeUseCase {
    repository: Arc<dyn AwardRepository>,
    journal: Arc<dyn EventJournal>,
}

impl UpdateAwardTypeUseCase {
    pub fn new(repository: Arc<dyn AwardRepository>, journal: Arc<dyn EventJournal>) -> Self {
        Self {
            repository,
            journal,
        }
    }

    /// Returns `false` when the form already had this award type
    pub async fn execute(&self, form_id: FormId, award_type: &str) -> Result<bool, WorkflowError> {
        let award_type = award_type.trim();
        if award_type.is_empty() {
            return Err(DomainError::validation("award_type", "must not be empty").into());
        }

        let changed = self
            .repository
            .update_award_type(form_id, award_type)
            .await?;
        if changed {
            info!("Form {} reclassified as {}", form_id, award_type);
            self.journal
                .record(WorkflowEvent::award_type_changed(form_id, award_type));
        }
        Ok(changed)
    }
}
