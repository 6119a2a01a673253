//! Set committee chairman use case

use crate::error::WorkflowError;
use crate::ports::event_journal::{EventJournal, WorkflowEvent};
use crate::ports::profile_directory::{CommitteeMember, CommitteeRoster};
use award_domain::UserId;
use std::sync::Arc;
use tracing::info;

pub struct SetChairmanUseCase {
    roster: Arc<dyn CommitteeRoster>,
    journal: Arc<dyn EventJournal>,
}

impl SetChairmanUseCase {
    pub fn new(roster: Arc<dyn CommitteeRoster>, journal: Arc<dyn EventJournal>) -> Self {
        Self { roster, journal }
    }

    /// Promote or demote `user_id` and return the resulting roster
    pub async fn execute(
        &self,
        user_id: UserId,
        is_chairman: bool,
    ) -> Result<Vec<CommitteeMember>, WorkflowError> {
        self.roster.set_chairman(user_id, is_chairman).await?;
        info!(
            "User {} {} committee chairman",
            user_id,
            if is_chairman { "is now" } else { "is no longer" }
        );
        self.journal
            .record(WorkflowEvent::chairman_changed(user_id, is_chairman));
        Ok(self.roster.members().await?)
    }
}
