//! Application layer for award-workflow
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{PagingPolicy, WorkflowPolicy};
pub use error::{ErrorKind, WorkflowError};
pub use ports::{
    academic_calendar::AcademicCalendar,
    attachment_store::{AttachmentError, AttachmentStore},
    award_repository::{AwardRepository, RecordedVote, RepositoryError},
    event_journal::{EventJournal, EventKind, NoEventJournal, WorkflowEvent},
    profile_directory::{CommitteeMember, CommitteeRoster, ProfileDirectory},
};
pub use use_cases::cast_vote::{CastVoteInput, CastVoteUseCase};
pub use use_cases::change_status::{ChangeStatusInput, ChangeStatusUseCase, StatusChangeOutcome};
pub use use_cases::queries::{ApprovalLogDetail, AuditTrail, NominationQueries};
pub use use_cases::resolve_scope::ScopeResolver;
pub use use_cases::set_chairman::SetChairmanUseCase;
pub use use_cases::sign_nomination::SignNominationUseCase;
pub use use_cases::submit_nomination::{SubmitNominationInput, SubmitNominationUseCase};
pub use use_cases::update_award_type::UpdateAwardTypeUseCase;
