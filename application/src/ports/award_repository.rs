//! Award repository port
//!
//! Persistence of forms and their audit trails. Every mutating call is one
//! atomic unit: it either completes fully or leaves no trace.

use async_trait::async_trait;
use award_domain::{
    AcademicPeriod, ApprovalHistoryFilter, ApprovalHistoryRow, ApprovalLog, Ballot,
    CommitteeRule, DomainError, Form, FormFilter, FormId, FormStatus, LogId, NominationDraft,
    Page, PageRequest, SignedLog, StatusChange, StoredFile, TypeLog, UserId, VoteLog, VoteTally,
};
use thiserror::Error;

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A rule enforced inside the storage transaction was violated
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// What a recorded vote did to the form
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedVote {
    /// Tally over all current votes of the form after the upsert
    pub tally: VoteTally,
    /// Status before the vote
    pub previous_status: FormStatus,
    /// Status after the tally was applied
    pub form_status: FormStatus,
    /// Whether this vote moved the form
    pub status_changed: bool,
}

/// Storage of nomination forms and their logs.
///
/// Implementations live in the infrastructure layer.
#[async_trait]
pub trait AwardRepository: Send + Sync {
    /// Create a form with its attachment rows in one transaction.
    ///
    /// Fails with [`DomainError::DuplicateSubmission`] when the draft's owner
    /// already has a form for the draft's period.
    async fn create_nomination(
        &self,
        draft: NominationDraft,
        files: Vec<StoredFile>,
    ) -> Result<Form, RepositoryError>;

    async fn exists_for_period(
        &self,
        user_id: UserId,
        period: AcademicPeriod,
    ) -> Result<bool, RepositoryError>;

    async fn find_form(&self, form_id: FormId) -> Result<Option<Form>, RepositoryError>;

    /// Forms owned by a user, newest first
    async fn forms_by_user(&self, user_id: UserId) -> Result<Vec<Form>, RepositoryError>;

    async fn forms_by_user_and_year(
        &self,
        user_id: UserId,
        year: i32,
    ) -> Result<Vec<Form>, RepositoryError>;

    async fn form_by_user_and_period(
        &self,
        user_id: UserId,
        period: AcademicPeriod,
    ) -> Result<Option<Form>, RepositoryError>;

    /// Forms owned by a user in any of `years`, newest first
    async fn forms_by_user_in_years(
        &self,
        user_id: UserId,
        years: &[i32],
        page: PageRequest,
    ) -> Result<Page<Form>, RepositoryError>;

    /// Filtered, sorted, paged search
    async fn search_forms(
        &self,
        filter: &FormFilter,
        page: PageRequest,
    ) -> Result<Page<Form>, RepositoryError>;

    /// Distinct award types in use, sorted
    async fn award_types(&self) -> Result<Vec<String>, RepositoryError>;

    /// Returns `false` when the form already has this award type
    async fn update_award_type(
        &self,
        form_id: FormId,
        award_type: &str,
    ) -> Result<bool, RepositoryError>;

    /// Apply a planned status change together with its audit row.
    ///
    /// Compare-and-set on `change.from`: returns `Ok(false)` when the form is
    /// already in `change.to`, and fails with [`DomainError::StaleStatus`]
    /// when it is in any other status.
    async fn apply_status_change(&self, change: &StatusChange) -> Result<bool, RepositoryError>;

    /// Upsert a vote, recount and apply the resulting transition atomically
    async fn record_vote(
        &self,
        ballot: Ballot,
        rule: &CommitteeRule,
    ) -> Result<RecordedVote, RepositoryError>;

    async fn find_approval_log(&self, log_id: LogId)
    -> Result<Option<ApprovalLog>, RepositoryError>;

    async fn approval_logs(&self, form_id: FormId) -> Result<Vec<ApprovalLog>, RepositoryError>;

    /// A reviewer's decisions joined with their forms
    async fn approval_history(
        &self,
        filter: &ApprovalHistoryFilter,
        page: PageRequest,
    ) -> Result<Page<ApprovalHistoryRow>, RepositoryError>;

    async fn type_logs(&self, form_id: FormId) -> Result<Vec<TypeLog>, RepositoryError>;

    async fn signed_logs(&self, form_id: FormId) -> Result<Vec<SignedLog>, RepositoryError>;

    async fn vote_logs(&self, form_id: FormId) -> Result<Vec<VoteLog>, RepositoryError>;
}
