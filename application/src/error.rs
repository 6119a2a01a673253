//! Error type shared by all use cases

use crate::ports::attachment_store::AttachmentError;
use crate::ports::award_repository::RepositoryError;
use award_domain::DomainError;
use thiserror::Error;

/// Flat classification an outer layer maps to its own responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    DuplicateSubmission,
    NoOpenPeriod,
    /// Actor or role not permitted for the operation
    Forbidden,
    ScopeResolution,
    NotFound,
    /// Malformed transition or vote request
    BadRequest,
    NoEligibleVoters,
    /// Lost a race with a concurrent change
    Conflict,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::DuplicateSubmission => "duplicate_submission",
            ErrorKind::NoOpenPeriod => "no_open_period",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::ScopeResolution => "scope_resolution",
            ErrorKind::NotFound => "not_found",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::NoEligibleVoters => "no_eligible_voters",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the workflow use cases
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Attachment error: {0}")]
    Attachment(#[from] AttachmentError),
}

impl From<RepositoryError> for WorkflowError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Domain(e) => WorkflowError::Domain(e),
            RepositoryError::Storage(msg) => WorkflowError::Storage(msg),
        }
    }
}

impl WorkflowError {
    pub fn kind(&self) -> ErrorKind {
        let WorkflowError::Domain(err) = self else {
            return ErrorKind::Internal;
        };
        match err {
            DomainError::Validation { .. } => ErrorKind::Validation,
            DomainError::DuplicateSubmission { .. } => ErrorKind::DuplicateSubmission,
            DomainError::NoOpenPeriod => ErrorKind::NoOpenPeriod,
            DomainError::UnauthorizedSubmitter(_)
            | DomainError::NotEligibleVoter(_)
            | DomainError::WrongChannel(_)
            | DomainError::OutOfScope(_) => ErrorKind::Forbidden,
            DomainError::ScopeResolution { .. } => ErrorKind::ScopeResolution,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::MissingReason(_)
            | DomainError::InvalidOperation(_)
            | DomainError::IllegalTransition { .. }
            | DomainError::VotingClosed(_) => ErrorKind::BadRequest,
            DomainError::NoEligibleVoters => ErrorKind::NoEligibleVoters,
            DomainError::StaleStatus { .. } => ErrorKind::Conflict,
        }
    }

    /// The domain error, if this is one
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            WorkflowError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
