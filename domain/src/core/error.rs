//! Domain error types

use crate::actor::role::Role;
use crate::core::ids::UserId;
use crate::core::period::AcademicPeriod;
use crate::nomination::status::FormStatus;
use thiserror::Error;

/// Domain-level errors
///
/// Each variant is a distinct semantic category so that an outer layer can
/// map it to an appropriate response without inspecting messages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("A nomination for period {period} already exists for user {user}")]
    DuplicateSubmission { user: UserId, period: AcademicPeriod },

    #[error("No academic period is currently open for submissions")]
    NoOpenPeriod,

    #[error("Role {0} may not submit nominations")]
    UnauthorizedSubmitter(Role),

    #[error("User {0} is not an eligible committee voter")]
    NotEligibleVoter(UserId),

    #[error("Role {0} must use the committee vote channel")]
    WrongChannel(Role),

    #[error("Review scope for user {user} ({role}) could not be resolved")]
    ScopeResolution { user: UserId, role: Role },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("A reason is required when moving a form to status {0}")]
    MissingReason(FormStatus),

    #[error("Invalid vote operation: {0}")]
    InvalidOperation(String),

    #[error("No eligible committee voters are registered")]
    NoEligibleVoters,

    #[error("Role {role} cannot move a form from {from} to {to}")]
    IllegalTransition {
        role: Role,
        from: FormStatus,
        to: FormStatus,
    },

    #[error("Form is outside the review scope of user {0}")]
    OutOfScope(UserId),

    #[error("Committee voting is closed for a form in status {0}")]
    VotingClosed(FormStatus),

    #[error("Form status changed concurrently (expected {expected}, found {actual})")]
    StaleStatus {
        expected: FormStatus,
        actual: FormStatus,
    },
}

impl DomainError {
    /// Shorthand for a field validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a missing entity
    pub fn not_found(entity: &'static str, id: impl Into<u64>) -> Self {
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Whether the error rejects the actor rather than the request content
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            DomainError::UnauthorizedSubmitter(_)
                | DomainError::NotEligibleVoter(_)
                | DomainError::WrongChannel(_)
                | DomainError::OutOfScope(_)
                | DomainError::IllegalTransition { .. }
        )
    }
}
