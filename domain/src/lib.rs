//! Domain layer for award-workflow
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Nomination
//!
//! A student or an organization submits a [`Form`] for the current
//! academic period. The form then climbs a fixed review chain:
//!
//! - **Single reviewers**: head of department, associate dean, dean and
//!   student development each approve or reject (with a reason)
//! - **Committee**: non-chairman members vote; a strict majority decides
//! - **Signatures**: the committee chairman, then the chancellor, sign
//!
//! Every decision leaves an audit row ([`ApprovalLog`], [`TypeLog`],
//! [`SignedLog`] or [`VoteLog`]).

pub mod actor;
pub mod committee;
pub mod config;
pub mod core;
pub mod nomination;
pub mod query;
pub mod review;

// Re-export commonly used types
pub use actor::{
    Actor, ActorProfile, CommitteeProfile, FacultyScopeProfile, HeadOfDepartmentProfile,
    OrganizationProfile, ReviewScope, Role, StudentProfile,
};
pub use committee::{
    Ballot, CommitteeOutcome, CommitteeRule, CommitteeVoteResult, VoteLog, VoteOperation,
    VoteTally,
};
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigKeyInfo, OutputFormat, Severity, known_keys, lookup_key,
};
pub use core::{
    error::DomainError,
    ids::{AttachmentId, FormId, LogId, UserId},
    period::AcademicPeriod,
};
pub use nomination::{
    Attachment, AttachmentPolicy, Decision, Form, FormStatus, NominationDraft, NominationInput,
    NomineeInput, OrganizationDetails, StoredFile, Upload,
};
pub use query::{
    ApprovalHistoryFilter, ApprovalHistoryRow, FormFilter, Page, PageRequest, SortKey, SortOrder,
};
pub use review::{
    ApprovalLog, AuditEntry, SignedLog, StatusChange, TransitionPath, TypeLog, TypeLogKind,
    allowed_targets, plan_chairman_signature, plan_status_change,
};
