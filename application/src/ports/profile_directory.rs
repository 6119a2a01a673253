//! Actor profile lookup port

use super::award_repository::RepositoryError;
use async_trait::async_trait;
use award_domain::{ActorProfile, CommitteeProfile, UserId};
use serde::Serialize;

/// Resolves a user id to its role-specific profile
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// `Ok(None)` when the user has no profile row
    async fn profile(&self, user_id: UserId) -> Result<Option<ActorProfile>, RepositoryError>;
}

/// One committee member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitteeMember {
    pub user_id: UserId,
    pub profile: CommitteeProfile,
}

/// Committee membership and the chairman seat
#[async_trait]
pub trait CommitteeRoster: Send + Sync {
    async fn members(&self) -> Result<Vec<CommitteeMember>, RepositoryError>;

    /// Promote or demote a member as one atomic unit.
    ///
    /// Promotion clears the flag on every other member, so at most one
    /// chairman exists afterwards.
    async fn set_chairman(
        &self,
        user_id: UserId,
        is_chairman: bool,
    ) -> Result<(), RepositoryError>;
}
