//! Actors of the nomination workflow
//!
//! An actor is an authenticated user id paired with exactly one [`Role`].
//! Role-specific data is resolved once at the boundary into an
//! [`ActorProfile`] variant and passed inward.

pub mod profile;
pub mod role;
pub mod scope;

use crate::core::ids::UserId;
use serde::{Deserialize, Serialize};

pub use profile::{
    ActorProfile, CommitteeProfile, FacultyScopeProfile, HeadOfDepartmentProfile,
    OrganizationProfile, StudentProfile,
};
pub use role::Role;
pub use scope::ReviewScope;

/// An already-authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<UserId>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}
