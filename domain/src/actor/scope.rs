//! Review scope of a reviewer

use super::profile::ActorProfile;
use super::role::Role;
use crate::nomination::entities::Form;
use crate::nomination::status::FormStatus;
use serde::{Deserialize, Serialize};

/// The subset of forms a reviewer may list and act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewScope {
    /// Status the role acts on next (`None` for submitters)
    pub required_status: Option<FormStatus>,
    pub faculty_id: Option<u32>,
    pub department_id: Option<u32>,
}

impl ReviewScope {
    /// Scope for a role that needs no profile data
    pub fn for_role(role: Role) -> Self {
        Self {
            required_status: role.required_status(),
            faculty_id: None,
            department_id: None,
        }
    }

    /// Whether the role needs a scoping profile to compute its scope
    pub fn needs_profile(role: Role) -> bool {
        matches!(
            role,
            Role::HeadOfDepartment | Role::AssociateDean | Role::Dean
        )
    }

    /// Build the scope from an already-resolved profile.
    ///
    /// Returns `None` when the profile variant does not carry the scope the
    /// role requires.
    pub fn from_profile(role: Role, profile: &ActorProfile) -> Option<Self> {
        let base = Self::for_role(role);
        match (role, profile) {
            (Role::HeadOfDepartment, ActorProfile::HeadOfDepartment(p)) => Some(Self {
                department_id: Some(p.department_id),
                ..base
            }),
            (Role::AssociateDean, ActorProfile::AssociateDean(p))
            | (Role::Dean, ActorProfile::Dean(p)) => Some(Self {
                faculty_id: Some(p.faculty_id),
                ..base
            }),
            (role, _) if !Self::needs_profile(role) => Some(base),
            _ => None,
        }
    }

    /// Whether a form lies inside the department/faculty limits of this scope.
    ///
    /// The status requirement is not checked here.
    pub fn covers(&self, form: &Form) -> bool {
        if let Some(department) = self.department_id
            && form.department_id != department
        {
            return false;
        }
        if let Some(faculty) = self.faculty_id
            && form.faculty_id != faculty
        {
            return false;
        }
        true
    }
}
