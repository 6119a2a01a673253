//! Role-specific actor profiles
//!
//! One sum type replaces per-role lookups scattered across call sites: the
//! profile is resolved once for a `(user, role)` pair and the variant is
//! passed to validation and scoping.

use super::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub student_number: String,
    pub faculty_id: u32,
    pub department_id: u32,
    pub campus_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    pub name: String,
    pub kind: String,
    pub location: String,
    pub phone_number: String,
    pub campus_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadOfDepartmentProfile {
    pub faculty_id: u32,
    pub department_id: u32,
}

/// Associate deans and deans are scoped to one faculty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyScopeProfile {
    pub faculty_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommitteeProfile {
    pub is_chairman: bool,
}

/// Profile of an actor, one variant per role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ActorProfile {
    Student(StudentProfile),
    Organization(OrganizationProfile),
    HeadOfDepartment(HeadOfDepartmentProfile),
    AssociateDean(FacultyScopeProfile),
    Dean(FacultyScopeProfile),
    StudentDevelopment,
    Committee(CommitteeProfile),
    Chancellor,
}

impl ActorProfile {
    /// The role this profile belongs to
    pub fn role(&self) -> Role {
        match self {
            ActorProfile::Student(_) => Role::Student,
            ActorProfile::Organization(_) => Role::Organization,
            ActorProfile::HeadOfDepartment(_) => Role::HeadOfDepartment,
            ActorProfile::AssociateDean(_) => Role::AssociateDean,
            ActorProfile::Dean(_) => Role::Dean,
            ActorProfile::StudentDevelopment => Role::StudentDevelopment,
            ActorProfile::Committee(_) => Role::Committee,
            ActorProfile::Chancellor => Role::Chancellor,
        }
    }

    /// Campus of a submitter profile
    pub fn campus_id(&self) -> Option<u32> {
        match self {
            ActorProfile::Student(s) => Some(s.campus_id),
            ActorProfile::Organization(o) => Some(o.campus_id),
            _ => None,
        }
    }

    /// Whether this is the committee chairman
    pub fn is_chairman(&self) -> bool {
        matches!(self, ActorProfile::Committee(c) if c.is_chairman)
    }
}
