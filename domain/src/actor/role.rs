//! Roles and their position in the review chain

use crate::nomination::status::FormStatus;
use serde::{Deserialize, Serialize};

/// Closed set of roles known to the workflow.
///
/// Numeric ids follow the account store's role table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    HeadOfDepartment,
    AssociateDean,
    Dean,
    StudentDevelopment,
    Committee,
    Chancellor,
    Organization,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Student,
        Role::HeadOfDepartment,
        Role::AssociateDean,
        Role::Dean,
        Role::StudentDevelopment,
        Role::Committee,
        Role::Chancellor,
        Role::Organization,
    ];

    /// Numeric id as stored by the account service
    pub fn id(&self) -> u8 {
        match self {
            Role::Student => 1,
            Role::HeadOfDepartment => 2,
            Role::AssociateDean => 3,
            Role::Dean => 4,
            Role::StudentDevelopment => 5,
            Role::Committee => 6,
            Role::Chancellor => 7,
            Role::Organization => 8,
        }
    }

    /// The form status this role is expected to act on next.
    ///
    /// Submitters have no queue and return `None`.
    pub fn required_status(&self) -> Option<FormStatus> {
        match self {
            Role::HeadOfDepartment => Some(FormStatus::New),
            Role::AssociateDean => Some(FormStatus::HeadApproved),
            Role::Dean => Some(FormStatus::AssociateDeanApproved),
            Role::StudentDevelopment => Some(FormStatus::DeanApproved),
            Role::Committee => Some(FormStatus::ForwardedToCommittee),
            Role::Chancellor => Some(FormStatus::ChairmanSigned),
            Role::Student | Role::Organization => None,
        }
    }

    /// Whether the role may submit nominations
    pub fn is_submitter(&self) -> bool {
        matches!(self, Role::Student | Role::Organization)
    }

    /// Whether the role reviews alone (as opposed to voting in committee)
    pub fn is_single_reviewer(&self) -> bool {
        matches!(
            self,
            Role::HeadOfDepartment
                | Role::AssociateDean
                | Role::Dean
                | Role::StudentDevelopment
                | Role::Chancellor
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::HeadOfDepartment => "head_of_department",
            Role::AssociateDean => "associate_dean",
            Role::Dean => "dean",
            Role::StudentDevelopment => "student_development",
            Role::Committee => "committee",
            Role::Chancellor => "chancellor",
            Role::Organization => "organization",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for Role {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Role::ALL
            .into_iter()
            .find(|r| r.id() == value)
            .ok_or_else(|| format!("Unknown role id: {}", value))
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        if let Ok(id) = normalized.parse::<u8>() {
            return Role::try_from(id);
        }
        match normalized.as_str() {
            "hod" => return Ok(Role::HeadOfDepartment),
            "sd" => return Ok(Role::StudentDevelopment),
            "org" => return Ok(Role::Organization),
            _ => {}
        }
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown role: {}. Valid: student, head_of_department, associate_dean, dean, student_development, committee, chancellor, organization",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_status_per_role() {
        assert_eq!(Role::HeadOfDepartment.required_status().map(|s| s.code()), Some(1));
        assert_eq!(Role::AssociateDean.required_status().map(|s| s.code()), Some(2));
        assert_eq!(Role::Dean.required_status().map(|s| s.code()), Some(4));
        assert_eq!(Role::StudentDevelopment.required_status().map(|s| s.code()), Some(6));
        assert_eq!(Role::Committee.required_status().map(|s| s.code()), Some(8));
        assert_eq!(Role::Chancellor.required_status().map(|s| s.code()), Some(12));
        assert_eq!(Role::Student.required_status(), None);
        assert_eq!(Role::Organization.required_status(), None);
    }

    #[test]
    fn test_role_id_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::try_from(role.id()), Ok(role));
        }
        assert!(Role::try_from(0).is_err());
        assert!(Role::try_from(9).is_err());
    }

    #[test]
    fn test_parse_role() {
        assert_eq!("dean".parse::<Role>(), Ok(Role::Dean));
        assert_eq!("Head-Of-Department".parse::<Role>(), Ok(Role::HeadOfDepartment));
        assert_eq!("hod".parse::<Role>(), Ok(Role::HeadOfDepartment));
        assert_eq!("6".parse::<Role>(), Ok(Role::Committee));
        assert!("janitor".parse::<Role>().is_err());
    }
}
