//! Form status vocabulary

use serde::{Deserialize, Serialize};

/// Outcome recorded for a single-reviewer decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }

    /// Parse history-filter synonyms (`approved`, `returned`, ...)
    pub fn parse_filter(s: &str) -> Option<Decision> {
        match s.trim().to_lowercase().as_str() {
            "approve" | "approved" => Some(Decision::Approve),
            "reject" | "rejected" | "return" | "returned" => Some(Decision::Reject),
            _ => None,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a nomination form (codes 1-13).
///
/// Serialized as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FormStatus {
    New,
    HeadApproved,
    HeadRejected,
    AssociateDeanApproved,
    AssociateDeanRejected,
    DeanApproved,
    DeanRejected,
    ForwardedToCommittee,
    ReturnedByStudentDevelopment,
    CommitteeApproved,
    CommitteeRejected,
    ChairmanSigned,
    ChancellorSigned,
}

impl FormStatus {
    pub const ALL: [FormStatus; 13] = [
        FormStatus::New,
        FormStatus::HeadApproved,
        FormStatus::HeadRejected,
        FormStatus::AssociateDeanApproved,
        FormStatus::AssociateDeanRejected,
        FormStatus::DeanApproved,
        FormStatus::DeanRejected,
        FormStatus::ForwardedToCommittee,
        FormStatus::ReturnedByStudentDevelopment,
        FormStatus::CommitteeApproved,
        FormStatus::CommitteeRejected,
        FormStatus::ChairmanSigned,
        FormStatus::ChancellorSigned,
    ];

    pub fn code(&self) -> u8 {
        match self {
            FormStatus::New => 1,
            FormStatus::HeadApproved => 2,
            FormStatus::HeadRejected => 3,
            FormStatus::AssociateDeanApproved => 4,
            FormStatus::AssociateDeanRejected => 5,
            FormStatus::DeanApproved => 6,
            FormStatus::DeanRejected => 7,
            FormStatus::ForwardedToCommittee => 8,
            FormStatus::ReturnedByStudentDevelopment => 9,
            FormStatus::CommitteeApproved => 10,
            FormStatus::CommitteeRejected => 11,
            FormStatus::ChairmanSigned => 12,
            FormStatus::ChancellorSigned => 13,
        }
    }

    /// Decision outcome written to the approval log when a form lands here.
    ///
    /// Status 9 (returned) is logged as a rejection.
    pub fn decision(&self) -> Option<Decision> {
        match self.code() {
            2 | 4 | 6 | 8 | 10 => Some(Decision::Approve),
            3 | 5 | 7 | 9 | 11 => Some(Decision::Reject),
            _ => None,
        }
    }

    /// Reject and return statuses carry a mandatory reason
    pub fn requires_reason(&self) -> bool {
        self.decision() == Some(Decision::Reject)
    }

    /// Chairman and chancellor signatures
    pub fn is_signing(&self) -> bool {
        matches!(self, FormStatus::ChairmanSigned | FormStatus::ChancellorSigned)
    }

    /// Statuses owned by the committee vote
    pub fn is_committee_controlled(&self) -> bool {
        matches!(
            self,
            FormStatus::ForwardedToCommittee
                | FormStatus::CommitteeApproved
                | FormStatus::CommitteeRejected
        )
    }

    /// No further transition leaves this status
    pub fn is_terminal(&self) -> bool {
        self.requires_reason() || *self == FormStatus::ChancellorSigned
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormStatus::New => "new",
            FormStatus::HeadApproved => "approved by head of department",
            FormStatus::HeadRejected => "rejected by head of department",
            FormStatus::AssociateDeanApproved => "approved by associate dean",
            FormStatus::AssociateDeanRejected => "rejected by associate dean",
            FormStatus::DeanApproved => "approved by dean",
            FormStatus::DeanRejected => "rejected by dean",
            FormStatus::ForwardedToCommittee => "forwarded to committee",
            FormStatus::ReturnedByStudentDevelopment => "returned by student development",
            FormStatus::CommitteeApproved => "committee majority approved",
            FormStatus::CommitteeRejected => "committee majority rejected",
            FormStatus::ChairmanSigned => "signed by chairman",
            FormStatus::ChancellorSigned => "signed by chancellor",
        }
    }
}

impl std::fmt::Display for FormStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.label())
    }
}

impl TryFrom<u8> for FormStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        FormStatus::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| format!("Unknown form status code: {} (valid: 1-13)", code))
    }
}

impl From<FormStatus> for u8 {
    fn from(status: FormStatus) -> Self {
        status.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_cover_vocabulary() {
        for (i, status) in FormStatus::ALL.iter().enumerate() {
            assert_eq!(status.code() as usize, i + 1);
            assert_eq!(FormStatus::try_from(status.code()), Ok(*status));
        }
        assert!(FormStatus::try_from(0).is_err());
        assert!(FormStatus::try_from(14).is_err());
    }

    #[test]
    fn test_decision_mapping() {
        let approvals: Vec<u8> = FormStatus::ALL
            .iter()
            .filter(|s| s.decision() == Some(Decision::Approve))
            .map(|s| s.code())
            .collect();
        let rejections: Vec<u8> = FormStatus::ALL
            .iter()
            .filter(|s| s.decision() == Some(Decision::Reject))
            .map(|s| s.code())
            .collect();
        assert_eq!(approvals, vec![2, 4, 6, 8, 10]);
        assert_eq!(rejections, vec![3, 5, 7, 9, 11]);
        assert_eq!(FormStatus::New.decision(), None);
        assert_eq!(FormStatus::ChairmanSigned.decision(), None);
    }

    #[test]
    fn test_return_status_requires_reason() {
        assert!(FormStatus::ReturnedByStudentDevelopment.requires_reason());
        assert!(!FormStatus::ForwardedToCommittee.requires_reason());
    }

    #[test]
    fn test_serde_as_code() {
        assert_eq!(serde_json::to_string(&FormStatus::CommitteeApproved).unwrap(), "10");
        let status: FormStatus = serde_json::from_str("13").unwrap();
        assert_eq!(status, FormStatus::ChancellorSigned);
        assert!(serde_json::from_str::<FormStatus>("99").is_err());
    }

    #[test]
    fn test_decision_filter_synonyms() {
        assert_eq!(Decision::parse_filter("Approved"), Some(Decision::Approve));
        assert_eq!(Decision::parse_filter("returned"), Some(Decision::Reject));
        assert_eq!(Decision::parse_filter("maybe"), None);
    }
}
