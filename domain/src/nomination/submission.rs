//! Submission validation
//!
//! Turns raw nomination input plus the submitter's profile into a
//! [`NominationDraft`]. Students nominate themselves and their identity comes
//! from the profile; organizations nominate someone else and must supply the
//! nominee's identity.

use super::entities::{NominationDraft, OrganizationDetails};
use crate::actor::profile::ActorProfile;
use crate::core::error::DomainError;
use crate::core::ids::UserId;
use crate::core::period::AcademicPeriod;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Nominee identity supplied by an organization
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NomineeInput {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub student_number: String,
    pub faculty_id: u32,
    pub department_id: u32,
}

/// Raw nomination fields as received from the caller
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NominationInput {
    pub award_type: String,
    pub student_year: u8,
    pub advisor_name: String,
    pub student_phone_number: String,
    pub student_address: String,
    pub gpa: f64,
    /// `YYYY-MM-DD`
    pub student_date_of_birth: String,
    pub form_detail: String,
    /// Required for organizations, ignored for students
    #[serde(default)]
    pub nominee: Option<NomineeInput>,
}

fn required(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

fn required_id(field: &str, value: u32) -> Result<u32, DomainError> {
    if value == 0 {
        return Err(DomainError::validation(field, "is required"));
    }
    Ok(value)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, DomainError> {
    let value = required(field, value)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|_| DomainError::validation(field, "format should be YYYY-MM-DD"))
}

impl NominationInput {
    /// Validate against the submitter's profile and build a draft for `period`
    pub fn prepare(
        &self,
        user_id: UserId,
        profile: &ActorProfile,
        period: AcademicPeriod,
    ) -> Result<NominationDraft, DomainError> {
        // Submitter check comes first so other roles never see field errors
        if !profile.role().is_submitter() {
            return Err(DomainError::UnauthorizedSubmitter(profile.role()));
        }

        let award_type = required("award_type", &self.award_type)?;
        if self.student_year == 0 {
            return Err(DomainError::validation(
                "student_year",
                "is required and must be a positive number",
            ));
        }
        let advisor_name = required("advisor_name", &self.advisor_name)?;
        let student_phone_number = required("student_phone_number", &self.student_phone_number)?;
        let student_address = required("student_address", &self.student_address)?;
        if !self.gpa.is_finite() || self.gpa < 0.0 {
            return Err(DomainError::validation(
                "gpa",
                "must be a valid non-negative number",
            ));
        }
        let student_date_of_birth =
            parse_date("student_date_of_birth", &self.student_date_of_birth)?;
        let form_detail = required("form_detail", &self.form_detail)?;

        let mut draft = NominationDraft {
            user_id,
            period,
            award_type,
            student_firstname: String::new(),
            student_lastname: String::new(),
            student_email: String::new(),
            student_number: String::new(),
            faculty_id: 0,
            department_id: 0,
            campus_id: 0,
            student_year: self.student_year,
            advisor_name,
            student_phone_number,
            student_address,
            gpa: self.gpa,
            student_date_of_birth,
            form_detail,
            organization: None,
        };

        match profile {
            ActorProfile::Student(student) => {
                draft.student_firstname = student.firstname.clone();
                draft.student_lastname = student.lastname.clone();
                draft.student_email = student.email.clone();
                draft.student_number = student.student_number.clone();
                draft.faculty_id = student.faculty_id;
                draft.department_id = student.department_id;
                draft.campus_id = student.campus_id;
            }
            ActorProfile::Organization(org) => {
                let nominee = self.nominee.as_ref().ok_or_else(|| {
                    DomainError::validation("nominee", "is required for organizations")
                })?;
                draft.student_firstname = required("student_firstname", &nominee.firstname)?;
                draft.student_lastname = required("student_lastname", &nominee.lastname)?;
                draft.student_email = required("student_email", &nominee.email)?;
                draft.student_number = required("student_number", &nominee.student_number)?;
                draft.faculty_id = required_id("faculty_id", nominee.faculty_id)?;
                draft.department_id = required_id("department_id", nominee.department_id)?;
                draft.campus_id = org.campus_id;
                draft.organization = Some(OrganizationDetails {
                    name: org.name.clone(),
                    kind: org.kind.clone(),
                    location: org.location.clone(),
                    phone_number: org.phone_number.clone(),
                });
            }
            other => return Err(DomainError::UnauthorizedSubmitter(other.role())),
        }

        Ok(draft)
    }
}
