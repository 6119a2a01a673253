//! Nomination entities

use super::attachment::StoredFile;
use super::status::FormStatus;
use crate::core::ids::{AttachmentId, FormId, UserId};
use crate::core::period::AcademicPeriod;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Nominating organization, copied from its profile at submission time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationDetails {
    pub name: String,
    pub kind: String,
    pub location: String,
    pub phone_number: String,
}

/// File metadata attached to a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub form_id: FormId,
    pub file_type: String,
    pub file_size: u64,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Attachment {
    /// The stored file behind this attachment
    pub fn stored_file(&self) -> StoredFile {
        StoredFile {
            file_type: self.file_type.clone(),
            file_size: self.file_size,
            file_path: self.file_path.clone(),
        }
    }
}

/// A validated nomination that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominationDraft {
    pub user_id: UserId,
    pub period: AcademicPeriod,
    pub award_type: String,
    pub student_firstname: String,
    pub student_lastname: String,
    pub student_email: String,
    pub student_number: String,
    pub faculty_id: u32,
    pub department_id: u32,
    pub campus_id: u32,
    pub student_year: u8,
    pub advisor_name: String,
    pub student_phone_number: String,
    pub student_address: String,
    pub gpa: f64,
    pub student_date_of_birth: NaiveDate,
    pub form_detail: String,
    pub organization: Option<OrganizationDetails>,
}

/// One award nomination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    pub user_id: UserId,
    pub period: AcademicPeriod,
    pub status: FormStatus,
    pub award_type: String,
    pub student_firstname: String,
    pub student_lastname: String,
    pub student_email: String,
    pub student_number: String,
    pub faculty_id: u32,
    pub department_id: u32,
    pub campus_id: u32,
    pub student_year: u8,
    pub advisor_name: String,
    pub student_phone_number: String,
    pub student_address: String,
    pub gpa: f64,
    pub student_date_of_birth: NaiveDate,
    pub form_detail: String,
    pub organization: Option<OrganizationDetails>,
    /// Present only while the form sits in a reject or return status
    pub reject_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub latest_update: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Form {
    /// Materialize a draft as a new form in status 1
    pub fn create(
        id: FormId,
        draft: NominationDraft,
        files: &[StoredFile],
        first_attachment_id: u64,
        now: DateTime<Utc>,
    ) -> Self {
        let attachments = files
            .iter()
            .enumerate()
            .map(|(i, f)| Attachment {
                id: AttachmentId(first_attachment_id + i as u64),
                form_id: id,
                file_type: f.file_type.clone(),
                file_size: f.file_size,
                file_path: f.file_path.clone(),
                uploaded_at: now,
            })
            .collect();

        Self {
            id,
            user_id: draft.user_id,
            period: draft.period,
            status: FormStatus::New,
            award_type: draft.award_type,
            student_firstname: draft.student_firstname,
            student_lastname: draft.student_lastname,
            student_email: draft.student_email,
            student_number: draft.student_number,
            faculty_id: draft.faculty_id,
            department_id: draft.department_id,
            campus_id: draft.campus_id,
            student_year: draft.student_year,
            advisor_name: draft.advisor_name,
            student_phone_number: draft.student_phone_number,
            student_address: draft.student_address,
            gpa: draft.gpa,
            student_date_of_birth: draft.student_date_of_birth,
            form_detail: draft.form_detail,
            organization: draft.organization,
            reject_reason: None,
            created_at: now,
            latest_update: now,
            attachments,
        }
    }

    /// "Firstname Lastname" of the nominee
    pub fn nominee_name(&self) -> String {
        format!("{} {}", self.student_firstname, self.student_lastname)
    }
}
