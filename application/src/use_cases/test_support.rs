//! Test doubles shared by the use case tests

use crate::ports::academic_calendar::AcademicCalendar;
use crate::ports::attachment_store::{AttachmentError, AttachmentStore};
use crate::ports::award_repository::{AwardRepository, RecordedVote, RepositoryError};
use crate::ports::profile_directory::ProfileDirectory;
use async_trait::async_trait;
use award_domain::{
    AcademicPeriod, ActorProfile, ApprovalHistoryFilter, ApprovalHistoryRow, ApprovalLog, Ballot,
    CommitteeRule, DomainError, Form, FormFilter, FormId, FormStatus, LogId, NominationDraft,
    Page, PageRequest, SignedLog, StatusChange, StoredFile, StudentProfile, TypeLog, Upload,
    UserId, VoteLog,
};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

pub fn student_profile() -> ActorProfile {
    ActorProfile::Student(StudentProfile {
        firstname: "Somchai".to_string(),
        lastname: "Jaidee".to_string(),
        email: "somchai@example.ac.th".to_string(),
        student_number: "6401001".to_string(),
        faculty_id: 1,
        department_id: 1,
        campus_id: 1,
    })
}

/// Form 1 of user 1 (faculty 1, department 1) in `status`
pub fn form_in(status: FormStatus) -> Form {
    let draft = NominationDraft {
        user_id: UserId(1),
        period: AcademicPeriod::new(2025, 1),
        award_type: "academic".to_string(),
        student_firstname: "Somchai".to_string(),
        student_lastname: "Jaidee".to_string(),
        student_email: "somchai@example.ac.th".to_string(),
        student_number: "6401001".to_string(),
        faculty_id: 1,
        department_id: 1,
        campus_id: 1,
        student_year: 3,
        advisor_name: "Dr. Prasert".to_string(),
        student_phone_number: "0812345678".to_string(),
        student_address: "Bangkok".to_string(),
        gpa: 3.5,
        student_date_of_birth: NaiveDate::from_ymd_opt(2003, 4, 5).unwrap(),
        form_detail: "detail".to_string(),
        organization: None,
    };
    let mut form = Form::create(FormId(1), draft, &[], 1, Utc::now());
    form.status = status;
    form
}

#[derive(Default)]
pub struct FakeProfiles(HashMap<u64, ActorProfile>);

impl FakeProfiles {
    pub fn with(mut self, user: u64, profile: ActorProfile) -> Self {
        self.0.insert(user, profile);
        self
    }
}

#[async_trait]
impl ProfileDirectory for FakeProfiles {
    async fn profile(&self, user_id: UserId) -> Result<Option<ActorProfile>, RepositoryError> {
        Ok(self.0.get(&user_id.get()).cloned())
    }
}

/// Profile directory whose backing storage is down
pub struct UnavailableProfiles;

#[async_trait]
impl ProfileDirectory for UnavailableProfiles {
    async fn profile(&self, _user_id: UserId) -> Result<Option<ActorProfile>, RepositoryError> {
        Err(RepositoryError::Storage("profile table unavailable".to_string()))
    }
}

pub struct FakeCalendar(pub Option<AcademicPeriod>);

#[async_trait]
impl AcademicCalendar for FakeCalendar {
    async fn current_open_period(&self) -> Result<Option<AcademicPeriod>, RepositoryError> {
        Ok(self.0)
    }
}

/// Attachment store that only counts
#[derive(Default)]
pub struct RecordingAttachments {
    saved: Mutex<Vec<String>>,
    removed: Mutex<Vec<String>>,
}

impl RecordingAttachments {
    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    pub fn removed_count(&self) -> usize {
        self.removed.lock().unwrap().len()
    }
}

#[async_trait]
impl AttachmentStore for RecordingAttachments {
    async fn save(&self, upload: &Upload) -> Result<StoredFile, AttachmentError> {
        let path = format!("/uploads/{}", upload.file_name);
        self.saved.lock().unwrap().push(path.clone());
        Ok(StoredFile {
            file_type: "pdf".to_string(),
            file_size: upload.size(),
            file_path: path,
        })
    }

    async fn remove(&self, file: &StoredFile) -> Result<(), AttachmentError> {
        self.removed.lock().unwrap().push(file.file_path.clone());
        Ok(())
    }
}

/// Minimal repository: forms in a vector, applied changes recorded
#[derive(Default)]
pub struct FakeRepository {
    forms: Mutex<Vec<Form>>,
    applied: Mutex<Vec<StatusChange>>,
    approval_logs: Mutex<Vec<ApprovalLog>>,
    searches: Mutex<Vec<(FormFilter, PageRequest)>>,
    fail_create: Mutex<bool>,
}

impl FakeRepository {
    pub fn with_form(form: Form) -> Self {
        let repo = Self::default();
        repo.forms.lock().unwrap().push(form);
        repo
    }

    pub fn fail_next_create(&self) {
        *self.fail_create.lock().unwrap() = true;
    }

    pub fn form_count(&self) -> usize {
        self.forms.lock().unwrap().len()
    }

    pub fn form(&self, id: FormId) -> Option<Form> {
        self.forms.lock().unwrap().iter().find(|f| f.id == id).cloned()
    }

    pub fn applied(&self) -> Vec<StatusChange> {
        self.applied.lock().unwrap().clone()
    }

    pub fn add_approval_log(&self, log: ApprovalLog) {
        self.approval_logs.lock().unwrap().push(log);
    }

    pub fn last_search(&self) -> Option<(FormFilter, PageRequest)> {
        self.searches.lock().unwrap().last().cloned()
    }

    fn unsupported<T>() -> Result<T, RepositoryError> {
        Err(RepositoryError::Storage("not supported by FakeRepository".to_string()))
    }
}

#[async_trait]
impl AwardRepository for FakeRepository {
    async fn create_nomination(
        &self,
        draft: NominationDraft,
        files: Vec<StoredFile>,
    ) -> Result<Form, RepositoryError> {
        if std::mem::take(&mut *self.fail_create.lock().unwrap()) {
            return Self::unsupported();
        }
        let mut forms = self.forms.lock().unwrap();
        let id = FormId(forms.len() as u64 + 1);
        let form = Form::create(id, draft, &files, 1, Utc::now());
        forms.push(form.clone());
        Ok(form)
    }

    async fn exists_for_period(
        &self,
        user_id: UserId,
        period: AcademicPeriod,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .forms
            .lock()
            .unwrap()
            .iter()
            .any(|f| f.user_id == user_id && f.period == period))
    }

    async fn find_form(&self, form_id: FormId) -> Result<Option<Form>, RepositoryError> {
        Ok(self.form(form_id))
    }

    async fn forms_by_user(&self, user_id: UserId) -> Result<Vec<Form>, RepositoryError> {
        Ok(self
            .forms
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn forms_by_user_and_year(
        &self,
        _user_id: UserId,
        _year: i32,
    ) -> Result<Vec<Form>, RepositoryError> {
        Self::unsupported()
    }

    async fn form_by_user_and_period(
        &self,
        _user_id: UserId,
        _period: AcademicPeriod,
    ) -> Result<Option<Form>, RepositoryError> {
        Self::unsupported()
    }

    async fn forms_by_user_in_years(
        &self,
        user_id: UserId,
        years: &[i32],
        page: PageRequest,
    ) -> Result<Page<Form>, RepositoryError> {
        let forms = self
            .forms
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id && years.contains(&f.period.year))
            .cloned()
            .collect();
        Ok(Page::paginate(forms, page))
    }

    async fn search_forms(
        &self,
        filter: &FormFilter,
        page: PageRequest,
    ) -> Result<Page<Form>, RepositoryError> {
        self.searches.lock().unwrap().push((filter.clone(), page));
        let forms = self
            .forms
            .lock()
            .unwrap()
            .iter()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect();
        Ok(Page::paginate(forms, page))
    }

    async fn award_types(&self) -> Result<Vec<String>, RepositoryError> {
        Self::unsupported()
    }

    async fn update_award_type(
        &self,
        form_id: FormId,
        award_type: &str,
    ) -> Result<bool, RepositoryError> {
        let mut forms = self.forms.lock().unwrap();
        let form = forms
            .iter_mut()
            .find(|f| f.id == form_id)
            .ok_or_else(|| DomainError::not_found("form", form_id))?;
        if form.award_type == award_type {
            return Ok(false);
        }
        form.award_type = award_type.to_string();
        Ok(true)
    }

    async fn apply_status_change(&self, change: &StatusChange) -> Result<bool, RepositoryError> {
        let mut forms = self.forms.lock().unwrap();
        let form = forms
            .iter_mut()
            .find(|f| f.id == change.form_id)
            .ok_or_else(|| DomainError::not_found("form", change.form_id))?;
        if form.status == change.to {
            return Ok(false);
        }
        if form.status != change.from {
            return Err(DomainError::StaleStatus {
                expected: change.from,
                actual: form.status,
            }
            .into());
        }
        form.status = change.to;
        form.reject_reason = change.reject_reason.clone();
        self.applied.lock().unwrap().push(change.clone());
        Ok(true)
    }

    async fn record_vote(
        &self,
        _ballot: Ballot,
        _rule: &CommitteeRule,
    ) -> Result<RecordedVote, RepositoryError> {
        Self::unsupported()
    }

    async fn find_approval_log(
        &self,
        log_id: LogId,
    ) -> Result<Option<ApprovalLog>, RepositoryError> {
        Ok(self
            .approval_logs
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == log_id)
            .cloned())
    }

    async fn approval_logs(&self, _form_id: FormId) -> Result<Vec<ApprovalLog>, RepositoryError> {
        Self::unsupported()
    }

    async fn approval_history(
        &self,
        _filter: &ApprovalHistoryFilter,
        _page: PageRequest,
    ) -> Result<Page<ApprovalHistoryRow>, RepositoryError> {
        Self::unsupported()
    }

    async fn type_logs(&self, _form_id: FormId) -> Result<Vec<TypeLog>, RepositoryError> {
        Self::unsupported()
    }

    async fn signed_logs(&self, _form_id: FormId) -> Result<Vec<SignedLog>, RepositoryError> {
        Self::unsupported()
    }

    async fn vote_logs(&self, _form_id: FormId) -> Result<Vec<VoteLog>, RepositoryError> {
        Self::unsupported()
    }
}
