//! Reviewer approval history

use super::filter::{SortKey, SortOrder, keyword_matches};
use crate::core::ids::{FormId, LogId, UserId};
use crate::nomination::entities::Form;
use crate::nomination::status::Decision;
use crate::review::audit::ApprovalLog;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An approval log row joined with its form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalHistoryRow {
    pub approval_log_id: LogId,
    pub form_id: FormId,
    pub reviewer_id: UserId,
    pub operation: Decision,
    pub operation_date: DateTime<Utc>,
    pub student_firstname: String,
    pub student_lastname: String,
    pub student_number: String,
    pub academic_year: i32,
    pub award_type: String,
    pub campus_id: u32,
}

impl ApprovalHistoryRow {
    pub fn join(log: &ApprovalLog, form: &Form) -> Self {
        Self {
            approval_log_id: log.id,
            form_id: form.id,
            reviewer_id: log.user_id,
            operation: log.decision,
            operation_date: log.approved_at,
            student_firstname: form.student_firstname.clone(),
            student_lastname: form.student_lastname.clone(),
            student_number: form.student_number.clone(),
            academic_year: form.period.year,
            award_type: form.award_type.clone(),
            campus_id: form.campus_id,
        }
    }
}

/// Criteria for a reviewer's decision history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalHistoryFilter {
    pub reviewer_id: UserId,
    pub campus_id: u32,
    pub keyword: Option<String>,
    /// Decision date
    pub date: Option<NaiveDate>,
    pub award_type: Option<String>,
    pub operation: Option<Decision>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl ApprovalHistoryFilter {
    pub fn new(reviewer_id: UserId, campus_id: u32) -> Self {
        Self {
            reviewer_id,
            campus_id,
            keyword: None,
            date: None,
            award_type: None,
            operation: None,
            sort_by: SortKey::Date,
            sort_order: SortOrder::Desc,
        }
    }

    pub fn matches(&self, log: &ApprovalLog, form: &Form) -> bool {
        if log.user_id != self.reviewer_id || form.campus_id != self.campus_id {
            return false;
        }
        if self.operation.is_some_and(|op| log.decision != op) {
            return false;
        }
        if self.date.is_some_and(|d| log.approved_at.date_naive() != d) {
            return false;
        }
        if let Some(award_type) = self.award_type.as_deref().map(str::trim)
            && !award_type.is_empty()
            && form.award_type != award_type
        {
            return false;
        }
        if let Some(keyword) = self.keyword.as_deref().map(str::trim)
            && !keyword.is_empty()
            && !keyword_matches(form, keyword)
        {
            return false;
        }
        true
    }

    /// Sort rows; `Date` sorts by decision time rather than form creation
    pub fn sort(&self, rows: &mut [ApprovalHistoryRow]) {
        rows.sort_by(|a, b| {
            let ordering: Ordering = match self.sort_by {
                SortKey::Name => a
                    .student_firstname
                    .cmp(&b.student_firstname)
                    .then_with(|| a.student_lastname.cmp(&b.student_lastname)),
                SortKey::StudentNumber => a.student_number.cmp(&b.student_number),
                SortKey::AcademicYear => a.academic_year.cmp(&b.academic_year),
                SortKey::AwardType => a.award_type.cmp(&b.award_type),
                SortKey::Date => a.operation_date.cmp(&b.operation_date),
            };
            self.sort_order.apply(ordering)
        });
    }
}
