//! Form search filter and sort order

use crate::actor::scope::ReviewScope;
use crate::core::ids::UserId;
use crate::nomination::entities::Form;
use crate::nomination::status::FormStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    StudentNumber,
    AcademicYear,
    AwardType,
    #[default]
    Date,
}

impl SortKey {
    /// Unknown keys fall back to `Date`
    pub fn parse_lenient(s: &str) -> SortKey {
        match s.trim().to_lowercase().replace('_', "").as_str() {
            "name" => SortKey::Name,
            "studentnumber" => SortKey::StudentNumber,
            "academicyear" => SortKey::AcademicYear,
            "awardtype" => SortKey::AwardType,
            _ => SortKey::Date,
        }
    }

    /// Ascending comparison of two forms on this key
    pub fn compare(&self, a: &Form, b: &Form) -> Ordering {
        match self {
            SortKey::Name => a
                .student_firstname
                .cmp(&b.student_firstname)
                .then_with(|| a.student_lastname.cmp(&b.student_lastname)),
            SortKey::StudentNumber => a.student_number.cmp(&b.student_number),
            SortKey::AcademicYear => a.period.year.cmp(&b.period.year),
            SortKey::AwardType => a.award_type.cmp(&b.award_type),
            SortKey::Date => a.created_at.cmp(&b.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything but `asc` sorts descending
    pub fn parse_lenient(s: &str) -> SortOrder {
        match s.trim().to_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Criteria for the scoped form search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormFilter {
    pub campus_id: Option<u32>,
    /// Matched against first name, last name, full name and student number
    pub keyword: Option<String>,
    /// Creation date
    pub date: Option<NaiveDate>,
    pub student_year: Option<u8>,
    pub award_type: Option<String>,
    pub status: Option<FormStatus>,
    pub faculty_id: Option<u32>,
    pub department_id: Option<u32>,
    /// Hide forms this committee member has already voted on
    pub exclude_voted_by: Option<UserId>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl FormFilter {
    /// Narrow the filter to a reviewer's scope
    pub fn within(mut self, scope: &ReviewScope) -> Self {
        if let Some(status) = scope.required_status {
            self.status = Some(status);
        }
        if let Some(faculty) = scope.faculty_id {
            self.faculty_id = Some(faculty);
        }
        if let Some(department) = scope.department_id {
            self.department_id = Some(department);
        }
        self
    }

    /// Whether a form satisfies every form-intrinsic criterion.
    ///
    /// `exclude_voted_by` needs vote data and is applied by the store.
    pub fn matches(&self, form: &Form) -> bool {
        if self.campus_id.is_some_and(|c| form.campus_id != c) {
            return false;
        }
        if self.student_year.is_some_and(|y| form.student_year != y) {
            return false;
        }
        if self.status.is_some_and(|s| form.status != s) {
            return false;
        }
        if self.faculty_id.is_some_and(|f| form.faculty_id != f) {
            return false;
        }
        if self.department_id.is_some_and(|d| form.department_id != d) {
            return false;
        }
        if self.date.is_some_and(|d| form.created_at.date_naive() != d) {
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

    /// Sort in place by the configured key and order
    pub fn sort(&self, forms: &mut [Form]) {
        forms.sort_by(|a, b| self.sort_order.apply(self.sort_by.compare(a, b)));
    }
}

pub(crate) fn keyword_matches(form: &Form, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    [
        form.student_firstname.to_lowercase(),
        form.student_lastname.to_lowercase(),
        form.student_number.to_lowercase(),
        form.nominee_name().to_lowercase(),
    ]
    .iter()
    .any(|field| field.contains(&needle))
}
