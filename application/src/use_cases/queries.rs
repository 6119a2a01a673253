//! Read accessors
//!
//! Point lookups, personal history, the scoped search and the audit trails.
//! The search applies the caller's review scope; committee members only see
//! forms they have not voted on yet.

use super::resolve_scope::ScopeResolver;
use crate::config::PagingPolicy;
use crate::error::WorkflowError;
use crate::ports::award_repository::AwardRepository;
use crate::ports::profile_directory::ProfileDirectory;
use award_domain::{
    AcademicPeriod, Actor, ActorProfile, ApprovalHistoryFilter, ApprovalHistoryRow, ApprovalLog,
    DomainError, Form, FormFilter, FormId, LogId, Page, PageRequest, Role, SignedLog, TypeLog,
    UserId, VoteLog,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// An approval log with its reviewer's profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalLogDetail {
    pub log: ApprovalLog,
    /// `None` when the reviewer's profile could not be found
    pub reviewer: Option<ActorProfile>,
}

/// Every audit row of one form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditTrail {
    pub approvals: Vec<ApprovalLog>,
    pub type_logs: Vec<TypeLog>,
    pub signed: Vec<SignedLog>,
    pub votes: Vec<VoteLog>,
}

pub struct NominationQueries {
    repository: Arc<dyn AwardRepository>,
    profiles: Arc<dyn ProfileDirectory>,
    scopes: Arc<ScopeResolver>,
    paging: PagingPolicy,
}

impl NominationQueries {
    pub fn new(
        repository: Arc<dyn AwardRepository>,
        profiles: Arc<dyn ProfileDirectory>,
        scopes: Arc<ScopeResolver>,
        paging: PagingPolicy,
    ) -> Self {
        Self {
            repository,
            profiles,
            scopes,
            paging,
        }
    }

    pub async fn form(&self, form_id: FormId) -> Result<Form, WorkflowError> {
        Ok(self
            .repository
            .find_form(form_id)
            .await?
            .ok_or_else(|| DomainError::not_found("form", form_id))?)
    }

    pub async fn forms_by_user(&self, user_id: UserId) -> Result<Vec<Form>, WorkflowError> {
        Ok(self.repository.forms_by_user(user_id).await?)
    }

    pub async fn forms_by_user_and_year(
        &self,
        user_id: UserId,
        year: i32,
    ) -> Result<Vec<Form>, WorkflowError> {
        Ok(self.repository.forms_by_user_and_year(user_id, year).await?)
    }

    pub async fn form_by_user_and_period(
        &self,
        user_id: UserId,
        period: AcademicPeriod,
    ) -> Result<Form, WorkflowError> {
        Ok(self
            .repository
            .form_by_user_and_period(user_id, period)
            .await?
            .ok_or_else(|| DomainError::not_found("form of user", user_id))?)
    }

    /// A user's forms over several academic years, paged
    pub async fn history(
        &self,
        user_id: UserId,
        years: &[i32],
        page: PageRequest,
    ) -> Result<Page<Form>, WorkflowError> {
        Ok(self
            .repository
            .forms_by_user_in_years(user_id, years, self.paging.history(page))
            .await?)
    }

    /// Search the forms visible to `actor`
    pub async fn search(
        &self,
        actor: Actor,
        filter: FormFilter,
        page: PageRequest,
    ) -> Result<Page<Form>, WorkflowError> {
        let scope = self.scopes.resolve(actor).await?;
        let mut filter = filter.within(&scope);
        if actor.role == Role::Committee {
            filter.exclude_voted_by = Some(actor.user_id);
        }
        Ok(self
            .repository
            .search_forms(&filter, self.paging.search(page))
            .await?)
    }

    pub async fn approval_history(
        &self,
        filter: &ApprovalHistoryFilter,
        page: PageRequest,
    ) -> Result<Page<ApprovalHistoryRow>, WorkflowError> {
        Ok(self
            .repository
            .approval_history(filter, self.paging.search(page))
            .await?)
    }

    /// An approval log enriched with the reviewer's profile.
    ///
    /// A reviewer without a profile leaves `reviewer` empty; a failed
    /// lookup is an error.
    pub async fn approval_log_detail(
        &self,
        log_id: LogId,
    ) -> Result<ApprovalLogDetail, WorkflowError> {
        let log = self
            .repository
            .find_approval_log(log_id)
            .await?
            .ok_or_else(|| DomainError::not_found("approval log", log_id))?;

        let reviewer = self.profiles.profile(log.user_id).await?;
        if reviewer.is_none() {
            debug!("Reviewer {} has no profile", log.user_id);
        }

        Ok(ApprovalLogDetail { log, reviewer })
    }

    pub async fn award_types(&self) -> Result<Vec<String>, WorkflowError> {
        Ok(self.repository.award_types().await?)
    }

    pub async fn audit_trail(&self, form_id: FormId) -> Result<AuditTrail, WorkflowError> {
        // Surface a missing form instead of an empty trail
        self.form(form_id).await?;
        Ok(AuditTrail {
            approvals: self.repository.approval_logs(form_id).await?,
            type_logs: self.repository.type_logs(form_id).await?,
            signed: self.repository.signed_logs(form_id).await?,
            votes: self.repository.vote_logs(form_id).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        FakeProfiles, FakeRepository, UnavailableProfiles, form_in,
    };
    use award_domain::{Decision, FormStatus};
    use chrono::Utc;

    fn queries(repository: Arc<FakeRepository>, profiles: FakeProfiles) -> NominationQueries {
        let profiles = Arc::new(profiles);
        NominationQueries::new(
            repository,
            profiles.clone(),
            Arc::new(ScopeResolver::new(profiles)),
            PagingPolicy::default(),
        )
    }

    #[tokio::test]
    async fn test_committee_search_excludes_own_votes() {
        let repository = Arc::new(FakeRepository::with_form(form_in(
            FormStatus::ForwardedToCommittee,
        )));
        let q = queries(repository.clone(), FakeProfiles::default());

        q.search(
            Actor::new(30u64, Role::Committee),
            FormFilter::default(),
            PageRequest::new(1, 50),
        )
        .await
        .unwrap();

        let (filter, page) = repository.last_search().unwrap();
        assert_eq!(filter.exclude_voted_by, Some(UserId(30)));
        assert_eq!(filter.status, Some(FormStatus::ForwardedToCommittee));
        assert_eq!(page, PageRequest::new(1, 5));
    }

    #[tokio::test]
    async fn test_log_detail_soft_fails_on_missing_profile() {
        let repository = Arc::new(FakeRepository::default());
        repository.add_approval_log(ApprovalLog {
            id: LogId(4),
            form_id: FormId(1),
            user_id: UserId(77),
            decision: Decision::Approve,
            reject_reason: None,
            approved_at: Utc::now(),
        });
        let q = queries(repository, FakeProfiles::default());

        let detail = q.approval_log_detail(LogId(4)).await.unwrap();
        assert_eq!(detail.log.user_id, UserId(77));
        assert!(detail.reviewer.is_none());

        let err = q.approval_log_detail(LogId(5)).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_log_detail_propagates_profile_storage_failure() {
        let repository = Arc::new(FakeRepository::default());
        repository.add_approval_log(ApprovalLog {
            id: LogId(4),
            form_id: FormId(1),
            user_id: UserId(77),
            decision: Decision::Approve,
            reject_reason: None,
            approved_at: Utc::now(),
        });
        let profiles = Arc::new(UnavailableProfiles);
        let q = NominationQueries::new(
            repository,
            profiles.clone(),
            Arc::new(ScopeResolver::new(profiles)),
            PagingPolicy::default(),
        );

        let err = q.approval_log_detail(LogId(4)).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_history_uses_fixed_page_size() {
        let repository = Arc::new(FakeRepository::with_form(form_in(FormStatus::New)));
        let q = queries(repository, FakeProfiles::default());
        let page = q
            .history(UserId(1), &[2025], PageRequest::new(1, 3))
            .await
            .unwrap();
        assert_eq!(page.limit, 10);
        assert_eq!(page.total_items, 1);
    }
}
