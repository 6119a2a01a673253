//! In-memory implementation of the storage ports.
//!
//! All state lives in one [`AwardSnapshot`] behind a `RwLock`. Reads share
//! the lock; every mutation takes the write lock for its complete
//! read-modify-write, so concurrent votes and chairman changes serialize.

use super::snapshot::{AwardSnapshot, ProfileRecord};
use async_trait::async_trait;
use award_application::{
    AcademicCalendar, AwardRepository, CommitteeMember, CommitteeRoster, ProfileDirectory,
    RecordedVote, RepositoryError,
};
use award_domain::{
    AcademicPeriod, ActorProfile, ApprovalHistoryFilter, ApprovalHistoryRow, ApprovalLog,
    AuditEntry, Ballot, CommitteeRule, DomainError, Form, FormFilter, FormId, LogId,
    NominationDraft, Page, PageRequest, SignedLog, StatusChange, StoredFile, TypeLog, UserId,
    VoteLog, VoteTally,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory award store.
///
/// Optionally loaded from and saved to a JSON snapshot.
#[derive(Default)]
pub struct InMemoryAwardStore {
    state: RwLock<AwardSnapshot>,
}

impl InMemoryAwardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: AwardSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// Load from a snapshot file; a missing file yields an empty store
    pub async fn load(path: &Path) -> Result<Self, RepositoryError> {
        let snapshot = AwardSnapshot::read(path).await?;
        debug!(
            "Loaded {} forms and {} profiles from {}",
            snapshot.forms.len(),
            snapshot.profiles.len(),
            path.display()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    pub async fn save(&self, path: &Path) -> Result<(), RepositoryError> {
        let snapshot = self.snapshot().await;
        snapshot.write(path).await
    }

    /// A copy of the current state
    pub async fn snapshot(&self) -> AwardSnapshot {
        self.state.read().await.clone()
    }

    /// Insert or replace a user's profile
    pub async fn put_profile(&self, user_id: UserId, profile: ActorProfile) {
        let mut state = self.state.write().await;
        match state.profiles.iter_mut().find(|r| r.user_id == user_id) {
            Some(record) => record.profile = profile,
            None => state.profiles.push(ProfileRecord { user_id, profile }),
        }
    }

    /// Register an academic period; the latest one is open for submissions
    pub async fn add_period(&self, period: AcademicPeriod) {
        let mut state = self.state.write().await;
        if !state.periods.contains(&period) {
            state.periods.push(period);
        }
    }
}

// =========================================================================
// Transaction helpers (called with the write lock held)
// =========================================================================

fn form_mut(state: &mut AwardSnapshot, form_id: FormId) -> Result<&mut Form, DomainError> {
    state
        .forms
        .iter_mut()
        .find(|f| f.id == form_id)
        .ok_or_else(|| DomainError::not_found("form", form_id))
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

/// Compare-and-set a status change and append its audit row
fn apply_change(
    state: &mut AwardSnapshot,
    change: &StatusChange,
    now: DateTime<Utc>,
) -> Result<bool, DomainError> {
    let form = form_mut(state, change.form_id)?;
    if form.status == change.to {
        return Ok(false);
    }
    if form.status != change.from {
        return Err(DomainError::StaleStatus {
            expected: change.from,
            actual: form.status,
        });
    }
    form.status = change.to;
    form.reject_reason = change.reject_reason.clone();
    form.latest_update = now;

    let Some(audit) = change.audit.clone() else {
        return Ok(true);
    };
    match audit {
        AuditEntry::Approval {
            user_id,
            decision,
            reject_reason,
        } => {
            let id = next_id(state.approval_logs.iter().map(|l| l.id.get()));
            state.approval_logs.push(ApprovalLog {
                id: LogId(id),
                form_id: change.form_id,
                user_id,
                decision,
                reject_reason,
                approved_at: now,
            });
        }
        AuditEntry::Type {
            user_id,
            log_type,
            old_value,
            status,
            reject_reason,
        } => {
            let id = next_id(state.type_logs.iter().map(|l| l.id.get()));
            state.type_logs.push(TypeLog {
                id: LogId(id),
                form_id: change.form_id,
                user_id,
                log_type,
                old_value,
                new_value: None,
                status,
                reject_reason,
                changed_at: now,
            });
        }
        AuditEntry::Signed {
            user_id,
            signed_status,
        } => {
            let id = next_id(state.signed_logs.iter().map(|l| l.id.get()));
            state.signed_logs.push(SignedLog {
                id: LogId(id),
                form_id: change.form_id,
                user_id,
                signed_status,
                signed_at: now,
            });
        }
    }
    Ok(true)
}

fn eligible_voters(state: &AwardSnapshot) -> Vec<UserId> {
    state
        .profiles
        .iter()
        .filter(|r| matches!(r.profile, ActorProfile::Committee(c) if !c.is_chairman))
        .map(|r| r.user_id)
        .collect()
}

fn newest_first(mut forms: Vec<Form>) -> Vec<Form> {
    forms.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    forms
}

fn logs_of<T: Clone>(logs: &[T], form_id: FormId, id_of: impl Fn(&T) -> FormId) -> Vec<T> {
    logs.iter().filter(|l| id_of(l) == form_id).cloned().collect()
}

#[async_trait]
impl AwardRepository for InMemoryAwardStore {
    async fn create_nomination(
        &self,
        draft: NominationDraft,
        files: Vec<StoredFile>,
    ) -> Result<Form, RepositoryError> {
        let mut state = self.state.write().await;
        if state
            .forms
            .iter()
            .any(|f| f.user_id == draft.user_id && f.period == draft.period)
        {
            return Err(DomainError::DuplicateSubmission {
                user: draft.user_id,
                period: draft.period,
            }
            .into());
        }

        let form_id = FormId(next_id(state.forms.iter().map(|f| f.id.get())));
        let first_attachment_id = next_id(
            state
                .forms
                .iter()
                .flat_map(|f| f.attachments.iter().map(|a| a.id.get())),
        );
        let form = Form::create(form_id, draft, &files, first_attachment_id, Utc::now());
        state.forms.push(form.clone());
        Ok(form)
    }

    async fn exists_for_period(
        &self,
        user_id: UserId,
        period: AcademicPeriod,
    ) -> Result<bool, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .forms
            .iter()
            .any(|f| f.user_id == user_id && f.period == period))
    }

    async fn find_form(&self, form_id: FormId) -> Result<Option<Form>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.forms.iter().find(|f| f.id == form_id).cloned())
    }

    async fn forms_by_user(&self, user_id: UserId) -> Result<Vec<Form>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .forms
                .iter()
                .filter(|f| f.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn forms_by_user_and_year(
        &self,
        user_id: UserId,
        year: i32,
    ) -> Result<Vec<Form>, RepositoryError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .forms
                .iter()
                .filter(|f| f.user_id == user_id && f.period.year == year)
                .cloned()
                .collect(),
        ))
    }

    async fn form_by_user_and_period(
        &self,
        user_id: UserId,
        period: AcademicPeriod,
    ) -> Result<Option<Form>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .forms
            .iter()
            .find(|f| f.user_id == user_id && f.period == period)
            .cloned())
    }

    async fn forms_by_user_in_years(
        &self,
        user_id: UserId,
        years: &[i32],
        page: PageRequest,
    ) -> Result<Page<Form>, RepositoryError> {
        let state = self.state.read().await;
        let forms = newest_first(
            state
                .forms
                .iter()
                .filter(|f| f.user_id == user_id && years.contains(&f.period.year))
                .cloned()
                .collect(),
        );
        Ok(Page::paginate(forms, page))
    }

    async fn search_forms(
        &self,
        filter: &FormFilter,
        page: PageRequest,
    ) -> Result<Page<Form>, RepositoryError> {
        let state = self.state.read().await;
        let voted: BTreeSet<FormId> = match filter.exclude_voted_by {
            Some(voter) => state
                .vote_logs
                .iter()
                .filter(|v| v.voter_id == voter)
                .map(|v| v.form_id)
                .collect(),
            None => BTreeSet::new(),
        };
        let mut forms: Vec<Form> = state
            .forms
            .iter()
            .filter(|f| filter.matches(f) && !voted.contains(&f.id))
            .cloned()
            .collect();
        filter.sort(&mut forms);
        Ok(Page::paginate(forms, page))
    }

    async fn award_types(&self) -> Result<Vec<String>, RepositoryError> {
        let state = self.state.read().await;
        let types: BTreeSet<String> = state
            .forms
            .iter()
            .map(|f| f.award_type.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Ok(types.into_iter().collect())
    }

    async fn update_award_type(
        &self,
        form_id: FormId,
        award_type: &str,
    ) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        let form = form_mut(&mut state, form_id)?;
        if form.award_type == award_type {
            return Ok(false);
        }
        form.award_type = award_type.to_string();
        form.latest_update = Utc::now();
        Ok(true)
    }

    async fn apply_status_change(&self, change: &StatusChange) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(apply_change(&mut state, change, Utc::now())?)
    }

    async fn record_vote(
        &self,
        ballot: Ballot,
        rule: &CommitteeRule,
    ) -> Result<RecordedVote, RepositoryError> {
        let mut state = self.state.write().await;
        let now = Utc::now();

        let previous_status = form_mut(&mut state, ballot.form_id)?.status;
        if !CommitteeRule::accepts_votes(previous_status) {
            return Err(DomainError::VotingClosed(previous_status).into());
        }

        let voters = eligible_voters(&state);
        if voters.is_empty() {
            return Err(DomainError::NoEligibleVoters.into());
        }
        if !voters.contains(&ballot.voter_id) {
            return Err(DomainError::NotEligibleVoter(ballot.voter_id).into());
        }

        match state
            .vote_logs
            .iter_mut()
            .find(|v| v.form_id == ballot.form_id && v.voter_id == ballot.voter_id)
        {
            Some(existing) => {
                existing.operation = ballot.operation;
                existing.voted_at = now;
            }
            None => {
                let id = next_id(state.vote_logs.iter().map(|v| v.id.get()));
                state.vote_logs.push(VoteLog {
                    id: LogId(id),
                    form_id: ballot.form_id,
                    voter_id: ballot.voter_id,
                    operation: ballot.operation,
                    voted_at: now,
                });
            }
        }

        let tally = VoteTally::from_votes(
            voters.len(),
            state
                .vote_logs
                .iter()
                .filter(|v| v.form_id == ballot.form_id)
                .map(|v| &v.operation),
        );

        let (form_status, status_changed) =
            match rule.resolve(ballot.form_id, previous_status, &tally) {
                Some(change) => {
                    let applied = apply_change(&mut state, &change, now)?;
                    (change.to, applied)
                }
                None => (previous_status, false),
            };

        Ok(RecordedVote {
            tally,
            previous_status,
            form_status,
            status_changed,
        })
    }

    async fn find_approval_log(
        &self,
        log_id: LogId,
    ) -> Result<Option<ApprovalLog>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.approval_logs.iter().find(|l| l.id == log_id).cloned())
    }

    async fn approval_logs(&self, form_id: FormId) -> Result<Vec<ApprovalLog>, RepositoryError> {
        let state = self.state.read().await;
        Ok(logs_of(&state.approval_logs, form_id, |l| l.form_id))
    }

    async fn approval_history(
        &self,
        filter: &ApprovalHistoryFilter,
        page: PageRequest,
    ) -> Result<Page<ApprovalHistoryRow>, RepositoryError> {
        let state = self.state.read().await;
        let mut rows: Vec<ApprovalHistoryRow> = state
            .approval_logs
            .iter()
            .filter_map(|log| {
                let form = state.forms.iter().find(|f| f.id == log.form_id)?;
                filter
                    .matches(log, form)
                    .then(|| ApprovalHistoryRow::join(log, form))
            })
            .collect();
        filter.sort(&mut rows);
        Ok(Page::paginate(rows, page))
    }

    async fn type_logs(&self, form_id: FormId) -> Result<Vec<TypeLog>, RepositoryError> {
        let state = self.state.read().await;
        Ok(logs_of(&state.type_logs, form_id, |l| l.form_id))
    }

    async fn signed_logs(&self, form_id: FormId) -> Result<Vec<SignedLog>, RepositoryError> {
        let state = self.state.read().await;
        Ok(logs_of(&state.signed_logs, form_id, |l| l.form_id))
    }

    async fn vote_logs(&self, form_id: FormId) -> Result<Vec<VoteLog>, RepositoryError> {
        let state = self.state.read().await;
        Ok(logs_of(&state.vote_logs, form_id, |l| l.form_id))
    }
}

#[async_trait]
impl ProfileDirectory for InMemoryAwardStore {
    async fn profile(&self, user_id: UserId) -> Result<Option<ActorProfile>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .profiles
            .iter()
            .find(|r| r.user_id == user_id)
            .map(|r| r.profile.clone()))
    }
}

#[async_trait]
impl CommitteeRoster for InMemoryAwardStore {
    async fn members(&self) -> Result<Vec<CommitteeMember>, RepositoryError> {
        let state = self.state.read().await;
        let mut members: Vec<CommitteeMember> = state
            .profiles
            .iter()
            .filter_map(|r| match r.profile {
                ActorProfile::Committee(profile) => Some(CommitteeMember {
                    user_id: r.user_id,
                    profile,
                }),
                _ => None,
            })
            .collect();
        members.sort_by_key(|m| m.user_id);
        Ok(members)
    }

    async fn set_chairman(
        &self,
        user_id: UserId,
        is_chairman: bool,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let is_member = state
            .profiles
            .iter()
            .any(|r| r.user_id == user_id && matches!(r.profile, ActorProfile::Committee(_)));
        if !is_member {
            return Err(DomainError::not_found("committee member", user_id).into());
        }

        for record in state.profiles.iter_mut() {
            if let ActorProfile::Committee(profile) = &mut record.profile {
                if record.user_id == user_id {
                    profile.is_chairman = is_chairman;
                } else if is_chairman {
                    profile.is_chairman = false;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AcademicCalendar for InMemoryAwardStore {
    async fn current_open_period(&self) -> Result<Option<AcademicPeriod>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.periods.iter().max().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use award_domain::{
        CommitteeProfile, Decision, FormStatus, NominationDraft, SortKey, SortOrder,
        VoteOperation,
    };
    use chrono::NaiveDate;

    fn draft(user: u64, period: AcademicPeriod, name: &str) -> NominationDraft {
        NominationDraft {
            user_id: UserId(user),
            period,
            award_type: "academic".to_string(),
            student_firstname: name.to_string(),
            student_lastname: "Test".to_string(),
            student_email: format!("{}@example.ac.th", name.to_lowercase()),
            student_number: format!("64{:05}", user),
            faculty_id: 1,
            department_id: 1,
            campus_id: 1,
            student_year: 2,
            advisor_name: "Advisor".to_string(),
            student_phone_number: "000".to_string(),
            student_address: "Addr".to_string(),
            gpa: 3.2,
            student_date_of_birth: NaiveDate::from_ymd_opt(2004, 2, 2).unwrap(),
            form_detail: "detail".to_string(),
            organization: None,
        }
    }

    async fn committee(store: &InMemoryAwardStore, members: &[(u64, bool)]) {
        for (user, chair) in members {
            store
                .put_profile(
                    UserId(*user),
                    ActorProfile::Committee(CommitteeProfile { is_chairman: *chair }),
                )
                .await;
        }
    }

    async fn forwarded_form(store: &InMemoryAwardStore) -> FormId {
        let form = store
            .create_nomination(draft(1, AcademicPeriod::new(2025, 1), "Anan"), vec![])
            .await
            .unwrap();
        let mut state = store.state.write().await;
        form_mut(&mut state, form.id).unwrap().status = FormStatus::ForwardedToCommittee;
        form.id
    }

    fn ballot(form_id: FormId, voter: u64, operation: VoteOperation) -> Ballot {
        Ballot {
            form_id,
            voter_id: UserId(voter),
            operation,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_rejects_duplicates() {
        let store = InMemoryAwardStore::new();
        let files = vec![
            StoredFile {
                file_type: "pdf".to_string(),
                file_size: 10,
                file_path: "a.pdf".to_string(),
            },
            StoredFile {
                file_type: "pdf".to_string(),
                file_size: 20,
                file_path: "b.pdf".to_string(),
            },
        ];
        let first = store
            .create_nomination(draft(1, AcademicPeriod::new(2025, 1), "Anan"), files)
            .await
            .unwrap();
        assert_eq!(first.id, FormId(1));
        assert_eq!(first.attachments.len(), 2);
        assert_eq!(first.attachments[1].id.get(), 2);

        let err = store
            .create_nomination(draft(1, AcademicPeriod::new(2025, 1), "Anan"), vec![])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Domain(DomainError::DuplicateSubmission { .. })
        ));

        let second = store
            .create_nomination(draft(1, AcademicPeriod::new(2025, 2), "Anan"), vec![])
            .await
            .unwrap();
        assert_eq!(second.id, FormId(2));
    }

    #[tokio::test]
    async fn test_apply_change_is_compare_and_set() {
        let store = InMemoryAwardStore::new();
        let form = store
            .create_nomination(draft(1, AcademicPeriod::new(2025, 1), "Anan"), vec![])
            .await
            .unwrap();
        let change = StatusChange {
            form_id: form.id,
            from: FormStatus::New,
            to: FormStatus::HeadApproved,
            reject_reason: None,
            audit: Some(AuditEntry::Approval {
                user_id: UserId(20),
                decision: Decision::Approve,
                reject_reason: None,
            }),
        };

        assert!(store.apply_status_change(&change).await.unwrap());
        assert!(!store.apply_status_change(&change).await.unwrap());
        assert_eq!(store.approval_logs(form.id).await.unwrap().len(), 1);

        let stale = StatusChange {
            from: FormStatus::New,
            to: FormStatus::HeadRejected,
            ..change
        };
        let err = store.apply_status_change(&stale).await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Domain(DomainError::StaleStatus { .. })
        ));
    }

    #[tokio::test]
    async fn test_vote_upsert_replaces_previous_vote() {
        let store = InMemoryAwardStore::new();
        committee(&store, &[(10, false), (11, false), (12, false), (13, false), (14, false)]).await;
        let form_id = forwarded_form(&store).await;
        let rule = CommitteeRule::default();

        let first = store
            .record_vote(ballot(form_id, 10, VoteOperation::Approve), &rule)
            .await
            .unwrap();
        assert_eq!(first.tally.approve_count, 1);

        let second = store
            .record_vote(ballot(form_id, 10, VoteOperation::Reject), &rule)
            .await
            .unwrap();
        assert_eq!(second.tally.approve_count, 0);
        assert_eq!(second.tally.reject_count, 1);

        let votes = store.vote_logs(form_id).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].operation, VoteOperation::Reject);
    }

    #[tokio::test]
    async fn test_majority_of_five_moves_form() {
        let store = InMemoryAwardStore::new();
        committee(
            &store,
            &[(9, true), (10, false), (11, false), (12, false), (13, false), (14, false)],
        )
        .await;
        let form_id = forwarded_form(&store).await;
        let rule = CommitteeRule::default();

        for voter in [10, 11] {
            let recorded = store
                .record_vote(ballot(form_id, voter, VoteOperation::Approve), &rule)
                .await
                .unwrap();
            assert!(!recorded.status_changed);
            assert_eq!(recorded.tally.eligible_voters, 5);
        }
        let third = store
            .record_vote(ballot(form_id, 12, VoteOperation::Approve), &rule)
            .await
            .unwrap();
        assert!(third.status_changed);
        assert_eq!(third.form_status, FormStatus::CommitteeApproved);

        // Re-applying the same outcome is a no-op
        let fourth = store
            .record_vote(ballot(form_id, 13, VoteOperation::Approve), &rule)
            .await
            .unwrap();
        assert!(!fourth.status_changed);
        assert_eq!(fourth.form_status, FormStatus::CommitteeApproved);
    }

    #[tokio::test]
    async fn test_even_committee_tie_decides_nothing() {
        let store = InMemoryAwardStore::new();
        committee(&store, &[(10, false), (11, false), (12, false), (13, false)]).await;
        let form_id = forwarded_form(&store).await;
        let rule = CommitteeRule::default();

        for (voter, op) in [
            (10, VoteOperation::Approve),
            (11, VoteOperation::Approve),
            (12, VoteOperation::Reject),
            (13, VoteOperation::Reject),
        ] {
            store.record_vote(ballot(form_id, voter, op), &rule).await.unwrap();
        }

        let form = store.find_form(form_id).await.unwrap().unwrap();
        assert_eq!(form.status, FormStatus::ForwardedToCommittee);
    }

    #[tokio::test]
    async fn test_majority_reject_sets_reason() {
        let store = InMemoryAwardStore::new();
        committee(&store, &[(10, false), (11, false), (12, false)]).await;
        let form_id = forwarded_form(&store).await;
        let rule = CommitteeRule::new("Not this time");

        for voter in [10, 11] {
            store
                .record_vote(ballot(form_id, voter, VoteOperation::Reject), &rule)
                .await
                .unwrap();
        }
        let form = store.find_form(form_id).await.unwrap().unwrap();
        assert_eq!(form.status, FormStatus::CommitteeRejected);
        assert_eq!(form.reject_reason.as_deref(), Some("Not this time"));
    }

    #[tokio::test]
    async fn test_vote_preconditions() {
        let store = InMemoryAwardStore::new();
        let form_id = forwarded_form(&store).await;
        let rule = CommitteeRule::default();

        let err = store
            .record_vote(ballot(form_id, 10, VoteOperation::Approve), &rule)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Domain(DomainError::NoEligibleVoters)));

        committee(&store, &[(9, true), (10, false)]).await;
        let err = store
            .record_vote(ballot(form_id, 9, VoteOperation::Approve), &rule)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Domain(DomainError::NotEligibleVoter(UserId(9)))
        ));

        let other = store
            .create_nomination(draft(2, AcademicPeriod::new(2025, 1), "Bee"), vec![])
            .await
            .unwrap();
        let err = store
            .record_vote(ballot(other.id, 10, VoteOperation::Approve), &rule)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Domain(DomainError::VotingClosed(FormStatus::New))
        ));
        assert!(store.vote_logs(other.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_chairman_keeps_single_chair() {
        let store = InMemoryAwardStore::new();
        committee(&store, &[(1, true), (2, false), (3, false)]).await;

        store.set_chairman(UserId(2), true).await.unwrap();
        let chairs: Vec<UserId> = store
            .members()
            .await
            .unwrap()
            .into_iter()
            .filter(|m| m.profile.is_chairman)
            .map(|m| m.user_id)
            .collect();
        assert_eq!(chairs, vec![UserId(2)]);

        store.set_chairman(UserId(2), false).await.unwrap();
        assert!(store.members().await.unwrap().iter().all(|m| !m.profile.is_chairman));

        let err = store.set_chairman(UserId(99), true).await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Domain(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_excludes_voted_and_sorts() {
        let store = InMemoryAwardStore::new();
        committee(&store, &[(10, false)]).await;
        for (user, name) in [(1, "Chai"), (2, "Anan"), (3, "Bee")] {
            let form = store
                .create_nomination(draft(user, AcademicPeriod::new(2025, 1), name), vec![])
                .await
                .unwrap();
            let mut state = store.state.write().await;
            form_mut(&mut state, form.id).unwrap().status = FormStatus::ForwardedToCommittee;
        }
        store
            .record_vote(
                ballot(FormId(1), 10, VoteOperation::Approve),
                &CommitteeRule::default(),
            )
            .await
            .unwrap();

        let filter = FormFilter {
            status: Some(FormStatus::ForwardedToCommittee),
            exclude_voted_by: Some(UserId(10)),
            sort_by: SortKey::Name,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let page = store
            .search_forms(&filter, PageRequest::new(1, 5))
            .await
            .unwrap();
        let names: Vec<&str> = page
            .items
            .iter()
            .map(|f| f.student_firstname.as_str())
            .collect();
        assert_eq!(names, vec!["Anan", "Bee"]);
    }

    #[tokio::test]
    async fn test_current_period_is_latest() {
        let store = InMemoryAwardStore::new();
        assert_eq!(store.current_open_period().await.unwrap(), None);
        store.add_period(AcademicPeriod::new(2024, 2)).await;
        store.add_period(AcademicPeriod::new(2025, 1)).await;
        store.add_period(AcademicPeriod::new(2024, 1)).await;
        assert_eq!(
            store.current_open_period().await.unwrap(),
            Some(AcademicPeriod::new(2025, 1))
        );
    }

    #[tokio::test]
    async fn test_snapshot_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state/award.json");

        let store = InMemoryAwardStore::new();
        store.add_period(AcademicPeriod::new(2025, 1)).await;
        committee(&store, &[(10, true)]).await;
        store
            .create_nomination(draft(1, AcademicPeriod::new(2025, 1), "Anan"), vec![])
            .await
            .unwrap();
        store.save(&path).await.unwrap();

        let loaded = InMemoryAwardStore::load(&path).await.unwrap();
        assert_eq!(loaded.snapshot().await, store.snapshot().await);
        assert!(loaded.profile(UserId(10)).await.unwrap().unwrap().is_chairman());

        let empty = InMemoryAwardStore::load(&dir.path().join("missing.json"))
            .await
            .unwrap();
        assert!(empty.snapshot().await.forms.is_empty());
    }

    #[tokio::test]
    async fn test_locked_sessions_keep_both_votes() {
        use crate::attachments::LocalAttachmentStore;
        use crate::storage::StateSession;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("award.json");

        let seed = InMemoryAwardStore::new();
        committee(&seed, &[(10, false), (11, false), (12, false)]).await;
        let form_id = forwarded_form(&seed).await;
        seed.save(&path).await.unwrap();

        let tasks: Vec<_> = [10, 11]
            .into_iter()
            .map(|voter| {
                let path = path.clone();
                let uploads = dir.path().join("uploads");
                tokio::spawn(async move {
                    let session = StateSession::open(&path).await.unwrap();
                    session
                        .store()
                        .record_vote(
                            ballot(form_id, voter, VoteOperation::Approve),
                            &CommitteeRule::default(),
                        )
                        .await
                        .unwrap();
                    session
                        .commit(&[], &LocalAttachmentStore::new(uploads))
                        .await
                        .unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let saved = InMemoryAwardStore::load(&path).await.unwrap();
        assert_eq!(saved.vote_logs(form_id).await.unwrap().len(), 2);
        assert_eq!(
            saved.find_form(form_id).await.unwrap().unwrap().status,
            FormStatus::CommitteeApproved
        );
    }
}
