//! Review scope resolution
//!
//! Maps a reviewer to the forms they may list and act on: the status their
//! role acts on next plus, for department heads, associate deans and deans,
//! the department or faculty from their profile.

use crate::error::WorkflowError;
use crate::ports::profile_directory::ProfileDirectory;
use award_domain::{Actor, DomainError, ReviewScope};
use std::sync::Arc;
use tracing::debug;

pub struct ScopeResolver {
    profiles: Arc<dyn ProfileDirectory>,
}

impl ScopeResolver {
    pub fn new(profiles: Arc<dyn ProfileDirectory>) -> Self {
        Self { profiles }
    }

    /// Resolve the scope of `actor`.
    ///
    /// Fails with [`DomainError::ScopeResolution`] when a department- or
    /// faculty-limited role has no matching profile.
    pub async fn resolve(&self, actor: Actor) -> Result<ReviewScope, WorkflowError> {
        if !ReviewScope::needs_profile(actor.role) {
            return Ok(ReviewScope::for_role(actor.role));
        }

        let profile = self.profiles.profile(actor.user_id).await?;
        let scope = profile
            .as_ref()
            .and_then(|p| ReviewScope::from_profile(actor.role, p))
            .ok_or(DomainError::ScopeResolution {
                user: actor.user_id,
                role: actor.role,
            })?;

        debug!(
            "Resolved scope for user {} ({}): {:?}",
            actor.user_id, actor.role, scope
        );
        Ok(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::FakeProfiles;
    use award_domain::{
        ActorProfile, FacultyScopeProfile, FormStatus, HeadOfDepartmentProfile, Role, UserId,
    };

    fn resolver(profiles: FakeProfiles) -> ScopeResolver {
        ScopeResolver::new(Arc::new(profiles))
    }

    #[tokio::test]
    async fn test_head_of_department_scope() {
        let profiles = FakeProfiles::default().with(
            2,
            ActorProfile::HeadOfDepartment(HeadOfDepartmentProfile {
                faculty_id: 1,
                department_id: 7,
            }),
        );
        let scope = resolver(profiles)
            .resolve(Actor::new(2u64, Role::HeadOfDepartment))
            .await
            .unwrap();
        assert_eq!(scope.required_status, Some(FormStatus::New));
        assert_eq!(scope.department_id, Some(7));
        assert_eq!(scope.faculty_id, None);
    }

    #[tokio::test]
    async fn test_dean_scope_uses_faculty() {
        let profiles = FakeProfiles::default()
            .with(4, ActorProfile::Dean(FacultyScopeProfile { faculty_id: 3 }));
        let scope = resolver(profiles)
            .resolve(Actor::new(4u64, Role::Dean))
            .await
            .unwrap();
        assert_eq!(scope.required_status, Some(FormStatus::AssociateDeanApproved));
        assert_eq!(scope.faculty_id, Some(3));
    }

    #[tokio::test]
    async fn test_missing_profile_is_scope_resolution_error() {
        let err = resolver(FakeProfiles::default())
            .resolve(Actor::new(2u64, Role::HeadOfDepartment))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::ScopeResolution { user, .. }) if *user == UserId(2)
        ));
    }

    #[tokio::test]
    async fn test_roles_without_profile_scope() {
        let resolver = resolver(FakeProfiles::default());
        let scope = resolver
            .resolve(Actor::new(5u64, Role::StudentDevelopment))
            .await
            .unwrap();
        assert_eq!(scope.required_status, Some(FormStatus::DeanApproved));

        let scope = resolver.resolve(Actor::new(1u64, Role::Student)).await.unwrap();
        assert_eq!(scope, ReviewScope::default());
    }
}
