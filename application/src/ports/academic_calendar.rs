//! Academic calendar port

use super::award_repository::RepositoryError;
use async_trait::async_trait;
use award_domain::AcademicPeriod;

#[async_trait]
pub trait AcademicCalendar: Send + Sync {
    /// The period currently accepting submissions, if any
    async fn current_open_period(&self) -> Result<Option<AcademicPeriod>, RepositoryError>;
}
