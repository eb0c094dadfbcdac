use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::activity::{ActivityAction, ActivityLog};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivityLogRepositoryError {
    #[error("Failed to fetch activity log")]
    FetchError,
    #[error("Failed to append activity entry")]
    AppendError,
}

#[async_trait::async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn append(
        &self,
        user: &str,
        action: ActivityAction,
        detail: &str,
        at: NaiveDateTime,
    ) -> error_stack::Result<ActivityLog, ActivityLogRepositoryError>;

    /// Newest entries first.
    async fn list(&self) -> error_stack::Result<Vec<ActivityLog>, ActivityLogRepositoryError>;
}
