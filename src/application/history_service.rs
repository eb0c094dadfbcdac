use std::sync::Arc;

use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    activity::{ActivityAction, ActivityLog},
    asset::DeletedAsset,
    user::User,
};
use crate::ports::{
    activity_log_repository::ActivityLogRepository,
    deleted_asset_repository::DeletedAssetRepository,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryServiceError {
    #[error("{0} is not allowed to view history")]
    PermissionDenied(String),
    #[error("Failed to read history")]
    RepositoryError,
}

pub struct HistoryService {
    activity: Arc<dyn ActivityLogRepository>,
    deleted: Arc<dyn DeletedAssetRepository>,
}

impl HistoryService {
    pub fn new(
        activity: Arc<dyn ActivityLogRepository>,
        deleted: Arc<dyn DeletedAssetRepository>,
    ) -> Self {
        Self { activity, deleted }
    }

    fn require_history(actor: &User) -> error_stack::Result<(), HistoryServiceError> {
        if actor.role.can_view_history() {
            Ok(())
        } else {
            Err(report!(HistoryServiceError::PermissionDenied(
                actor.role.to_string()
            )))
        }
    }

    /// Newest first, optionally only entries of one action.
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn activity_logs(
        &self,
        actor: &User,
        filter: Option<ActivityAction>,
    ) -> error_stack::Result<Vec<ActivityLog>, HistoryServiceError> {
        Self::require_history(actor)?;
        let entries = self
            .activity
            .list()
            .await
            .change_context(HistoryServiceError::RepositoryError)?;
        Ok(match filter {
            Some(action) => entries
                .into_iter()
                .filter(|entry| entry.action == action)
                .collect(),
            None => entries,
        })
    }

    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn deleted_assets(
        &self,
        actor: &User,
    ) -> error_stack::Result<Vec<DeletedAsset>, HistoryServiceError> {
        Self::require_history(actor)?;
        self.deleted
            .list()
            .await
            .change_context(HistoryServiceError::RepositoryError)
    }
}
