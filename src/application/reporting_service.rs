use std::sync::Arc;

use chrono::NaiveDate;
use error_stack::ResultExt;
use thiserror::Error;
use tracing::instrument;

use crate::domain::reporting::{DashboardStats, FilterOptions};
use crate::ports::asset_repository::AssetRepository;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportingServiceError {
    #[error("Failed to read assets")]
    RepositoryError,
}

pub struct ReportingService {
    assets: Arc<dyn AssetRepository>,
}

impl ReportingService {
    pub fn new(assets: Arc<dyn AssetRepository>) -> Self {
        Self { assets }
    }

    #[instrument(skip(self))]
    pub async fn dashboard_stats(
        &self,
        today: NaiveDate,
    ) -> error_stack::Result<DashboardStats, ReportingServiceError> {
        let assets = self
            .assets
            .list()
            .await
            .change_context(ReportingServiceError::RepositoryError)?;
        Ok(DashboardStats::compute(&assets, today))
    }

    #[instrument(skip(self))]
    pub async fn filter_options(&self) -> error_stack::Result<FilterOptions, ReportingServiceError> {
        let assets = self
            .assets
            .list()
            .await
            .change_context(ReportingServiceError::RepositoryError)?;
        Ok(FilterOptions::from_assets(&assets))
    }
}
