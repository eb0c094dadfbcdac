use std::sync::Arc;

use error_stack::report;
use futures::future::join;
use tracing::instrument;

use crate::ports::{
    application_service::ApplicationServiceError, asset_repository::AssetRepository,
    user_repository::UserRepository,
};

use super::{
    auth_service::AuthService, history_service::HistoryService,
    inventory_service::InventoryService, reporting_service::ReportingService,
    user_service::UserService,
};

/// Every service the adapters drive, built once per process.
pub struct InventoryApplicationService {
    pub auth: AuthService,
    pub inventory: InventoryService,
    pub users: UserService,
    pub history: HistoryService,
    pub reporting: ReportingService,
    asset_repository: Arc<dyn AssetRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl InventoryApplicationService {
    pub fn new(
        auth: AuthService,
        inventory: InventoryService,
        users: UserService,
        history: HistoryService,
        reporting: ReportingService,
        asset_repository: Arc<dyn AssetRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            auth,
            inventory,
            users,
            history,
            reporting,
            asset_repository,
            user_repository,
        }
    }

    /// Reads both the asset and the user tables, which exercises the token
    /// exchange and the values API end to end.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> error_stack::Result<String, ApplicationServiceError> {
        let (assets, users) = join(self.asset_repository.list(), self.user_repository.list()).await;

        let assets = assets.map_err(|e| {
            report!(ApplicationServiceError::Unhealthy {
                details: format!("assets unreadable: {}", e.current_context()),
            })
        })?;
        let users = users.map_err(|e| {
            report!(ApplicationServiceError::Unhealthy {
                details: format!("users unreadable: {}", e.current_context()),
            })
        })?;

        Ok(format!(
            "🟢 Inventory Service - Healthy\n\
             Assets: {}\n\
             Users: {}",
            assets.len(),
            users.len()
        ))
    }
}
