use sheets_inventory::{
    adapters::{
        auth::authenticator::ServiceAccountAuthenticator,
        config::app_config::AppConfig,
        drive::drive_manager::DriveManager,
        http_client::build_http_client,
        repositories::{
            spreadsheet_activity_log_repository::SpreadsheetActivityLogRepository,
            spreadsheet_asset_repository::SpreadsheetAssetRepository,
            spreadsheet_deleted_asset_repository::SpreadsheetDeletedAssetRepository,
            spreadsheet_user_repository::SpreadsheetUserRepository,
        },
        sheets::spreadsheet_manager::SpreadsheetManager,
    },
    application::{
        activity_recorder::ActivityRecorder, auth_service::AuthService,
        history_service::HistoryService, inventory_service::InventoryService,
        reporting_service::ReportingService, service::InventoryApplicationService,
        user_service::UserService,
    },
    ports::{
        access_token_provider::AccessTokenProvider,
        activity_log_repository::ActivityLogRepository,
        application_service::ApplicationServiceError, asset_repository::AssetRepository,
        deleted_asset_repository::DeletedAssetRepository, image_store::ImageStore,
        user_repository::UserRepository,
    },
};

use error_stack::ResultExt;
use std::sync::Arc;
use tracing::instrument;

pub struct ApplicationServiceFactory;

impl ApplicationServiceFactory {
    #[instrument(skip(config))]
    pub async fn create(
        config: &AppConfig,
    ) -> error_stack::Result<Arc<InventoryApplicationService>, ApplicationServiceError> {
        let client = build_http_client(&config.http).change_context_lazy(|| {
            ApplicationServiceError::InitializationFailed {
                details: "HTTP client".to_string(),
            }
        })?;

        let auth: Arc<dyn AccessTokenProvider> = Arc::new(
            ServiceAccountAuthenticator::from_config(&config.auth, client.clone())
                .await
                .change_context_lazy(|| ApplicationServiceError::InitializationFailed {
                    details: "service account credentials".to_string(),
                })?,
        );

        let spreadsheet_manager = Arc::new(SpreadsheetManager::new(
            config.sheets.clone(),
            client.clone(),
            Arc::clone(&auth),
        ));
        let images: Arc<dyn ImageStore> =
            Arc::new(DriveManager::new(config.drive.clone(), client, auth));

        let assets: Arc<dyn AssetRepository> = Arc::new(SpreadsheetAssetRepository::new(
            Arc::clone(&spreadsheet_manager),
            config.sheets.assets_sheet.clone(),
        ));
        let users: Arc<dyn UserRepository> = Arc::new(SpreadsheetUserRepository::new(
            Arc::clone(&spreadsheet_manager),
            config.sheets.users_sheet.clone(),
        ));
        let activity: Arc<dyn ActivityLogRepository> =
            Arc::new(SpreadsheetActivityLogRepository::new(
                Arc::clone(&spreadsheet_manager),
                config.sheets.activity_sheet.clone(),
            ));
        let deleted: Arc<dyn DeletedAssetRepository> =
            Arc::new(SpreadsheetDeletedAssetRepository::new(
                Arc::clone(&spreadsheet_manager),
                config.sheets.deleted_sheet.clone(),
            ));

        let recorder = ActivityRecorder::new(Arc::clone(&activity));

        let app_service = InventoryApplicationService::new(
            AuthService::new(Arc::clone(&users), recorder.clone()),
            InventoryService::new(
                Arc::clone(&assets),
                Arc::clone(&deleted),
                images,
                recorder.clone(),
            ),
            UserService::new(Arc::clone(&users), recorder),
            HistoryService::new(activity, deleted),
            ReportingService::new(Arc::clone(&assets)),
            assets,
            users,
        );
        Ok(Arc::new(app_service))
    }
}
