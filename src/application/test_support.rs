//! Services wired over an in-memory spreadsheet with a seeded workbook.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use error_stack::report;

use crate::adapters::{
    repositories::{
        spreadsheet_activity_log_repository::SpreadsheetActivityLogRepository,
        spreadsheet_asset_repository::SpreadsheetAssetRepository,
        spreadsheet_deleted_asset_repository::SpreadsheetDeletedAssetRepository,
        spreadsheet_user_repository::SpreadsheetUserRepository,
    },
    sheets::{memory_spreadsheet::MemorySpreadsheet, spreadsheet_read::SpreadsheetRead},
};
use crate::domain::{
    activity::{ActivityAction, ActivityLog},
    sheets::ranges::ACTIVITY,
    user::{Role, User},
};
use crate::ports::{
    activity_log_repository::{ActivityLogRepository, ActivityLogRepositoryError},
    image_store::{ImageStore, ImageStoreError, ImageUpload},
    user_repository::UserRepository,
};

use super::{
    activity_recorder::ActivityRecorder, auth_service::AuthService,
    history_service::HistoryService, inventory_service::InventoryService,
    reporting_service::ReportingService, user_service::UserService,
};

pub const ASSETS_SHEET: &str = "Activos";
pub const USERS_SHEET: &str = "Usuarios";
pub const ACTIVITY_SHEET: &str = "Registro";
pub const DELETED_SHEET: &str = "Historial";

pub fn fixed_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 3)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

pub fn seeded_workbook() -> MemorySpreadsheet {
    MemorySpreadsheet::new()
        .with_rows(
            ASSETS_SHEET,
            5,
            &[
                &[
                    "1", "PC-01", "Laptop", "Dell", "1", "Usado", "Admin", "2024-05-03",
                    "Sistemas", "Piso 1", "", "1500", "",
                ],
                &["2"],
                &[
                    "3",
                    "MS-03",
                    "Mesa",
                    "Ikea",
                    "2",
                    "Nuevo",
                    "Prime",
                    "2024-04-30",
                    "Oficina",
                    "Piso 1",
                    "",
                    "80",
                    "https://lh3.googleusercontent.com/d/old-mesa",
                ],
            ],
        )
        .with_rows(
            USERS_SHEET,
            2,
            &[
                &["prime@example.com", "1111", "Prime", "Z"],
                &["admin@example.com", "2222", "Admin", "A"],
                &["user@example.com", "3333", "User", "B"],
                &["viewer@example.com", "4444", "Viewer", "C"],
            ],
        )
}

/// Records deletions and hands out predictable URLs.
#[derive(Debug, Default)]
pub struct RecordingImageStore {
    deleted: Mutex<Vec<String>>,
}

impl RecordingImageStore {
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ImageStore for RecordingImageStore {
    async fn upload(&self, image: ImageUpload) -> error_stack::Result<String, ImageStoreError> {
        Ok(format!(
            "https://lh3.googleusercontent.com/d/uploaded-{}",
            image.file_name
        ))
    }

    async fn delete(&self, url: &str) -> error_stack::Result<(), ImageStoreError> {
        self.deleted.lock().unwrap().push(url.to_owned());
        Ok(())
    }
}

pub struct FailingActivityLog;

#[async_trait::async_trait]
impl ActivityLogRepository for FailingActivityLog {
    async fn append(
        &self,
        _user: &str,
        _action: ActivityAction,
        _detail: &str,
        _at: NaiveDateTime,
    ) -> error_stack::Result<ActivityLog, ActivityLogRepositoryError> {
        Err(report!(ActivityLogRepositoryError::AppendError))
    }

    async fn list(&self) -> error_stack::Result<Vec<ActivityLog>, ActivityLogRepositoryError> {
        Ok(Vec::new())
    }
}

pub struct Fixture {
    pub sheet: Arc<MemorySpreadsheet>,
    pub images: Arc<RecordingImageStore>,
    pub user_repository: Arc<dyn UserRepository>,
    pub auth: AuthService,
    pub inventory: InventoryService,
    pub users: UserService,
    pub history: HistoryService,
    pub reporting: ReportingService,
}

impl Fixture {
    pub fn new() -> Self {
        let sheet = Arc::new(seeded_workbook());
        let activity = Arc::new(SpreadsheetActivityLogRepository::new(
            sheet.clone(),
            ACTIVITY_SHEET,
        ));
        Self::build(sheet, activity)
    }

    pub fn with_failing_activity_log() -> Self {
        Self::build(Arc::new(seeded_workbook()), Arc::new(FailingActivityLog))
    }

    fn build(sheet: Arc<MemorySpreadsheet>, activity: Arc<dyn ActivityLogRepository>) -> Self {
        let assets = Arc::new(SpreadsheetAssetRepository::new(sheet.clone(), ASSETS_SHEET));
        let deleted = Arc::new(SpreadsheetDeletedAssetRepository::new(
            sheet.clone(),
            DELETED_SHEET,
        ));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(SpreadsheetUserRepository::new(sheet.clone(), USERS_SHEET));
        let images = Arc::new(RecordingImageStore::default());
        let recorder = ActivityRecorder::new(activity.clone()).with_clock(fixed_clock);

        Fixture {
            auth: AuthService::new(user_repository.clone(), recorder.clone()),
            inventory: InventoryService::new(
                assets.clone(),
                deleted.clone(),
                images.clone(),
                recorder.clone(),
            ),
            users: UserService::new(user_repository.clone(), recorder),
            history: HistoryService::new(activity, deleted),
            reporting: ReportingService::new(assets),
            sheet,
            images,
            user_repository,
        }
    }

    /// The first seeded user holding `role`.
    pub async fn user(&self, role: Role) -> User {
        self.user_repository
            .list()
            .await
            .unwrap()
            .into_iter()
            .find(|user| user.role == role)
            .unwrap()
    }

    /// Raw `Registro` rows in sheet order.
    pub fn activity_rows(&self) -> Vec<Vec<String>> {
        futures::executor::block_on(
            self.sheet
                .read_range(&ACTIVITY.table_range(ACTIVITY_SHEET)),
        )
        .unwrap()
    }
}
