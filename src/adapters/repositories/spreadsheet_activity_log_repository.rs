use std::sync::Arc;

use chrono::NaiveDateTime;
use error_stack::ResultExt;
use tracing::instrument;

use crate::adapters::sheets::{
    records::{activity_from_row, activity_to_row},
    spreadsheet_read::SpreadsheetRead,
    spreadsheet_write::SpreadsheetWrite,
};
use crate::domain::{
    activity::{ActivityAction, ActivityLog},
    sheets::ranges::ACTIVITY,
};
use crate::ports::activity_log_repository::{ActivityLogRepository, ActivityLogRepositoryError};

pub struct SpreadsheetActivityLogRepository<S> {
    sheets: Arc<S>,
    sheet_title: String,
}

impl<S> std::fmt::Debug for SpreadsheetActivityLogRepository<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetActivityLogRepository {{ sheet: {} }}", self.sheet_title)
    }
}

impl<S> SpreadsheetActivityLogRepository<S>
where
    S: SpreadsheetRead + SpreadsheetWrite + Send + Sync,
{
    pub fn new(sheets: Arc<S>, sheet_title: impl Into<String>) -> Self {
        Self {
            sheets,
            sheet_title: sheet_title.into(),
        }
    }

    async fn read_table(
        &self,
    ) -> error_stack::Result<Vec<Vec<String>>, ActivityLogRepositoryError> {
        let range = ACTIVITY.table_range(&self.sheet_title);
        self.sheets
            .read_range(&range)
            .await
            .change_context(ActivityLogRepositoryError::FetchError)
            .attach_printable_lazy(|| format!("Failed to read activity log from {}", range))
    }
}

#[async_trait::async_trait]
impl<S> ActivityLogRepository for SpreadsheetActivityLogRepository<S>
where
    S: SpreadsheetRead + SpreadsheetWrite + Send + Sync,
{
    #[instrument(skip(self, detail))]
    async fn append(
        &self,
        user: &str,
        action: ActivityAction,
        detail: &str,
        at: NaiveDateTime,
    ) -> error_stack::Result<ActivityLog, ActivityLogRepositoryError> {
        let rows = self
            .read_table()
            .await
            .change_context(ActivityLogRepositoryError::AppendError)?;

        let entry = ActivityLog {
            numero: rows.len() as u32 + 1,
            date: at.format("%Y-%m-%d").to_string(),
            time: at.format("%H:%M:%S").to_string(),
            user: user.to_owned(),
            action,
            detail: detail.to_owned(),
        };

        let range = ACTIVITY.table_range(&self.sheet_title);
        self.sheets
            .append_rows(&range, &[activity_to_row(&entry)])
            .await
            .change_context(ActivityLogRepositoryError::AppendError)
            .attach_printable_lazy(|| format!("Failed to append to {}", range))?;
        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> error_stack::Result<Vec<ActivityLog>, ActivityLogRepositoryError> {
        let rows = self.read_table().await?;
        Ok(rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|row| activity_from_row(row))
            .rev()
            .collect())
    }
}
