use std::sync::Arc;

use chrono::NaiveDateTime;
use error_stack::ResultExt;
use tracing::instrument;

use crate::adapters::sheets::{
    records::{deleted_from_row, deleted_to_row, is_live_asset_row},
    spreadsheet_read::SpreadsheetRead,
    spreadsheet_write::SpreadsheetWrite,
};
use crate::domain::{
    asset::{Asset, DeletedAsset},
    sheets::ranges::DELETED,
};
use crate::ports::deleted_asset_repository::{
    DeletedAssetRepository, DeletedAssetRepositoryError,
};

/// Archive of deleted assets in the `Historial` table.
pub struct SpreadsheetDeletedAssetRepository<S> {
    sheets: Arc<S>,
    sheet_title: String,
}

impl<S> std::fmt::Debug for SpreadsheetDeletedAssetRepository<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetDeletedAssetRepository {{ sheet: {} }}", self.sheet_title)
    }
}

impl<S> SpreadsheetDeletedAssetRepository<S> {
    pub fn new(sheets: Arc<S>, sheet_title: impl Into<String>) -> Self {
        Self {
            sheets,
            sheet_title: sheet_title.into(),
        }
    }
}

#[async_trait::async_trait]
impl<S> DeletedAssetRepository for SpreadsheetDeletedAssetRepository<S>
where
    S: SpreadsheetRead + SpreadsheetWrite + Send + Sync,
{
    #[instrument(skip(self, asset), fields(numero = asset.numero, code = %asset.code))]
    async fn archive(
        &self,
        asset: &Asset,
        at: NaiveDateTime,
    ) -> error_stack::Result<DeletedAsset, DeletedAssetRepositoryError> {
        let deleted = DeletedAsset {
            asset: asset.clone(),
            deleted_at: at.format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        let range = DELETED.table_range(&self.sheet_title);
        self.sheets
            .append_rows(&range, &[deleted_to_row(&deleted)])
            .await
            .change_context(DeletedAssetRepositoryError::ArchiveError)
            .attach_printable_lazy(|| format!("Failed to append to {}", range))?;
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> error_stack::Result<Vec<DeletedAsset>, DeletedAssetRepositoryError> {
        let range = DELETED.table_range(&self.sheet_title);
        let rows = self
            .sheets
            .read_range(&range)
            .await
            .change_context(DeletedAssetRepositoryError::FetchError)
            .attach_printable_lazy(|| format!("Failed to read {}", range))?;

        Ok(rows
            .iter()
            .filter(|row| is_live_asset_row(row))
            .map(|row| deleted_from_row(row))
            .rev()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sheets::memory_spreadsheet::MemorySpreadsheet;
    use crate::domain::asset::NewAsset;
    use chrono::NaiveDate;

    const SHEET: &str = "Historial";

    fn asset(numero: u32, code: &str) -> Asset {
        NewAsset {
            code: code.into(),
            name: "Silla".into(),
            quantity: 2,
            ..Default::default()
        }
        .with_numero(numero)
    }

    #[tokio::test]
    async fn test_archive_then_list_newest_first() {
        let sheet = Arc::new(MemorySpreadsheet::new());
        let repo = SpreadsheetDeletedAssetRepository::new(sheet.clone(), SHEET);
        let at = NaiveDate::from_ymd_opt(2024, 5, 3)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();

        repo.archive(&asset(1, "SL-01"), at).await.unwrap();
        let second = repo.archive(&asset(2, "SL-02"), at).await.unwrap();
        assert_eq!(second.deleted_at, "2024-05-03 18:30:00");

        let row = sheet.row(SHEET, 3);
        assert_eq!(row.len(), 14);
        assert_eq!(row[1], "SL-02");
        assert_eq!(row[13], "2024-05-03 18:30:00");

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].asset.code, "SL-02");
        assert_eq!(listed[1].asset.quantity, 2);
    }
}
