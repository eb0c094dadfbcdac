use std::sync::Arc;

use error_stack::{report, ResultExt};
use tracing::{event, instrument, Level};

use crate::adapters::sheets::{
    records::{
        asset_data_cells, asset_from_row, asset_to_row, blank_asset_data, cell,
        is_live_asset_row, is_vacant_asset_row, parse_count,
    },
    spreadsheet_read::SpreadsheetRead,
    spreadsheet_write::SpreadsheetWrite,
};
use crate::domain::{
    asset::{Asset, NewAsset},
    sheets::{cell_range::CellRange, ranges::ASSETS, row::Row},
};
use crate::ports::asset_repository::{AssetRepository, AssetRepositoryError};

/// Assets stored in the `Activos` table. Rows are addressed by their position in
/// the raw grid, so blank rows never shift a write onto a neighbour.
pub struct SpreadsheetAssetRepository<S> {
    sheets: Arc<S>,
    sheet_title: String,
}

impl<S> std::fmt::Debug for SpreadsheetAssetRepository<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetAssetRepository {{ sheet: {} }}", self.sheet_title)
    }
}

struct Located {
    row: Row,
    asset: Asset,
}

impl<S> SpreadsheetAssetRepository<S>
where
    S: SpreadsheetRead + SpreadsheetWrite + Send + Sync,
{
    pub fn new(sheets: Arc<S>, sheet_title: impl Into<String>) -> Self {
        Self {
            sheets,
            sheet_title: sheet_title.into(),
        }
    }

    async fn read_table(&self) -> error_stack::Result<Vec<Vec<String>>, AssetRepositoryError> {
        let range = ASSETS.table_range(&self.sheet_title);
        self.sheets
            .read_range(&range)
            .await
            .change_context(AssetRepositoryError::FetchAssetsError)
            .attach_printable_lazy(|| format!("Failed to read assets from {}", range))
    }

    fn locate(rows: &[Vec<String>], numero: u32) -> Option<Located> {
        rows.iter()
            .enumerate()
            .find(|(_, row)| is_live_asset_row(row) && parse_count(cell(row, 0)) == numero)
            .map(|(offset, row)| Located {
                row: ASSETS.row_at(offset),
                asset: asset_from_row(row),
            })
    }

    fn code_taken(rows: &[Vec<String>], code: &str, except: Option<u32>) -> bool {
        let code = code.trim().to_lowercase();
        rows.iter()
            .filter(|row| is_live_asset_row(row))
            .filter(|row| Some(parse_count(cell(row, 0))) != except)
            .any(|row| cell(row, 1).to_lowercase() == code)
    }

    async fn write_row(
        &self,
        range: CellRange,
        cells: Vec<String>,
    ) -> error_stack::Result<(), AssetRepositoryError> {
        self.sheets
            .write_range(&range, &[cells])
            .await
            .change_context(AssetRepositoryError::WriteError)
            .attach_printable_lazy(|| format!("Failed to write {}", range))
    }
}

#[async_trait::async_trait]
impl<S> AssetRepository for SpreadsheetAssetRepository<S>
where
    S: SpreadsheetRead + SpreadsheetWrite + Send + Sync,
{
    #[instrument(skip(self))]
    async fn list(&self) -> error_stack::Result<Vec<Asset>, AssetRepositoryError> {
        let rows = self.read_table().await?;
        Ok(rows
            .iter()
            .filter(|row| is_live_asset_row(row))
            .map(|row| asset_from_row(row))
            .collect())
    }

    #[instrument(skip(self))]
    async fn get(&self, numero: u32) -> error_stack::Result<Asset, AssetRepositoryError> {
        let rows = self.read_table().await?;
        Self::locate(&rows, numero)
            .map(|located| located.asset)
            .ok_or_else(|| report!(AssetRepositoryError::NotFound(numero)))
    }

    #[instrument(skip(self), fields(code = %asset.code))]
    async fn create(&self, asset: NewAsset) -> error_stack::Result<Asset, AssetRepositoryError> {
        let rows = self.read_table().await?;

        if Self::code_taken(&rows, &asset.code, None) {
            return Err(report!(AssetRepositoryError::DuplicateCode(asset.code)));
        }

        if let Some((offset, slot)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| is_vacant_asset_row(row))
        {
            let numero = parse_count(cell(slot, 0));
            let row = ASSETS.row_at(offset);
            event!(Level::INFO, numero, row = row.row(), "Reusing vacant asset row");
            self.write_row(
                ASSETS.data_range(&self.sheet_title, row),
                asset_data_cells(&asset),
            )
            .await?;
            return Ok(asset.with_numero(numero));
        }

        let numero = rows
            .iter()
            .filter(|row| !cell(row, 0).is_empty())
            .map(|row| parse_count(cell(row, 0)))
            .max()
            .unwrap_or(0)
            + 1;
        let row = ASSETS.row_at(rows.len());
        event!(Level::INFO, numero, row = row.row(), "Writing asset to a new row");

        let created = asset.with_numero(numero);
        self.write_row(
            ASSETS.row_range(&self.sheet_title, row),
            asset_to_row(&created),
        )
        .await?;
        Ok(created)
    }

    #[instrument(skip(self), fields(numero = asset.numero))]
    async fn update(&self, asset: &Asset) -> error_stack::Result<(), AssetRepositoryError> {
        let rows = self.read_table().await?;
        let located = Self::locate(&rows, asset.numero)
            .ok_or_else(|| report!(AssetRepositoryError::NotFound(asset.numero)))?;

        if Self::code_taken(&rows, &asset.code, Some(asset.numero)) {
            return Err(report!(AssetRepositoryError::DuplicateCode(
                asset.code.clone()
            )));
        }

        self.write_row(
            ASSETS.data_range(&self.sheet_title, located.row),
            asset_data_cells(&asset.details()),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, numero: u32) -> error_stack::Result<Asset, AssetRepositoryError> {
        let rows = self.read_table().await?;
        let located = Self::locate(&rows, numero)
            .ok_or_else(|| report!(AssetRepositoryError::NotFound(numero)))?;

        self.write_row(
            ASSETS.data_range(&self.sheet_title, located.row),
            blank_asset_data(),
        )
        .await?;
        event!(Level::INFO, numero, row = located.row.row(), "Asset row cleared");
        Ok(located.asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sheets::memory_spreadsheet::MemorySpreadsheet;
    use crate::domain::asset::AssetCondition;

    const SHEET: &str = "Activos";

    fn repository(
        sheet: MemorySpreadsheet,
    ) -> (
        Arc<MemorySpreadsheet>,
        SpreadsheetAssetRepository<MemorySpreadsheet>,
    ) {
        let sheet = Arc::new(sheet);
        (sheet.clone(), SpreadsheetAssetRepository::new(sheet, SHEET))
    }

    fn new_asset(code: &str, name: &str) -> NewAsset {
        NewAsset {
            code: code.into(),
            name: name.into(),
            quantity: 1,
            condition: AssetCondition::Nuevo,
            value: 100.0,
            ..Default::default()
        }
    }

    fn seeded() -> MemorySpreadsheet {
        MemorySpreadsheet::new().with_rows(
            SHEET,
            5,
            &[
                &["1", "PC-01", "Laptop", "Dell", "1", "Usado"],
                &["2"],
                &["3", "MS-03", "Mesa", "", "4", "Nuevo"],
            ],
        )
    }

    #[tokio::test]
    async fn test_list_skips_vacant_rows() {
        let (_, repo) = repository(seeded());
        let assets = repo.list().await.unwrap();
        assert_eq!(
            assets.iter().map(|a| a.numero).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[tokio::test]
    async fn test_get_missing_and_vacant() {
        let (_, repo) = repository(seeded());
        assert_eq!(repo.get(3).await.unwrap().name, "Mesa");

        let report = repo.get(2).await.unwrap_err();
        assert_eq!(report.current_context(), &AssetRepositoryError::NotFound(2));
        assert!(repo.get(42).await.is_err());
    }

    #[tokio::test]
    async fn test_create_reuses_vacant_slot() {
        let (sheet, repo) = repository(seeded());
        let created = repo.create(new_asset("SL-02", "Silla")).await.unwrap();

        assert_eq!(created.numero, 2);
        let row = sheet.row(SHEET, 6);
        assert_eq!(row[0], "2");
        assert_eq!(row[1], "SL-02");
        assert_eq!(row[5], "Nuevo");
        assert!(sheet.row(SHEET, 8).is_empty());
    }

    #[tokio::test]
    async fn test_create_appends_after_last_value_row() {
        let sheet = MemorySpreadsheet::new().with_rows(
            SHEET,
            5,
            &[&["1", "PC-01", "Laptop"], &["7", "MS-07", "Mesa"]],
        );
        let (sheet, repo) = repository(sheet);
        let created = repo.create(new_asset("SL-08", "Silla")).await.unwrap();

        assert_eq!(created.numero, 8);
        let row = sheet.row(SHEET, 7);
        assert_eq!(row[0], "8");
        assert_eq!(row[2], "Silla");
        assert_eq!(row[11], "100");
    }

    #[tokio::test]
    async fn test_create_in_empty_sheet_starts_at_one() {
        let (sheet, repo) = repository(MemorySpreadsheet::new());
        let created = repo.create(new_asset("PC-01", "Laptop")).await.unwrap();
        assert_eq!(created.numero, 1);
        assert_eq!(sheet.row(SHEET, 5)[1], "PC-01");
    }

    #[tokio::test]
    async fn test_create_tracks_raw_row_positions() {
        // A blank row between live rows must not shift the write position.
        let sheet = MemorySpreadsheet::new().with_rows(
            SHEET,
            5,
            &[&["1", "PC-01", "Laptop"], &[], &["3", "MS-03", "Mesa"], &["4"]],
        );
        let (sheet, repo) = repository(sheet);
        let created = repo.create(new_asset("SL-04", "Silla")).await.unwrap();

        assert_eq!(created.numero, 4);
        assert_eq!(sheet.row(SHEET, 8)[1], "SL-04");
        assert_eq!(sheet.row(SHEET, 7)[1], "MS-03");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_code() {
        let (_, repo) = repository(seeded());
        let report = repo.create(new_asset("pc-01", "Otra")).await.unwrap_err();
        assert_eq!(
            report.current_context(),
            &AssetRepositoryError::DuplicateCode("pc-01".into())
        );
    }

    #[tokio::test]
    async fn test_duplicate_code_ignores_non_ascii_case() {
        let sheet = MemorySpreadsheet::new().with_rows(
            SHEET,
            5,
            &[&["1", "SILLA-Ñ", "Silla"], &["2", "MESA-É", "Mesa"]],
        );
        let (_, repo) = repository(sheet);
        let report = repo.create(new_asset("silla-ñ", "Otra")).await.unwrap_err();
        assert_eq!(
            report.current_context(),
            &AssetRepositoryError::DuplicateCode("silla-ñ".into())
        );

        let mut asset = repo.get(2).await.unwrap();
        asset.code = "Silla-ñ".into();
        assert!(repo.update(&asset).await.is_err());
    }

    #[tokio::test]
    async fn test_update_writes_data_columns_only() {
        let (sheet, repo) = repository(seeded());
        let mut asset = repo.get(3).await.unwrap();
        asset.name = "Mesa grande".into();
        asset.quantity = 5;
        repo.update(&asset).await.unwrap();

        let row = sheet.row(SHEET, 7);
        assert_eq!(row[0], "3");
        assert_eq!(row[2], "Mesa grande");
        assert_eq!(row[4], "5");
    }

    #[tokio::test]
    async fn test_update_rejects_missing_vacant_and_clashing() {
        let (_, repo) = repository(seeded());

        let vacant = new_asset("X-02", "Nada").with_numero(2);
        let report = repo.update(&vacant).await.unwrap_err();
        assert_eq!(report.current_context(), &AssetRepositoryError::NotFound(2));

        let mut clash = repo.get(3).await.unwrap();
        clash.code = "PC-01".into();
        let report = repo.update(&clash).await.unwrap_err();
        assert_eq!(
            report.current_context(),
            &AssetRepositoryError::DuplicateCode("PC-01".into())
        );

        let mut same_code = repo.get(3).await.unwrap();
        same_code.notes = "ok".into();
        assert!(repo.update(&same_code).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_keeps_key_column() {
        let (sheet, repo) = repository(seeded());
        let deleted = repo.delete(1).await.unwrap();
        assert_eq!(deleted.code, "PC-01");
        assert_eq!(sheet.row(SHEET, 5), vec!["1".to_string()]);

        assert!(repo.get(1).await.is_err());
        let reused = repo.create(new_asset("PC-09", "Monitor")).await.unwrap();
        assert_eq!(reused.numero, 1);
    }

    #[tokio::test]
    async fn test_write_failure() {
        let (sheet, repo) = repository(seeded());
        sheet.fail_writes();
        let report = repo.delete(1).await.unwrap_err();
        assert_eq!(report.current_context(), &AssetRepositoryError::WriteError);
    }
}
