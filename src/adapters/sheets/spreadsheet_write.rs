use google_sheets4::api::ValueRange;
use tracing::{event, instrument, Level};

use crate::domain::sheets::{
    a1_notation::{A1Notation, FromA1Notation, ToA1Notation},
    cell_range::CellRange,
};

use super::{
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    value_range_factory::ValueRangeFactory,
};

pub trait SpreadsheetWrite {
    /// Overwrites `range` with `rows`, starting at its top-left cell.
    fn write_range(
        &self,
        range: &CellRange,
        rows: &[Vec<String>],
    ) -> impl std::future::Future<Output = error_stack::Result<(), SpreadsheetManagerError>> + Send;

    /// Inserts `rows` after the last row of the table found in `range` and
    /// returns the range that was written, when the API reports it.
    fn append_rows(
        &self,
        range: &CellRange,
        rows: &[Vec<String>],
    ) -> impl std::future::Future<
        Output = error_stack::Result<Option<CellRange>, SpreadsheetManagerError>,
    > + Send;
}

impl SpreadsheetWrite for SpreadsheetManager {
    #[instrument(skip(rows), fields(range = %range, rows = rows.len()))]
    async fn write_range(
        &self,
        range: &CellRange,
        rows: &[Vec<String>],
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.update_values(&range.to_a1_notation(None), ValueRange::from_rows(rows))
            .await?;
        Ok(())
    }

    #[instrument(skip(rows), fields(range = %range, rows = rows.len()))]
    async fn append_rows(
        &self,
        range: &CellRange,
        rows: &[Vec<String>],
    ) -> error_stack::Result<Option<CellRange>, SpreadsheetManagerError> {
        let response = self
            .append_values(&range.to_a1_notation(None), ValueRange::from_rows(rows))
            .await?;

        let updated = response
            .updates
            .and_then(|updates| updates.updated_range)
            .and_then(|updated| match CellRange::from_a1_notation(&A1Notation(updated)) {
                Ok(range) => Some(range),
                Err(report) => {
                    event!(Level::WARN, error = ?report, "Unreadable updated range in append response");
                    None
                }
            });
        event!(Level::DEBUG, updated = ?updated.as_ref().map(ToString::to_string), "Rows appended");
        Ok(updated)
    }
}
