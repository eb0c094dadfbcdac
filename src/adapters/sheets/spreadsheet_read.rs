use tracing::instrument;

use crate::domain::sheets::{a1_notation::ToA1Notation, cell_range::CellRange};

use super::{
    cell_values::StringGrid,
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
};

pub trait SpreadsheetRead {
    /// Rows of `range` as strings. Trailing empty cells and rows are not
    /// returned, so rows may be shorter than the range is wide.
    fn read_range(
        &self,
        range: &CellRange,
    ) -> impl std::future::Future<
        Output = error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError>,
    > + Send;
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument(fields(range = %range))]
    async fn read_range(
        &self,
        range: &CellRange,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError> {
        let value_range = self.get_values(&range.to_a1_notation(None)).await?;
        Ok(value_range.values.into_string_grid())
    }
}
