//! In-memory stand-in for the values API, used by repository tests.

use std::{collections::HashMap, sync::Mutex};

use error_stack::report;

use crate::domain::sheets::{cell_range::CellRange, column::Column, row::Row};

use super::{
    spreadsheet_manager::SpreadsheetManagerError, spreadsheet_read::SpreadsheetRead,
    spreadsheet_write::SpreadsheetWrite,
};

#[derive(Debug, Default)]
pub struct MemorySpreadsheet {
    sheets: Mutex<HashMap<String, Vec<Vec<String>>>>,
    fail_writes: Mutex<bool>,
}

impl MemorySpreadsheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `sheet` with `rows` starting at `A{first_row}`.
    pub fn with_rows(self, sheet: &str, first_row: u32, rows: &[&[&str]]) -> Self {
        {
            let mut sheets = self.sheets.lock().unwrap();
            let grid = sheets.entry(sheet.to_owned()).or_default();
            for (offset, row) in rows.iter().enumerate() {
                let index = (first_row - 1) as usize + offset;
                if grid.len() <= index {
                    grid.resize(index + 1, Vec::new());
                }
                grid[index] = row.iter().map(|cell| cell.to_string()).collect();
            }
        }
        self
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    /// Full sheet row (1-based), trailing blanks trimmed.
    pub fn row(&self, sheet: &str, row: u32) -> Vec<String> {
        let sheets = self.sheets.lock().unwrap();
        let mut cells = sheets
            .get(sheet)
            .and_then(|grid| grid.get((row - 1) as usize))
            .cloned()
            .unwrap_or_default();
        trim_trailing_blanks(&mut cells);
        cells
    }

    fn sheet_title(range: &CellRange) -> String {
        range.sheet_title.clone().unwrap_or_default()
    }

    fn check_writable(&self) -> error_stack::Result<(), SpreadsheetManagerError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(report!(SpreadsheetManagerError::FailedToWriteRange));
        }
        Ok(())
    }

    fn write_cells(grid: &mut Vec<Vec<String>>, start_row: Row, start_col: Column, rows: &[Vec<String>]) {
        for (offset, values) in rows.iter().enumerate() {
            let index = start_row.offset_by(offset).index() as usize;
            if grid.len() <= index {
                grid.resize(index + 1, Vec::new());
            }
            let cells = &mut grid[index];
            for (col_offset, value) in values.iter().enumerate() {
                let col = start_col.offset() + col_offset;
                if cells.len() <= col {
                    cells.resize(col + 1, String::new());
                }
                cells[col] = value.clone();
            }
        }
    }
}

fn trim_trailing_blanks(cells: &mut Vec<String>) {
    while cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
}

impl SpreadsheetRead for MemorySpreadsheet {
    async fn read_range(
        &self,
        range: &CellRange,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError> {
        let sheets = self.sheets.lock().unwrap();
        let Some(grid) = sheets.get(&Self::sheet_title(range)) else {
            return Ok(Vec::new());
        };

        let first = range.start.row.index() as usize;
        let last = range
            .end_row
            .map(|row| row.index() as usize + 1)
            .unwrap_or(grid.len())
            .min(grid.len());
        let columns = range.start.col.offset()..=range.end_col.offset();

        let mut rows = (first..last)
            .map(|index| {
                let mut cells = columns
                    .clone()
                    .map(|col| grid[index].get(col).cloned().unwrap_or_default())
                    .collect::<Vec<_>>();
                trim_trailing_blanks(&mut cells);
                cells
            })
            .collect::<Vec<_>>();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        Ok(rows)
    }
}

impl SpreadsheetWrite for MemorySpreadsheet {
    async fn write_range(
        &self,
        range: &CellRange,
        rows: &[Vec<String>],
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.check_writable()?;
        let mut sheets = self.sheets.lock().unwrap();
        let grid = sheets.entry(Self::sheet_title(range)).or_default();
        Self::write_cells(grid, range.start.row, range.start.col, rows);
        Ok(())
    }

    async fn append_rows(
        &self,
        range: &CellRange,
        rows: &[Vec<String>],
    ) -> error_stack::Result<Option<CellRange>, SpreadsheetManagerError> {
        self.check_writable()?;
        let mut sheets = self.sheets.lock().unwrap();
        let grid = sheets.entry(Self::sheet_title(range)).or_default();

        let columns = range.start.col.offset()..=range.end_col.offset();
        let last_used = grid
            .iter()
            .enumerate()
            .skip(range.start.row.index() as usize)
            .filter(|(_, cells)| {
                columns
                    .clone()
                    .any(|col| cells.get(col).is_some_and(|cell| !cell.is_empty()))
            })
            .map(|(index, _)| index + 1)
            .last()
            .unwrap_or(range.start.row.index() as usize);

        let start = Row::from_index(last_used as u32);
        Self::write_cells(grid, start, range.start.col, rows);
        Ok(Some(CellRange {
            end_row: Some(start.offset_by(rows.len().saturating_sub(1))),
            ..CellRange::single_row(
                &Self::sheet_title(range),
                range.start.col,
                range.end_col,
                start,
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheets::ranges::{ACTIVITY, ASSETS};

    #[tokio::test]
    async fn test_read_trims_like_the_api() {
        let sheet = MemorySpreadsheet::new().with_rows(
            "Activos",
            5,
            &[&["1", "A-01", ""], &[], &["3"], &[]],
        );
        let rows = sheet.read_range(&ASSETS.table_range("Activos")).await.unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["1".to_string(), "A-01".to_string()],
                vec![],
                vec!["3".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn test_append_after_last_used_row() {
        let sheet = MemorySpreadsheet::new().with_rows("Registro", 2, &[&["1"], &["2"]]);
        let written = sheet
            .append_rows(&ACTIVITY.table_range("Registro"), &[vec!["3".to_string()]])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(written.start.row.row(), 4);
        assert_eq!(sheet.row("Registro", 4), vec!["3".to_string()]);
    }
}
