use error_stack::{report, ResultExt};

use super::{
    a1_notation::{
        generic_a1_notation_split, sheet_prefix, split_cell_reference, A1Notation,
        A1NotationParseError, FromA1Notation, ToA1Notation,
    },
    cell_position::{parse_cell_reference, CellPosition},
    column::{parse_col, Column},
    row::Row,
};

/// A rectangular range. `end_row == None` means the range is open at the bottom
/// (`Activos!A5:M`), which is how whole tables are addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPosition,
    pub end_col: Column,
    pub end_row: Option<Row>,
    pub sheet_title: Option<String>,
}

impl CellRange {
    /// Every row from `start_row` down, between the two columns.
    pub fn open(sheet_title: &str, start_col: Column, end_col: Column, start_row: Row) -> Self {
        Self {
            start: CellPosition::new(start_col, start_row),
            end_col,
            end_row: None,
            sheet_title: Some(sheet_title.to_owned()),
        }
    }

    /// A single row between the two columns.
    pub fn single_row(sheet_title: &str, start_col: Column, end_col: Column, row: Row) -> Self {
        Self {
            start: CellPosition::new(start_col, row),
            end_col,
            end_row: Some(row),
            sheet_title: Some(sheet_title.to_owned()),
        }
    }

    pub fn row_count(&self) -> Option<u32> {
        self.end_row
            .map(|end| end.index().saturating_sub(self.start.row.index()) + 1)
    }

    pub fn column_count(&self) -> u32 {
        self.end_col.value().saturating_sub(self.start.col.value()) + 1
    }

    pub fn with_sheet_title(&self, sheet_title: String) -> Self {
        Self {
            sheet_title: Some(sheet_title),
            ..self.clone()
        }
    }

    pub fn contains_row(&self, row: Row) -> bool {
        row >= self.start.row && self.end_row.map_or(true, |end| row <= end)
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let sheet_name = sheet_name.or(self.sheet_title.as_deref());
        let end_row = self.end_row.map(|row| row.to_string()).unwrap_or_default();
        A1Notation(format!(
            "{}{}{}:{}{}",
            sheet_prefix(sheet_name),
            self.start.col,
            self.start.row,
            self.end_col,
            end_row
        ))
    }
}

impl std::fmt::Display for CellRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_a1_notation(None))
    }
}

impl FromA1Notation for CellRange {
    type Err = A1NotationParseError;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err> {
        let parts = generic_a1_notation_split(a1_notation);
        if parts.start.is_empty() {
            return Err(report!(A1NotationParseError::MissingCell))
                .attach_printable_lazy(|| format!("Empty range '{}'", a1_notation));
        }

        let start = parse_cell_reference(&parts.start)?;

        let (end_col, end_row) = split_cell_reference(&parts.end);
        let end_col = parse_col(end_col)
            .change_context(A1NotationParseError::ColumnParseError)
            .attach_printable_lazy(|| format!("Invalid end column in '{}'", a1_notation))?;
        let end_row = match end_row {
            "" => None,
            row => Some(
                row.parse::<Row>()
                    .change_context(A1NotationParseError::RowParseError)
                    .attach_printable_lazy(|| format!("Invalid end row in '{}'", a1_notation))?,
            ),
        };

        Ok(CellRange {
            start,
            end_col,
            end_row,
            sheet_title: parts.sheet_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(letters: &str) -> Column {
        parse_col(letters).unwrap()
    }

    #[test]
    fn test_open_range_to_a1() {
        let range = CellRange::open("Activos", Column::A, col("M"), Row::from_row(5));
        assert_eq!(range.to_a1_notation(None).as_ref(), "'Activos'!A5:M");
        assert_eq!(range.row_count(), None);
        assert_eq!(range.column_count(), 13);
    }

    #[test]
    fn test_single_row_to_a1() {
        let range = CellRange::single_row("Activos", col("B"), col("M"), Row::from_row(9));
        assert_eq!(range.to_a1_notation(None).as_ref(), "'Activos'!B9:M9");
        assert_eq!(range.row_count(), Some(1));
        assert_eq!(range.column_count(), 12);
    }

    #[test]
    fn test_parse_open_range() {
        let range = CellRange::from_a1_notation(&"'Usuarios'!A2:D".into()).unwrap();
        assert_eq!(range.sheet_title.as_deref(), Some("Usuarios"));
        assert_eq!(range.start, CellPosition::new(Column::A, Row::from_row(2)));
        assert_eq!(range.end_col, col("D"));
        assert_eq!(range.end_row, None);
    }

    #[test]
    fn test_parse_closed_range_round_trips() {
        let range = CellRange::single_row("Historial", Column::A, col("N"), Row::from_row(4));
        let parsed = CellRange::from_a1_notation(&range.to_a1_notation(None)).unwrap();
        assert_eq!(parsed, range);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(CellRange::from_a1_notation(&"Activos!5A:M".into()).is_err());
        assert!(CellRange::from_a1_notation(&"Activos!".into()).is_err());
    }

    #[test]
    fn test_contains_row() {
        let range = CellRange::open("Activos", Column::A, col("M"), Row::from_row(5));
        assert!(!range.contains_row(Row::from_row(4)));
        assert!(range.contains_row(Row::from_row(500)));
    }
}
