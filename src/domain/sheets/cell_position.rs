use error_stack::{report, ResultExt};

use super::{
    a1_notation::{
        generic_a1_notation_split, sheet_prefix, split_cell_reference, A1Notation,
        A1NotationParseError, FromA1Notation, ToA1Notation,
    },
    column::{parse_col, Column},
    row::Row,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub col: Column,
    pub row: Row,
}

impl CellPosition {
    pub fn new(col: Column, row: Row) -> Self {
        Self { col, row }
    }
}

impl std::ops::Add<Row> for CellPosition {
    type Output = CellPosition;

    fn add(self, rhs: Row) -> Self::Output {
        CellPosition {
            col: self.col,
            row: self.row + rhs,
        }
    }
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        A1Notation(format!("{}{}{}", sheet_prefix(sheet_name), self.col, self.row))
    }
}

/// Parses a single `B7` reference (the row part is mandatory).
pub fn parse_cell_reference(
    reference: &str,
) -> error_stack::Result<CellPosition, A1NotationParseError> {
    let (col, row) = split_cell_reference(reference);
    if row.is_empty() {
        return Err(report!(A1NotationParseError::RowParseError))
            .attach_printable_lazy(|| format!("Cell reference '{}' has no row", reference));
    }
    Ok(CellPosition {
        col: parse_col(col)
            .change_context(A1NotationParseError::ColumnParseError)
            .attach_printable_lazy(|| format!("Invalid column in '{}'", reference))?,
        row: row
            .parse::<Row>()
            .change_context(A1NotationParseError::RowParseError)
            .attach_printable_lazy(|| format!("Invalid row in '{}'", reference))?,
    })
}

impl FromA1Notation for CellPosition {
    type Err = A1NotationParseError;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err> {
        let parts = generic_a1_notation_split(a1_notation);
        if parts.start.is_empty() {
            return Err(report!(A1NotationParseError::MissingCell));
        }
        parse_cell_reference(&parts.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_a1_notation() {
        let pos = CellPosition::new(Column::from_offset(1), Row::from_row(7));
        assert_eq!(pos.to_a1_notation(None).as_ref(), "B7");
        assert_eq!(pos.to_a1_notation(Some("Activos")).as_ref(), "'Activos'!B7");
    }

    #[test]
    fn test_from_a1_notation() {
        let pos = CellPosition::from_a1_notation(&"'Activos'!AB12".into()).unwrap();
        assert_eq!(pos.col.to_string(), "AB");
        assert_eq!(pos.row, Row::from_row(12));
    }

    #[test]
    fn test_from_a1_notation_requires_row() {
        assert!(CellPosition::from_a1_notation(&"M".into()).is_err());
    }

    #[test]
    fn test_add_row() {
        let pos = CellPosition::new(Column::A, Row::from_row(5)) + Row::from_index(2);
        assert_eq!(pos.row, Row::from_row(7));
    }
}
