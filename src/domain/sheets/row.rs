use std::{fmt::Formatter, num::ParseIntError, str::FromStr};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

impl Row {
    pub fn from_index(index: u32) -> Self {
        Row { index }
    }

    pub fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1), // Convert to zero-based index
        }
    }

    pub fn from_row_str(row: &str) -> Result<Self, ParseIntError> {
        let row = row.parse::<u32>()?;
        Ok(Row::from_row(row))
    }

    /// Returns the row number as a 1-based index, the way the spreadsheet shows it.
    /// # Examples
    /// ```
    /// use sheets_inventory::domain::sheets::row::Row;
    /// let row = Row::from_index(0);
    /// assert_eq!(row.row(), 1);
    /// let row = Row::from_index(4);
    /// assert_eq!(row.row(), 5);
    /// ```
    pub fn row(&self) -> u32 {
        self.index.saturating_add(1)
    }

    /// Returns the row index as a zero-based index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The row `offset` rows below this one.
    pub fn offset_by(&self, offset: usize) -> Row {
        Row::from_index(self.index.saturating_add(offset as u32))
    }
}

impl std::ops::Add for Row {
    type Output = Row;

    fn add(self, rhs: Row) -> Self::Output {
        Row::from_index(self.index.saturating_add(rhs.index))
    }
}

impl std::ops::Sub for Row {
    type Output = Row;

    fn sub(self, rhs: Row) -> Self::Output {
        Row::from_index(self.index.saturating_sub(rhs.index))
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.row())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.row())
    }
}

impl FromStr for Row {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Row::from_row_str(s)
    }
}
