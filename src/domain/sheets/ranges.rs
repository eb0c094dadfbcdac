//! Table layouts of the inventory spreadsheet. Each table has a fixed first data
//! row and a fixed column span; the sheet title comes from configuration.

use super::{
    cell_range::CellRange,
    column::Column,
    row::Row,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub first_data_row: u32,
    /// Number of columns, starting at `A`.
    pub width: u32,
}

impl TableLayout {
    pub fn first_row(&self) -> Row {
        Row::from_row(self.first_data_row)
    }

    pub fn last_column(&self) -> Column {
        Column::from_offset(self.width.saturating_sub(1) as usize)
    }

    /// Whole table, e.g. `'Activos'!A5:M`.
    pub fn table_range(&self, sheet_title: &str) -> CellRange {
        CellRange::open(sheet_title, Column::A, self.last_column(), self.first_row())
    }

    /// Sheet row of the `offset`-th row returned when reading [`Self::table_range`].
    pub fn row_at(&self, offset: usize) -> Row {
        self.first_row().offset_by(offset)
    }

    /// One full row of the table.
    pub fn row_range(&self, sheet_title: &str, row: Row) -> CellRange {
        CellRange::single_row(sheet_title, Column::A, self.last_column(), row)
    }

    /// One row without the key column (`B..`), used for soft deletes and row reuse.
    pub fn data_range(&self, sheet_title: &str, row: Row) -> CellRange {
        CellRange::single_row(sheet_title, Column::from_offset(1), self.last_column(), row)
    }
}

/// `Activos`: headers on row 4, data from row 5, columns A..M.
pub const ASSETS: TableLayout = TableLayout {
    first_data_row: 5,
    width: 13,
};

/// `Usuarios`: Correo, Pin, Nombre, Rol.
pub const USERS: TableLayout = TableLayout {
    first_data_row: 2,
    width: 4,
};

/// `Registro`: Numero, Fecha, Hora, Usuario, Accion, Detalle.
pub const ACTIVITY: TableLayout = TableLayout {
    first_data_row: 2,
    width: 6,
};

/// `Historial`: the asset columns plus FechaEliminacion.
pub const DELETED: TableLayout = TableLayout {
    first_data_row: 2,
    width: 14,
};
