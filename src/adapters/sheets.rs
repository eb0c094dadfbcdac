pub mod cell_values;
#[cfg(test)]
pub mod memory_spreadsheet;
pub mod records;
pub mod spreadsheet_manager;
pub mod spreadsheet_read;
pub mod spreadsheet_write;
pub mod value_range_factory;
