use chrono::{Datelike, NaiveDate};

const SPANISH_MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Parses the `FechaIngreso` column. The sheet may hold ISO dates (optionally with a
/// time part) or the `DD/MM/YYYY` rendering the spreadsheet applies to entered dates.
pub fn parse_entry_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Some(iso) = value.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
            return Some(date);
        }
    }
    NaiveDate::parse_from_str(value, "%d/%m/%Y").ok()
}

/// `dd mmm` label in Spanish, e.g. `05 may`.
pub fn spanish_day_label(date: NaiveDate) -> String {
    format!(
        "{:02} {}",
        date.day(),
        SPANISH_MONTHS[date.month0() as usize]
    )
}
