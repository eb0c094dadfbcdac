pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

fn default_api_base() -> String {
    DEFAULT_SHEETS_API_BASE.to_owned()
}

fn default_assets_sheet() -> String {
    "Activos".to_owned()
}

fn default_users_sheet() -> String {
    "Usuarios".to_owned()
}

fn default_activity_sheet() -> String {
    "Registro".to_owned()
}

fn default_deleted_sheet() -> String {
    "Historial".to_owned()
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Box<str>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_assets_sheet")]
    pub assets_sheet: String,
    #[serde(default = "default_users_sheet")]
    pub users_sheet: String,
    #[serde(default = "default_activity_sheet")]
    pub activity_sheet: String,
    #[serde(default = "default_deleted_sheet")]
    pub deleted_sheet: String,
}
