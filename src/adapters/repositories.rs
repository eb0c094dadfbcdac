pub mod spreadsheet_activity_log_repository;
pub mod spreadsheet_asset_repository;
pub mod spreadsheet_deleted_asset_repository;
pub mod spreadsheet_user_repository;
