pub mod app_config;
pub mod auth_config;
pub mod drive_config;
pub mod http_config;
pub mod sheets_config;
