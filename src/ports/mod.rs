pub mod access_token_provider;
pub mod activity_log_repository;
pub mod application_service;
pub mod asset_repository;
pub mod command_handler;
pub mod deleted_asset_repository;
pub mod image_store;
pub mod user_repository;
