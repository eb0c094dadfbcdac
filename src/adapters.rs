pub mod auth;
pub mod config;
pub mod drive;
pub mod http_client;
pub mod repositories;
pub mod sheets;
