pub mod activity_recorder;
pub mod auth_service;
pub mod history_service;
pub mod inventory_service;
pub mod reporting_service;
pub mod service;
#[cfg(test)]
pub mod test_support;
pub mod user_service;
