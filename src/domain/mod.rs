pub mod activity;
pub mod asset;
pub mod dates;
pub mod reporting;
pub mod sheets;
pub mod user;

// Re-export commonly used types
pub use activity::*;
pub use asset::*;
pub use user::*;
