pub mod drive_manager;
pub mod file_url;
pub mod mime;
pub mod multipart;
