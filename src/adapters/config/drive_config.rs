pub const DEFAULT_DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const DEFAULT_DRIVE_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";
pub const DEFAULT_PUBLIC_BASE: &str = "https://lh3.googleusercontent.com/d/";

fn default_api_base() -> String {
    DEFAULT_DRIVE_API_BASE.to_owned()
}

fn default_upload_base() -> String {
    DEFAULT_DRIVE_UPLOAD_BASE.to_owned()
}

fn default_public_base() -> String {
    DEFAULT_PUBLIC_BASE.to_owned()
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct DriveConfig {
    /// Folder that receives uploaded asset images.
    pub folder_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_upload_base")]
    pub upload_base: String,
    #[serde(default = "default_public_base")]
    pub public_base: String,
}
