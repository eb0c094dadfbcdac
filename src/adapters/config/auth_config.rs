use secrecy::SecretString;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_owned()
}

fn default_scopes() -> Vec<String> {
    vec![SPREADSHEETS_SCOPE.to_owned(), DRIVE_FILE_SCOPE.to_owned()]
}

/// Service account credentials: either a downloaded JSON key file, or the
/// email and PEM key given inline.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct AuthConfig {
    pub key_file: Option<Box<str>>,
    pub client_email: Option<String>,
    pub private_key: Option<SecretString>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}
