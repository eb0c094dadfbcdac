use secrecy::SecretString;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid service account key")]
    InvalidKey,
    #[error("Failed to sign token assertion")]
    SigningFailed,
    #[error("Token exchange request failed")]
    ExchangeFailed,
    #[error("Token endpoint rejected the assertion: {0}")]
    Rejected(String),
    #[error("Malformed token response")]
    MalformedResponse,
}

/// Source of OAuth2 bearer tokens for the Google APIs.
#[async_trait::async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Returns a token that stays valid for at least the refresh margin.
    async fn access_token(&self) -> error_stack::Result<SecretString, TokenError>;
}
