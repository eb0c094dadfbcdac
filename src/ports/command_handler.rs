use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
    #[error("Command execution failed: {details}")]
    ExecutionFailed { details: String },
}

impl CommandError {
    pub fn invalid<S: Into<String>>(details: S) -> Self {
        CommandError::InvalidCommand {
            details: details.into(),
        }
    }

    pub fn failed<S: Into<String>>(details: S) -> Self {
        CommandError::ExecutionFailed {
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login,
    Dashboard,
    FilterOptions,
    ListAssets,
    ShowAsset { numero: u32 },
    AddAsset { payload: PathBuf },
    UpdateAsset { numero: u32, payload: PathBuf },
    DeleteAsset { numero: u32 },
    AttachImage { numero: u32, image: PathBuf },
    ListUsers,
    UpdateUser { id: u32, payload: PathBuf },
    ActivityLog { action: Option<String> },
    DeletedAssets,
    DeleteImage { url: String },
    ThumbnailUrl { url: String, size: u32 },
    DirectUrl { url: String },
    HealthCheck,
}

#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(
        &self,
        command: Command,
        format: OutputFormat,
    ) -> error_stack::Result<String, CommandError>;
}
