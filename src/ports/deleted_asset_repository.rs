use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::asset::{Asset, DeletedAsset};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeletedAssetRepositoryError {
    #[error("Failed to fetch deleted assets")]
    FetchError,
    #[error("Failed to archive deleted asset")]
    ArchiveError,
}

#[async_trait::async_trait]
pub trait DeletedAssetRepository: Send + Sync {
    async fn archive(
        &self,
        asset: &Asset,
        at: NaiveDateTime,
    ) -> error_stack::Result<DeletedAsset, DeletedAssetRepositoryError>;

    /// Most recently deleted first.
    async fn list(&self) -> error_stack::Result<Vec<DeletedAsset>, DeletedAssetRepositoryError>;
}
