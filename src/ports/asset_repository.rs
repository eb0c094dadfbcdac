use thiserror::Error;

use crate::domain::asset::{Asset, NewAsset};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetRepositoryError {
    #[error("Failed to fetch assets from repository")]
    FetchAssetsError,
    #[error("Asset {0} not found")]
    NotFound(u32),
    #[error("Asset code {0} is already in use")]
    DuplicateCode(String),
    #[error("Failed to write asset to repository")]
    WriteError,
}

#[async_trait::async_trait]
pub trait AssetRepository: Send + Sync {
    /// Live assets in storage order.
    async fn list(&self) -> error_stack::Result<Vec<Asset>, AssetRepositoryError>;

    async fn get(&self, numero: u32) -> error_stack::Result<Asset, AssetRepositoryError>;

    /// Stores a new asset. Slots left by deleted assets are reused before the table
    /// grows, and the reused slot keeps its `numero`.
    async fn create(&self, asset: NewAsset) -> error_stack::Result<Asset, AssetRepositoryError>;

    async fn update(&self, asset: &Asset) -> error_stack::Result<(), AssetRepositoryError>;

    /// Soft delete: the asset data is cleared but its `numero` stays reserved
    /// for the next [`AssetRepository::create`].
    async fn delete(&self, numero: u32) -> error_stack::Result<Asset, AssetRepositoryError>;
}
