use std::sync::Arc;

use error_stack::{report, Report, ResultExt};
use thiserror::Error;
use tracing::{event, instrument, Level};

use crate::domain::{
    activity::ActivityAction,
    asset::{Asset, NewAsset},
    user::User,
};
use crate::ports::{
    asset_repository::{AssetRepository, AssetRepositoryError},
    deleted_asset_repository::DeletedAssetRepository,
    image_store::{ImageStore, ImageUpload},
};

use super::activity_recorder::ActivityRecorder;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryServiceError {
    #[error("{0} is not allowed to {1}")]
    PermissionDenied(String, &'static str),
    #[error("Invalid asset: {0}")]
    InvalidAsset(&'static str),
    #[error("Asset {0} not found")]
    NotFound(u32),
    #[error("Asset code {0} is already in use")]
    DuplicateCode(String),
    #[error("Asset storage failed")]
    RepositoryError,
    #[error("Failed to archive deleted asset")]
    ArchiveError,
    #[error("Image storage failed")]
    ImageError,
}

fn from_repository(report: Report<AssetRepositoryError>) -> Report<InventoryServiceError> {
    let context = match report.current_context() {
        AssetRepositoryError::NotFound(numero) => InventoryServiceError::NotFound(*numero),
        AssetRepositoryError::DuplicateCode(code) => {
            InventoryServiceError::DuplicateCode(code.clone())
        }
        _ => InventoryServiceError::RepositoryError,
    };
    report.change_context(context)
}

fn validate(asset: &NewAsset) -> error_stack::Result<(), InventoryServiceError> {
    if asset.code.trim().is_empty() {
        return Err(report!(InventoryServiceError::InvalidAsset("code is required")));
    }
    if asset.name.trim().is_empty() {
        return Err(report!(InventoryServiceError::InvalidAsset("name is required")));
    }
    if !asset.value.is_finite() || asset.value < 0.0 {
        return Err(report!(InventoryServiceError::InvalidAsset(
            "value must be a non-negative number"
        )));
    }
    Ok(())
}

fn require(
    allowed: bool,
    actor: &User,
    action: &'static str,
) -> error_stack::Result<(), InventoryServiceError> {
    if allowed {
        Ok(())
    } else {
        Err(report!(InventoryServiceError::PermissionDenied(
            actor.role.to_string(),
            action
        )))
    }
}

pub struct InventoryService {
    assets: Arc<dyn AssetRepository>,
    deleted: Arc<dyn DeletedAssetRepository>,
    images: Arc<dyn ImageStore>,
    recorder: ActivityRecorder,
}

impl InventoryService {
    pub fn new(
        assets: Arc<dyn AssetRepository>,
        deleted: Arc<dyn DeletedAssetRepository>,
        images: Arc<dyn ImageStore>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            assets,
            deleted,
            images,
            recorder,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_assets(&self) -> error_stack::Result<Vec<Asset>, InventoryServiceError> {
        self.assets.list().await.map_err(from_repository)
    }

    #[instrument(skip(self))]
    pub async fn get_asset(&self, numero: u32) -> error_stack::Result<Asset, InventoryServiceError> {
        self.assets.get(numero).await.map_err(from_repository)
    }

    #[instrument(skip(self, asset), fields(actor = %actor.email, code = %asset.code))]
    pub async fn create_asset(
        &self,
        actor: &User,
        mut asset: NewAsset,
    ) -> error_stack::Result<Asset, InventoryServiceError> {
        require(actor.role.can_edit_assets(), actor, "create assets")?;
        asset.code = asset.code.trim().to_owned();
        validate(&asset)?;

        let created = self.assets.create(asset).await.map_err(from_repository)?;
        self.recorder
            .record(
                actor,
                ActivityAction::Create,
                format!("Activo creado: {} - {}", created.code, created.name),
            )
            .await;
        Ok(created)
    }

    #[instrument(skip(self, asset), fields(actor = %actor.email, numero = asset.numero))]
    pub async fn update_asset(
        &self,
        actor: &User,
        mut asset: Asset,
    ) -> error_stack::Result<Asset, InventoryServiceError> {
        require(actor.role.can_edit_assets(), actor, "edit assets")?;
        asset.code = asset.code.trim().to_owned();
        validate(&asset.details())?;

        self.assets.update(&asset).await.map_err(from_repository)?;
        self.recorder
            .record(
                actor,
                ActivityAction::Edit,
                format!("Activo editado: {} - {}", asset.code, asset.name),
            )
            .await;
        Ok(asset)
    }

    /// Archives the asset to the deleted history, then clears its row.
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn delete_asset(
        &self,
        actor: &User,
        numero: u32,
    ) -> error_stack::Result<Asset, InventoryServiceError> {
        require(actor.role.can_delete_assets(), actor, "delete assets")?;

        let asset = self.assets.get(numero).await.map_err(from_repository)?;
        self.deleted
            .archive(&asset, self.recorder.now())
            .await
            .change_context(InventoryServiceError::ArchiveError)?;
        let removed = self.assets.delete(numero).await.map_err(from_repository)?;

        self.recorder
            .record(
                actor,
                ActivityAction::Delete,
                format!("Activo eliminado: {} - {}", removed.code, removed.name),
            )
            .await;
        Ok(removed)
    }

    /// Uploads a new image for the asset and points its `image_url` at it. The
    /// previous image is removed from the store on a best-effort basis.
    #[instrument(skip(self, image), fields(actor = %actor.email, file = %image.file_name))]
    pub async fn attach_image(
        &self,
        actor: &User,
        numero: u32,
        image: ImageUpload,
    ) -> error_stack::Result<Asset, InventoryServiceError> {
        require(actor.role.can_edit_assets(), actor, "edit assets")?;

        let mut asset = self.assets.get(numero).await.map_err(from_repository)?;
        let url = self
            .images
            .upload(image)
            .await
            .change_context(InventoryServiceError::ImageError)?;

        let previous = std::mem::replace(&mut asset.image_url, url);
        if let Err(report) = self.assets.update(&asset).await {
            // Nothing points at the new upload yet.
            if let Err(cleanup) = self.images.delete(&asset.image_url).await {
                event!(Level::WARN, uploaded = %asset.image_url, error = ?cleanup, "Could not remove orphaned image");
            }
            return Err(from_repository(report));
        }

        if !previous.is_empty() && previous != asset.image_url {
            if let Err(report) = self.images.delete(&previous).await {
                event!(Level::WARN, previous = %previous, error = ?report, "Could not remove previous image");
            }
        }

        self.recorder
            .record(
                actor,
                ActivityAction::Edit,
                format!("Activo editado: {} - {}", asset.code, asset.name),
            )
            .await;
        Ok(asset)
    }

    /// Removes a stored image that no asset needs anymore.
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn delete_image(
        &self,
        actor: &User,
        url: &str,
    ) -> error_stack::Result<(), InventoryServiceError> {
        require(actor.role.can_edit_assets(), actor, "delete images")?;
        self.images
            .delete(url)
            .await
            .change_context(InventoryServiceError::ImageError)
    }
}
