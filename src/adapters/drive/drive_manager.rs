use std::{fmt::Debug, sync::Arc};

use chrono::{DateTime, Utc};
use error_stack::{report, ResultExt};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{event, instrument, Level};

use crate::adapters::config::drive_config::DriveConfig;
use crate::adapters::http_client::error_body;
use crate::ports::access_token_provider::AccessTokenProvider;
use crate::ports::image_store::{ImageStore, ImageStoreError, ImageUpload};

use super::{
    file_url::file_id,
    multipart::{FileMetadata, MultipartRelated},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriveError {
    #[error("Failed to obtain an access token")]
    Unauthorized,
    #[error("Failed to upload file")]
    UploadFailed,
    #[error("Failed to share file")]
    PermissionFailed,
    #[error("Failed to delete file")]
    DeleteFailed,
    #[error("Unexpected response from Drive")]
    MalformedResponse,
    #[error("Drive API returned status {0}")]
    HttpStatus(StatusCode),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    #[serde(default)]
    pub web_view_link: Option<String>,
    #[serde(default)]
    pub web_content_link: Option<String>,
}

/// `asset_<millis>_<name>`, the name given to uploads without an explicit one.
pub fn default_upload_name(original_name: &str, now: DateTime<Utc>) -> String {
    format!("asset_{}_{}", now.timestamp_millis(), original_name)
}

/// Files API client scoped to the asset image folder.
pub struct DriveManager {
    pub config: DriveConfig,
    client: Client,
    auth: Arc<dyn AccessTokenProvider>,
}

impl Debug for DriveManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DriveManager {{ config: {:?} }}", self.config)
    }
}

impl DriveManager {
    pub fn new(config: DriveConfig, client: Client, auth: Arc<dyn AccessTokenProvider>) -> Self {
        DriveManager {
            config,
            client,
            auth,
        }
    }

    pub fn upload_url(&self) -> String {
        format!(
            "{}/files?uploadType=multipart&fields=id,webViewLink,webContentLink",
            self.config.upload_base.trim_end_matches('/')
        )
    }

    pub fn file_url(&self, file_id: &str) -> String {
        format!(
            "{}/files/{}",
            self.config.api_base.trim_end_matches('/'),
            file_id
        )
    }

    async fn token(&self) -> error_stack::Result<SecretString, DriveError> {
        self.auth
            .access_token()
            .await
            .change_context(DriveError::Unauthorized)
    }

    /// Uploads an image into the configured folder, shares it with anyone holding
    /// the link and returns its public URL.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_image(
        &self,
        bytes: &[u8],
        original_name: &str,
        mime_type: &str,
        file_name: Option<String>,
    ) -> error_stack::Result<String, DriveError> {
        let name = file_name.unwrap_or_else(|| default_upload_name(original_name, Utc::now()));
        let metadata = FileMetadata {
            name: name.clone(),
            parents: vec![self.config.folder_id.clone()],
        };
        let multipart = MultipartRelated::new(&metadata, mime_type, bytes)
            .change_context(DriveError::UploadFailed)?;

        let token = self.token().await?;
        let response = self
            .client
            .post(self.upload_url())
            .bearer_auth(token.expose_secret())
            .header(reqwest::header::CONTENT_TYPE, multipart.content_type())
            .body(multipart.body)
            .send()
            .await
            .change_context(DriveError::UploadFailed)
            .attach_printable_lazy(|| format!("Upload of '{}' failed", name))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(report!(DriveError::HttpStatus(status)))
                .attach_printable(error_body(response).await)
                .change_context(DriveError::UploadFailed);
        }

        let uploaded: UploadedFile = response
            .json()
            .await
            .change_context(DriveError::MalformedResponse)?;
        event!(Level::INFO, file_id = %uploaded.id, name = %name, "Image uploaded");

        if let Err(report) = self.make_public(&uploaded.id).await {
            event!(Level::WARN, file_id = %uploaded.id, error = ?report, "Could not share uploaded image");
        }

        Ok(format!("{}{}", self.config.public_base, uploaded.id))
    }

    #[instrument(skip(self))]
    pub async fn make_public(&self, file_id: &str) -> error_stack::Result<(), DriveError> {
        let token = self.token().await?;
        let response = self
            .client
            .post(format!("{}/permissions", self.file_url(file_id)))
            .bearer_auth(token.expose_secret())
            .json(&json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await
            .change_context(DriveError::PermissionFailed)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(report!(DriveError::HttpStatus(status)))
                .attach_printable(error_body(response).await)
                .change_context(DriveError::PermissionFailed);
        }
        Ok(())
    }

    /// Deletes the file behind a Drive URL. Non-Drive URLs and files that are
    /// already gone are not errors.
    #[instrument(skip(self))]
    pub async fn delete_image(&self, url: &str) -> error_stack::Result<(), DriveError> {
        let Some(id) = file_id(url) else {
            event!(Level::DEBUG, "Not a Drive URL, nothing to delete");
            return Ok(());
        };

        let token = self.token().await?;
        let response = self
            .client
            .delete(self.file_url(id))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .change_context(DriveError::DeleteFailed)
            .attach_printable_lazy(|| format!("Delete of file {} failed", id))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => {
                event!(Level::INFO, file_id = %id, "File already deleted");
                Ok(())
            }
            status => Err(report!(DriveError::HttpStatus(status)))
                .attach_printable(error_body(response).await)
                .change_context(DriveError::DeleteFailed),
        }
    }
}

#[async_trait::async_trait]
impl ImageStore for DriveManager {
    async fn upload(&self, image: ImageUpload) -> error_stack::Result<String, ImageStoreError> {
        self.upload_image(&image.bytes, &image.file_name, &image.mime_type, None)
            .await
            .change_context(ImageStoreError::UploadError)
    }

    async fn delete(&self, url: &str) -> error_stack::Result<(), ImageStoreError> {
        self.delete_image(url)
            .await
            .change_context(ImageStoreError::DeleteError)
    }
}
