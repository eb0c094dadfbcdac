use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageStoreError {
    #[error("Failed to upload image")]
    UploadError,
    #[error("Failed to delete image")]
    DeleteError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    /// Uploads the image and returns a URL that renders it directly.
    async fn upload(&self, image: ImageUpload) -> error_stack::Result<String, ImageStoreError>;

    /// Removes the image behind `url`. URLs the store does not recognize are ignored.
    async fn delete(&self, url: &str) -> error_stack::Result<(), ImageStoreError>;
}
