use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationServiceError {
    #[error("Service initialization failed: {details}")]
    InitializationFailed { details: String },
    #[error("Health check failed: {details}")]
    Unhealthy { details: String },
}
