use thiserror::Error;
use tokio::task::JoinError;

// Core internal errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
    #[error("No usable generation model: {0}")]
    NoUsableModel(String),
    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),
    #[error("Upstream quota exceeded: {0}")]
    UpstreamQuotaExceeded(String),
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Storage error: {0}")]
    Storage(#[from] object_store::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Task join error: {0}")]
    Join(#[from] JoinError),
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
    #[error("Ingestion Processing error: {0}")]
    Processing(String),
}
