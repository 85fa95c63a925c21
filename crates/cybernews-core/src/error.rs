use thiserror::Error;

/// All the ways things can go wrong in CyberNews
#[derive(Error, Debug)]
pub enum Error {
    #[error("News request failed: {0}")]
    ApiError(String),

    #[error("Storage operation failed: {0}")]
    StorageError(#[from] cybernews_storage::StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
