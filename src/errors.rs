use thiserror::Error;

/// Error type for failures outside the record handlers: configuration files
/// and their encoding.
#[derive(Debug, Error)]
pub enum FarmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}
