use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

// Enum for handling application-level errors outside the import path.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0:#}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0:#}")]
    Serialization(#[from] serde_json::Error),
}
