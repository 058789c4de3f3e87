use thiserror::Error;

/// Infrastructure failures. Divergent sync results (conflicts, rejected
/// pushes, ...) are never errors; they are reported as an `Outcome`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git binary could not be run: {0}")]
    Spawn(String),

    #[error("Repository discovery failed: {0}")]
    Repository(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<git2::Error> for AppError {
    fn from(e: git2::Error) -> Self {
        AppError::Repository(e.message().to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
