use codesh_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid theme identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("theme not found: {0}")]
    DocumentNotFound(String),

    #[error("invalid theme: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    #[error("theme JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
