use codesh_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("invalid grammar slug: {0:?}")]
    InvalidIdentifier(String),

    #[error("grammar not found: {0}")]
    NotFound(String),

    #[error("invalid grammar file: {0}")]
    InvalidGrammar(String),

    #[error("grammar JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, GrammarError>;
