//! Storage errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid identifier '{0}': use only letters, numbers, hyphens, and underscores")]
    InvalidIdentifier(String),

    #[error("store is read-only")]
    ReadOnly,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
