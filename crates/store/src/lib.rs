//! JSON document storage for codesh themes and grammars.
//!
//! Documents are opaque JSON text keyed by identifiers matching
//! `[A-Za-z0-9_-]+`. Concurrent writers to the same key are not
//! coordinated: the last write wins.

mod dir;
mod error;
mod memory;
mod naming;

pub use dir::DirStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use naming::{display_name, is_valid_identifier, slugify, unique_name, validate_identifier};

/// Key-value storage of JSON documents.
pub trait JsonStore: Send + Sync {
    /// Sorted identifiers of all stored documents.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Raw JSON for `name`, or `None` when absent.
    fn get(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// Create or replace the document stored under `name`.
    fn put(&self, name: &str, json: &str) -> Result<(), StoreError>;

    /// Remove `name`; returns `false` when it did not exist.
    fn delete(&self, name: &str) -> Result<bool, StoreError>;

    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.get(name)?.is_some())
    }
}
