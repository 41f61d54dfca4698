//! In-memory store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::{validate_identifier, JsonStore, StoreError};

/// Store backed by a sorted map. Used for built-in documents and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<BTreeMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `docs` that rejects writes.
    pub fn read_only<I>(docs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            docs: RwLock::new(docs.into_iter().collect()),
            read_only: true,
        }
    }

    pub fn len(&self) -> usize {
        self.docs.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl JsonStore for MemoryStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        let docs = self.docs.read().unwrap_or_else(|e| e.into_inner());
        Ok(docs.keys().cloned().collect())
    }

    fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        let docs = self.docs.read().unwrap_or_else(|e| e.into_inner());
        Ok(docs.get(name).cloned())
    }

    fn put(&self, name: &str, json: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        validate_identifier(name)?;
        let mut docs = self.docs.write().unwrap_or_else(|e| e.into_inner());
        docs.insert(name.to_string(), json.to_string());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<bool, StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        let mut docs = self.docs.write().unwrap_or_else(|e| e.into_inner());
        Ok(docs.remove(name).is_some())
    }
}
