//! Directory-backed store: one `<name>.json` file per document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{validate_identifier, JsonStore, StoreError};

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
    read_only: bool,
}

impl DirStore {
    /// Open a writable store, creating `dir` if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(Self {
            dir,
            read_only: false,
        })
    }

    /// Open a store that only reads. A missing directory lists as empty.
    pub fn read_only(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            read_only: true,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, EXTENSION))
    }

    fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl JsonStore for DirStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_err(&self.dir)(e)),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .filter(|name| crate::is_valid_identifier(name))
            .collect();
        names.sort();
        Ok(names)
    }

    fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        validate_identifier(name)?;
        let path = self.path_for(name);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_err(&path)(e)),
        }
    }

    fn put(&self, name: &str, json: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        validate_identifier(name)?;
        let path = self.path_for(name);
        fs::write(&path, json).map_err(Self::io_err(&path))
    }

    fn delete(&self, name: &str) -> Result<bool, StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        validate_identifier(name)?;
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::io_err(&path)(e)),
        }
    }

    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        validate_identifier(name)?;
        Ok(self.path_for(name).is_file())
    }
}
