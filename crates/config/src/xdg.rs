//! Per-user directories for codesh, following the XDG base directory layout.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "codesh";

fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    base.map(|p| p.join(APP_NAME))
        .with_context(|| format!("Failed to determine {} directory", kind))
}

/// `$XDG_CONFIG_HOME/codesh`, holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

/// `$XDG_DATA_HOME/codesh`, the base for custom themes and grammars.
pub fn get_data_dir() -> Result<PathBuf> {
    app_dir(dirs::data_dir(), "data")
}

/// `$XDG_CACHE_HOME/codesh`, the base for rendered block caches.
pub fn get_cache_dir() -> Result<PathBuf> {
    app_dir(dirs::cache_dir(), "cache")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dir_appends_name() {
        let dir = app_dir(Some(PathBuf::from("/tmp/base")), "test").unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/base/codesh"));

        let err = app_dir(None, "cache").unwrap_err();
        assert_eq!(err.to_string(), "Failed to determine cache directory");
    }

    #[test]
    fn test_user_directories_are_distinct() {
        let dirs = [get_config_dir().unwrap(), get_data_dir().unwrap(), get_cache_dir().unwrap()];
        for dir in &dirs {
            assert!(dir.ends_with(APP_NAME));
        }
        assert_ne!(dirs[0], dirs[1]);
        assert_ne!(dirs[1], dirs[2]);
    }
}
