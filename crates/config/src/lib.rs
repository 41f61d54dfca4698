//! Configuration management for codesh.
//!
//! This crate provides configuration loading, saving, and validation
//! with support for TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{
    Appearance, Config, GeneralSettings, LegacyConfig, LoggingSettings, RenderSettings,
    StorageSettings,
};
pub use xdg::{get_cache_dir, get_config_dir, get_data_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const THEME_DARK: &str = "codesh-dark";
    pub const THEME_LIGHT: &str = "codesh-light";
    pub const PROCESS_MARKDOWN: bool = true;
    pub const SHOW_LANG: bool = true;
    pub const SHOW_HEADER: bool = true;
    pub const CACHE_TTL_SECS: u64 = 3600;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 1000;
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// On first run, creates config file with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`.
    ///
    /// Missing files are created with defaults. Missing keys are filled in
    /// and written back. Flat legacy files are migrated to sections.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        if is_legacy(&original_content) {
            let legacy: LegacyConfig = toml::from_str(&original_content)?;
            let config: Config = legacy.into();
            // Save in new format
            config.save_to(path)?;
            return Ok(config);
        }

        let config = Self::validate_content(&original_content)?;

        // Serialize back to get normalized content
        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Directory holding custom themes.
    pub fn themes_dir(&self) -> Result<PathBuf> {
        resolve_storage(self.storage.themes_dir.as_deref(), "themes")
    }

    /// Directory holding custom grammars.
    pub fn grammars_dir(&self) -> Result<PathBuf> {
        resolve_storage(self.storage.grammars_dir.as_deref(), "grammars")
    }

    /// Directory holding rendered block caches.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match self.storage.cache_dir.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(dir) if Path::new(dir).is_absolute() => Ok(PathBuf::from(dir)),
            Some(dir) => Ok(get_cache_dir()?.join(dir)),
            None => Ok(get_cache_dir()?.join("render")),
        }
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

/// Flat files have top-level values instead of only section tables.
fn is_legacy(content: &str) -> bool {
    match content.parse::<toml::Table>() {
        Ok(table) => table.values().any(|v| !v.is_table()),
        Err(_) => false,
    }
}

fn resolve_storage(configured: Option<&str>, default_name: &str) -> Result<PathBuf> {
    match configured.map(str::trim).filter(|s| !s.is_empty()) {
        Some(dir) if Path::new(dir).is_absolute() => Ok(PathBuf::from(dir)),
        Some(dir) => Ok(get_data_dir()?.join(dir)),
        None => Ok(get_data_dir()?.join(default_name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_load_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_missing_keys_completed_on_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[general]\ntheme_dark = \"midnight\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.theme_dark, "midnight");

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("theme_light = \"codesh-light\""));
        assert!(written.contains("[render]"));
    }

    #[test]
    fn test_legacy_file_migrated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "theme_light = \"paper\"\nprocess_markdown = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.theme_light, "paper");
        assert!(!config.render.process_markdown);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[general]"));
    }

    #[test]
    fn test_invalid_content_rejected() {
        assert!(Config::validate_content("[general]\nappearance = \"sepia\"\n").is_err());
        assert!(Config::validate_content("[general\n").is_err());
    }

    #[test]
    fn test_storage_dirs() {
        let mut config = Config::default();
        assert!(config.themes_dir().unwrap().ends_with("codesh/themes"));
        assert!(config.grammars_dir().unwrap().ends_with("codesh/grammars"));

        config.storage.themes_dir = Some("/srv/themes".to_string());
        assert_eq!(config.themes_dir().unwrap(), PathBuf::from("/srv/themes"));
    }

    #[test]
    fn test_cache_dir() {
        let mut config = Config::default();
        let default = config.cache_dir().unwrap();
        assert!(default.ends_with("codesh/render"));
        assert_eq!(default.parent().unwrap(), get_cache_dir().unwrap());

        config.storage.cache_dir = Some("blocks".to_string());
        assert!(config.cache_dir().unwrap().ends_with("codesh/blocks"));
        config.storage.cache_dir = Some("/var/cache/codesh".to_string());
        assert_eq!(config.cache_dir().unwrap(), PathBuf::from("/var/cache/codesh"));
    }
}
