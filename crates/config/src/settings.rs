//! Configuration structures for codesh settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Theme selection
    #[serde(default)]
    pub general: GeneralSettings,

    /// Code block rendering defaults
    #[serde(default)]
    pub render: RenderSettings,

    /// Where custom themes and grammars live
    #[serde(default)]
    pub storage: StorageSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Site color scheme. `System` renders both themes and lets CSS pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    System,
    Light,
    Dark,
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Appearance::System => "system",
            Appearance::Light => "light",
            Appearance::Dark => "dark",
        })
    }
}

impl FromStr for Appearance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" | "auto" => Ok(Appearance::System),
            "light" => Ok(Appearance::Light),
            "dark" => Ok(Appearance::Dark),
            other => Err(format!("unknown appearance '{}'", other)),
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Theme used in dark mode
    #[serde(default = "default_theme_dark")]
    pub theme_dark: String,

    /// Theme used in light mode
    #[serde(default = "default_theme_light")]
    pub theme_light: String,

    #[serde(default)]
    pub appearance: Appearance,
}

impl GeneralSettings {
    /// Theme names to render with, light first. A single name unless the
    /// appearance is `system`.
    pub fn active_themes(&self) -> Vec<&str> {
        match self.appearance {
            Appearance::System => vec![self.theme_light.as_str(), self.theme_dark.as_str()],
            Appearance::Light => vec![self.theme_light.as_str()],
            Appearance::Dark => vec![self.theme_dark.as_str()],
        }
    }
}

/// Rendering defaults for code blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Highlight `<pre><code>` blocks in rendered Markdown
    #[serde(default = "default_process_markdown")]
    pub process_markdown: bool,

    #[serde(default)]
    pub show_line_numbers: bool,

    /// Show the language label in the block header
    #[serde(default = "default_show_lang")]
    pub show_lang: bool,

    #[serde(default = "default_show_header")]
    pub show_header: bool,

    /// Seconds a rendered block stays cached; 0 disables the cache
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,
}

/// Storage locations. Relative theme and grammar paths resolve against the
/// data directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub themes_dir: Option<String>,

    #[serde(default)]
    pub grammars_dir: Option<String>,

    /// Relative paths resolve against the cache directory
    #[serde(default)]
    pub cache_dir: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_theme_dark() -> String {
    defaults::THEME_DARK.to_string()
}

fn default_theme_light() -> String {
    defaults::THEME_LIGHT.to_string()
}

fn default_process_markdown() -> bool {
    defaults::PROCESS_MARKDOWN
}

fn default_show_lang() -> bool {
    defaults::SHOW_LANG
}

fn default_show_header() -> bool {
    defaults::SHOW_HEADER
}

fn default_cache_ttl() -> u64 {
    defaults::CACHE_TTL_SECS
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

/// Flat plugin-style config, migrated on load.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyConfig {
    #[serde(default = "default_theme_dark")]
    pub theme_dark: String,
    #[serde(default = "default_theme_light")]
    pub theme_light: String,
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default = "default_process_markdown")]
    pub process_markdown: bool,
    #[serde(default)]
    pub show_line_numbers: bool,
    #[serde(default)]
    pub log_file_path: Option<String>,
    #[serde(default = "default_min_level")]
    pub min_log_level: String,
}

impl From<LegacyConfig> for Config {
    fn from(legacy: LegacyConfig) -> Self {
        Self {
            general: GeneralSettings {
                theme_dark: legacy.theme_dark,
                theme_light: legacy.theme_light,
                appearance: legacy.appearance,
            },
            render: RenderSettings {
                process_markdown: legacy.process_markdown,
                show_line_numbers: legacy.show_line_numbers,
                ..RenderSettings::default()
            },
            storage: StorageSettings::default(),
            logging: LoggingSettings {
                file_path: legacy.log_file_path,
                min_level: legacy.min_log_level,
                max_entries: default_max_entries(),
            },
        }
    }
}

// Default implementations
impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme_dark: default_theme_dark(),
            theme_light: default_theme_light(),
            appearance: Appearance::default(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            process_markdown: default_process_markdown(),
            show_line_numbers: false,
            show_lang: default_show_lang(),
            show_header: default_show_header(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: Config = toml::from_str("[general]\nappearance = \"dark\"\n").unwrap();
        assert_eq!(config.general.appearance, Appearance::Dark);
        assert_eq!(config.general.theme_dark, "codesh-dark");
        assert!(config.render.process_markdown);
        assert_eq!(config.logging.max_entries, defaults::MAX_LOG_ENTRIES);
        assert_eq!(config.render.cache_ttl, 3600);
        assert_eq!(config.storage.cache_dir, None);
    }

    #[test]
    fn test_legacy_flat_format() {
        let legacy: LegacyConfig =
            toml::from_str("theme_dark = \"night\"\nshow_line_numbers = true\n").unwrap();
        let config = Config::from(legacy);
        assert_eq!(config.general.theme_dark, "night");
        assert_eq!(config.general.theme_light, "codesh-light");
        assert!(config.render.show_line_numbers);
        assert!(config.render.show_header);
    }

    #[test]
    fn test_active_themes() {
        let mut general = GeneralSettings::default();
        assert_eq!(general.active_themes(), vec!["codesh-light", "codesh-dark"]);
        general.appearance = Appearance::Dark;
        assert_eq!(general.active_themes(), vec!["codesh-dark"]);
        assert_eq!("Light".parse::<Appearance>(), Ok(Appearance::Light));
        assert!("sepia".parse::<Appearance>().is_err());
    }
}
