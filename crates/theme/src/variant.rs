//! Light/dark theme variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a theme targets a dark or a light background.
///
/// Declared VS Code types `hc` and `hcLight` collapse to `Dark` and `Light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Resolve a declared `type` value, case-insensitively.
    pub fn from_declared(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dark" | "hc" => Some(ThemeVariant::Dark),
            "light" | "hclight" | "hc-light" => Some(ThemeVariant::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeVariant::Dark => "dark",
            ThemeVariant::Light => "light",
        }
    }

    pub fn is_light(self) -> bool {
        self == ThemeVariant::Light
    }
}

impl TryFrom<String> for ThemeVariant {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_declared(&value).ok_or_else(|| format!("unknown theme type: {}", value))
    }
}

impl FromStr for ThemeVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_declared(s).ok_or_else(|| format!("unknown theme type: {}", s))
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_types_collapse() {
        assert_eq!(ThemeVariant::from_declared("dark"), Some(ThemeVariant::Dark));
        assert_eq!(ThemeVariant::from_declared("HC"), Some(ThemeVariant::Dark));
        assert_eq!(ThemeVariant::from_declared("hcLight"), Some(ThemeVariant::Light));
        assert_eq!(ThemeVariant::from_declared("hc-light"), Some(ThemeVariant::Light));
        assert_eq!(ThemeVariant::from_declared("Light"), Some(ThemeVariant::Light));
        assert_eq!(ThemeVariant::from_declared("sepia"), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ThemeVariant::Light).unwrap();
        assert_eq!(json, "\"light\"");
        let v: ThemeVariant = serde_json::from_str("\"hcLight\"").unwrap();
        assert_eq!(v, ThemeVariant::Light);
        assert!(serde_json::from_str::<ThemeVariant>("\"neon\"").is_err());
    }
}
