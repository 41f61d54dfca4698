//! VS Code–compatible theme document.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{CoreColorSet, ThemeVariant};

/// Generator tag written into `_metadata.generator`.
pub const GENERATOR: &str = "CodeSh Theme Manager";

/// A complete highlighting theme.
///
/// Serializes with the top-level keys `name`, `displayName`, `type`,
/// `colors`, `tokenColors` and `_metadata`. Unknown top-level keys of
/// imported themes are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "type", default)]
    pub variant: ThemeVariant,
    /// UI-chrome colors such as `editor.background`, in document order.
    #[serde(default)]
    pub colors: IndexMap<String, String>,
    #[serde(default)]
    pub token_colors: Vec<TokenRule>,
    #[serde(rename = "_metadata", default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ThemeDocument {
    pub fn new(name: impl Into<String>, variant: ThemeVariant) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            variant,
            colors: IndexMap::new(),
            token_colors: Vec::new(),
            metadata: Metadata::default(),
            extra: IndexMap::new(),
        }
    }

    /// Display name, or the identifier when none is set.
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn color(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One `tokenColors` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "ScopeList::is_empty")]
    pub scope: ScopeList,
    #[serde(default)]
    pub settings: TokenSettings,
}

impl TokenRule {
    pub fn new<I, S>(scopes: I, foreground: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            scope: ScopeList(scopes.into_iter().map(Into::into).collect()),
            settings: TokenSettings {
                foreground: Some(foreground.into()),
                ..TokenSettings::default()
            },
        }
    }

    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.settings.font_style = Some(style);
        self
    }

    pub fn foreground(&self) -> Option<&str> {
        self.settings.foreground.as_deref()
    }
}

/// Scope selectors of a rule.
///
/// Accepts either a JSON array or a single string; a string may hold
/// several comma-separated selectors. Always serializes as an array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScopeList(pub Vec<String>);

impl ScopeList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, scope: &str) -> bool {
        self.iter().any(|s| s == scope)
    }
}

impl<'de> Deserialize<'de> for ScopeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawScope {
            One(String),
            Many(Vec<String>),
        }

        let scopes = match RawScope::deserialize(deserializer)? {
            RawScope::One(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            RawScope::Many(v) => v.into_iter().map(|s| s.trim().to_string()).collect(),
        };
        Ok(ScopeList(scopes))
    }
}

/// Style of a token rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// `settings.fontStyle` value.
///
/// Generated themes only use the first three; anything else an imported
/// theme declares (`"underline"`, `"bold italic"`, `""`) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontStyle {
    Italic,
    Bold,
    Strikethrough,
    Other(String),
}

impl FontStyle {
    pub fn as_str(&self) -> &str {
        match self {
            FontStyle::Italic => "italic",
            FontStyle::Bold => "bold",
            FontStyle::Strikethrough => "strikethrough",
            FontStyle::Other(s) => s,
        }
    }

    /// Whether the space-separated style list contains `word`.
    pub fn has(&self, word: &str) -> bool {
        self.as_str().split_whitespace().any(|w| w == word)
    }
}

impl From<String> for FontStyle {
    fn from(value: String) -> Self {
        match value.as_str() {
            "italic" => FontStyle::Italic,
            "bold" => FontStyle::Bold,
            "strikethrough" => FontStyle::Strikethrough,
            _ => FontStyle::Other(value),
        }
    }
}

impl From<FontStyle> for String {
    fn from(style: FontStyle) -> Self {
        style.as_str().to_string()
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bookkeeping stored under `_metadata`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copied_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_colors: Option<CoreColorSet>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        *self == Metadata::default()
    }
}
