//! The ten human-editable core colors of a theme.

use codesh_color::Color;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_core_hex;
use crate::ThemeVariant;

/// One of the ten semantic color roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoreColor {
    Background,
    Foreground,
    Comment,
    Keyword,
    String,
    Number,
    Function,
    Type,
    Variable,
    Operator,
}

impl CoreColor {
    pub const ALL: [CoreColor; 10] = [
        CoreColor::Background,
        CoreColor::Foreground,
        CoreColor::Comment,
        CoreColor::Keyword,
        CoreColor::String,
        CoreColor::Number,
        CoreColor::Function,
        CoreColor::Type,
        CoreColor::Variable,
        CoreColor::Operator,
    ];

    /// JSON key used at the editor boundary.
    pub fn key(self) -> &'static str {
        match self {
            CoreColor::Background => "background",
            CoreColor::Foreground => "foreground",
            CoreColor::Comment => "comment",
            CoreColor::Keyword => "keyword",
            CoreColor::String => "string",
            CoreColor::Number => "number",
            CoreColor::Function => "function",
            CoreColor::Type => "type",
            CoreColor::Variable => "variable",
            CoreColor::Operator => "operator",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Built-in default for this role.
    pub fn default_hex(self, variant: ThemeVariant) -> &'static str {
        let table = match variant {
            ThemeVariant::Dark => &DARK_DEFAULTS,
            ThemeVariant::Light => &LIGHT_DEFAULTS,
        };
        table[self as usize]
    }

    pub fn default_color(self, variant: ThemeVariant) -> Color {
        Color::from_hex(self.default_hex(variant)).unwrap_or(Color::BLACK)
    }
}

// Order follows `CoreColor::ALL`.
const DARK_DEFAULTS: [&str; 10] = [
    "#1F1F22", "#ABB2BF", "#7F848E", "#C678DD", "#98C379", "#D19A66", "#61AFEF", "#E5C07B",
    "#E06C75", "#56B6C2",
];

const LIGHT_DEFAULTS: [&str; 10] = [
    "#FAFAFA", "#383A42", "#A0A1A7", "#A626A4", "#50A14F", "#986801", "#4078F2", "#C18401",
    "#E45649", "#0184BC",
];

/// `value` unless it is missing or blank, otherwise `default`.
pub fn resolve<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default,
    }
}

/// A complete set of core colors, each an uppercase `#RRGGBB` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreColorSet {
    pub background: String,
    pub foreground: String,
    pub comment: String,
    pub keyword: String,
    pub string: String,
    pub number: String,
    pub function: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub variable: String,
    pub operator: String,
}

impl CoreColorSet {
    /// The built-in palette for `variant`.
    pub fn defaults(variant: ThemeVariant) -> Self {
        Self::from_fn(|key| key.default_hex(variant).to_string())
    }

    /// Build a set by computing each role's value.
    pub fn from_fn(mut f: impl FnMut(CoreColor) -> String) -> Self {
        Self {
            background: f(CoreColor::Background),
            foreground: f(CoreColor::Foreground),
            comment: f(CoreColor::Comment),
            keyword: f(CoreColor::Keyword),
            string: f(CoreColor::String),
            number: f(CoreColor::Number),
            function: f(CoreColor::Function),
            type_: f(CoreColor::Type),
            variable: f(CoreColor::Variable),
            operator: f(CoreColor::Operator),
        }
    }

    pub fn get(&self, key: CoreColor) -> &str {
        match key {
            CoreColor::Background => &self.background,
            CoreColor::Foreground => &self.foreground,
            CoreColor::Comment => &self.comment,
            CoreColor::Keyword => &self.keyword,
            CoreColor::String => &self.string,
            CoreColor::Number => &self.number,
            CoreColor::Function => &self.function,
            CoreColor::Type => &self.type_,
            CoreColor::Variable => &self.variable,
            CoreColor::Operator => &self.operator,
        }
    }

    pub fn set(&mut self, key: CoreColor, value: impl Into<String>) {
        let slot = match key {
            CoreColor::Background => &mut self.background,
            CoreColor::Foreground => &mut self.foreground,
            CoreColor::Comment => &mut self.comment,
            CoreColor::Keyword => &mut self.keyword,
            CoreColor::String => &mut self.string,
            CoreColor::Number => &mut self.number,
            CoreColor::Function => &mut self.function,
            CoreColor::Type => &mut self.type_,
            CoreColor::Variable => &mut self.variable,
            CoreColor::Operator => &mut self.operator,
        };
        *slot = value.into();
    }

    /// Parsed color for `key`, falling back to the variant default if the
    /// stored string is not a valid hex color.
    pub fn color(&self, key: CoreColor, variant: ThemeVariant) -> Color {
        Color::from_hex(self.get(key))
            .map(Color::opaque)
            .unwrap_or_else(|_| key.default_color(variant))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CoreColor, &str)> {
        CoreColor::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// Core colors as submitted by an editor; any role may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialCoreColors {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub comment: Option<String>,
    pub keyword: Option<String>,
    pub string: Option<String>,
    pub number: Option<String>,
    pub function: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub variable: Option<String>,
    pub operator: Option<String>,
}

impl PartialCoreColors {
    pub fn get(&self, key: CoreColor) -> Option<&str> {
        let value = match key {
            CoreColor::Background => &self.background,
            CoreColor::Foreground => &self.foreground,
            CoreColor::Comment => &self.comment,
            CoreColor::Keyword => &self.keyword,
            CoreColor::String => &self.string,
            CoreColor::Number => &self.number,
            CoreColor::Function => &self.function,
            CoreColor::Type => &self.type_,
            CoreColor::Variable => &self.variable,
            CoreColor::Operator => &self.operator,
        };
        value.as_deref()
    }

    pub fn with(mut self, key: CoreColor, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match key {
            CoreColor::Background => self.background = value,
            CoreColor::Foreground => self.foreground = value,
            CoreColor::Comment => self.comment = value,
            CoreColor::Keyword => self.keyword = value,
            CoreColor::String => self.string = value,
            CoreColor::Number => self.number = value,
            CoreColor::Function => self.function = value,
            CoreColor::Type => self.type_ = value,
            CoreColor::Variable => self.variable = value,
            CoreColor::Operator => self.operator = value,
        }
        self
    }

    /// Merge over the variant defaults.
    ///
    /// Blank entries and entries that are not valid hex colors take the
    /// default; valid ones are normalized to uppercase `#RRGGBB`.
    pub fn resolve(&self, variant: ThemeVariant) -> CoreColorSet {
        CoreColorSet::from_fn(|key| {
            let default = key.default_hex(variant);
            let value = resolve(self.get(key), default);
            normalize_core_hex(value).unwrap_or_else(|| default.to_string())
        })
    }
}

impl From<CoreColorSet> for PartialCoreColors {
    fn from(set: CoreColorSet) -> Self {
        Self {
            background: Some(set.background),
            foreground: Some(set.foreground),
            comment: Some(set.comment),
            keyword: Some(set.keyword),
            string: Some(set.string),
            number: Some(set.number),
            function: Some(set.function),
            type_: Some(set.type_),
            variable: Some(set.variable),
            operator: Some(set.operator),
        }
    }
}
