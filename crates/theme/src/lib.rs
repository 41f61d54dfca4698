//! Theme model and color derivation for codesh.
//!
//! A theme is summarized by ten core colors ([`CoreColorSet`]). This crate
//! extracts those from any VS Code theme, synthesizes a complete theme from
//! them, validates and normalizes imported themes, and manages stored
//! themes through [`ThemeManager`].

mod builtin;
mod document;
mod error;
mod extract;
mod manager;
mod normalize;
mod palette;
mod synth;
mod variant;

pub use builtin::{
    builtin_store, builtin_theme_by_name, builtin_themes, default_theme_name, BUILTIN_DARK,
    BUILTIN_LIGHT,
};
pub use document::{
    FontStyle, Metadata, ScopeList, ThemeDocument, TokenRule, TokenSettings, GENERATOR,
};
pub use error::{Result, ThemeError};
pub use extract::{
    candidates_for, extract_core_colors, find_color_for_scopes, scope_matches, SCOPE_CANDIDATES,
};
pub use manager::{ThemeManager, ThemeSummary};
pub use normalize::{
    detect_theme_type, normalize_core_hex, normalize_hex, normalize_theme_colors,
    validate_structure,
};
pub use palette::{resolve, CoreColor, CoreColorSet, PartialCoreColors};
pub use synth::{
    generate, generate_from_set, token_colors, ui_colors, GENERATED_DISPLAY_NAME, GENERATED_NAME,
};
pub use variant::ThemeVariant;
