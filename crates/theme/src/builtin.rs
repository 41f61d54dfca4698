//! Built-in themes shipped with codesh.
//!
//! Both are synthesized from the default core palettes, so they always
//! round-trip through [`crate::extract_core_colors`].

use std::sync::OnceLock;

use codesh_store::MemoryStore;

use crate::synth::generate_from_set;
use crate::{CoreColorSet, ThemeDocument, ThemeVariant};

pub const BUILTIN_DARK: &str = "codesh-dark";
pub const BUILTIN_LIGHT: &str = "codesh-light";

static BUILTIN_THEMES: OnceLock<Vec<ThemeDocument>> = OnceLock::new();

fn builtin_theme(name: &str, title: &str, variant: ThemeVariant) -> ThemeDocument {
    let mut doc = generate_from_set(&CoreColorSet::defaults(variant), variant);
    doc.name = name.to_string();
    doc.display_name = Some(title.to_string());
    doc
}

/// All built-in themes, sorted by name.
pub fn builtin_themes() -> &'static [ThemeDocument] {
    BUILTIN_THEMES.get_or_init(|| {
        vec![
            builtin_theme(BUILTIN_DARK, "CodeSh Dark", ThemeVariant::Dark),
            builtin_theme(BUILTIN_LIGHT, "CodeSh Light", ThemeVariant::Light),
        ]
    })
}

pub fn builtin_theme_by_name(name: &str) -> Option<&'static ThemeDocument> {
    builtin_themes().iter().find(|doc| doc.name == name)
}

/// Default built-in theme for a variant.
pub fn default_theme_name(variant: ThemeVariant) -> &'static str {
    match variant {
        ThemeVariant::Dark => BUILTIN_DARK,
        ThemeVariant::Light => BUILTIN_LIGHT,
    }
}

/// Read-only store holding the serialized built-in themes.
pub fn builtin_store() -> MemoryStore {
    let docs = builtin_themes().iter().filter_map(|doc| match doc.to_json_pretty() {
        Ok(json) => Some((doc.name.clone(), json)),
        Err(e) => {
            codesh_logger::error(format!(
                "Failed to serialize built-in theme '{}': {}",
                doc.name, e
            ));
            None
        }
    });
    MemoryStore::read_only(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_core_colors;
    use codesh_store::JsonStore;

    #[test]
    fn test_builtin_names() {
        let names: Vec<&str> = builtin_themes().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["codesh-dark", "codesh-light"]);
        assert_eq!(default_theme_name(ThemeVariant::Light), "codesh-light");
        assert!(builtin_theme_by_name("github-dark").is_none());
    }

    #[test]
    fn test_builtin_palettes_round_trip() {
        for variant in [ThemeVariant::Dark, ThemeVariant::Light] {
            let doc = builtin_theme_by_name(default_theme_name(variant)).unwrap();
            assert_eq!(doc.variant, variant);
            assert_eq!(extract_core_colors(doc), CoreColorSet::defaults(variant));
        }
    }

    #[test]
    fn test_builtin_store_is_read_only() {
        let store = builtin_store();
        assert_eq!(store.list().unwrap(), vec!["codesh-dark", "codesh-light"]);
        let json = store.get("codesh-light").unwrap().unwrap();
        let doc: ThemeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.title(), "CodeSh Light");
        assert!(store.put("codesh-light", "{}").is_err());
    }
}
