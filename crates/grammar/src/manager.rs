//! Storage-backed grammar management.

use std::path::Path;

use chrono::{Local, SecondsFormat};
use codesh_store::{display_name, is_valid_identifier, slugify, unique_name, DirStore, JsonStore};
use serde::Serialize;

use crate::document::{GrammarDocument, GrammarMetadata, GENERATOR};
use crate::error::{GrammarError, Result};

/// Where a grammar was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarSource {
    Custom,
    /// Shipped with codesh itself
    Plugin,
    /// Shipped with the highlighting engine
    Vendor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarSummary {
    pub slug: String,
    pub name: String,
    pub scope_name: String,
    pub file_types: Vec<String>,
    pub custom: bool,
    pub source: GrammarSource,
}

impl GrammarSummary {
    fn new(slug: &str, doc: GrammarDocument, source: GrammarSource) -> Self {
        Self {
            slug: slug.to_string(),
            name: doc.name.unwrap_or_else(|| display_name(slug)),
            scope_name: doc
                .scope_name
                .unwrap_or_else(|| format!("source.{}", slug)),
            file_types: doc.file_types,
            custom: source == GrammarSource::Custom,
            source,
        }
    }
}

/// Grammar CRUD over a writable custom store plus optional read-only
/// plugin and vendor stores. Lookups go custom, plugin, then vendor.
pub struct GrammarManager {
    custom: Box<dyn JsonStore>,
    plugin: Option<Box<dyn JsonStore>>,
    vendor: Option<Box<dyn JsonStore>>,
}

impl GrammarManager {
    pub fn new(custom: Box<dyn JsonStore>) -> Self {
        Self {
            custom,
            plugin: None,
            vendor: None,
        }
    }

    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Box::new(DirStore::open(dir.as_ref())?)))
    }

    pub fn with_plugin(mut self, store: Box<dyn JsonStore>) -> Self {
        self.plugin = Some(store);
        self
    }

    pub fn with_vendor(mut self, store: Box<dyn JsonStore>) -> Self {
        self.vendor = Some(store);
        self
    }

    pub fn list_custom(&self) -> Result<Vec<GrammarSummary>> {
        summarize(Some(self.custom.as_ref()), GrammarSource::Custom)
    }

    pub fn list_plugin(&self) -> Result<Vec<GrammarSummary>> {
        summarize(self.plugin.as_deref(), GrammarSource::Plugin)
    }

    pub fn list_vendor(&self) -> Result<Vec<GrammarSummary>> {
        summarize(self.vendor.as_deref(), GrammarSource::Vendor)
    }

    /// Plugin grammars followed by vendor grammars.
    pub fn list_builtin(&self) -> Result<Vec<GrammarSummary>> {
        let mut all = self.list_plugin()?;
        all.extend(self.list_vendor()?);
        Ok(all)
    }

    pub fn list_all(&self) -> Result<Vec<GrammarSummary>> {
        let mut all = self.list_builtin()?;
        all.extend(self.list_custom()?);
        Ok(all)
    }

    pub fn get(&self, slug: &str) -> Result<GrammarDocument> {
        for store in self.stores() {
            if let Some(json) = store.get(slug)? {
                return Ok(serde_json::from_str(&json)?);
            }
        }
        Err(GrammarError::NotFound(slug.to_string()))
    }

    pub fn exists(&self, slug: &str) -> Result<bool> {
        for store in self.stores() {
            if store.exists(slug)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn custom_exists(&self, slug: &str) -> Result<bool> {
        Ok(self.custom.exists(slug)?)
    }

    /// Store `grammar` as the custom grammar `slug`, stamping `_metadata`.
    pub fn save(&self, slug: &str, mut grammar: GrammarDocument) -> Result<GrammarDocument> {
        if !is_valid_identifier(slug) {
            return Err(GrammarError::InvalidIdentifier(slug.to_string()));
        }

        let now = timestamp();
        grammar.metadata.modified = Some(now.clone());
        grammar.metadata.created.get_or_insert(now);
        grammar.metadata.generator = Some(GENERATOR.to_string());

        self.custom.put(slug, &grammar.to_json_pretty()?)?;
        codesh_logger::info(format!("Saved grammar '{}'", slug));
        Ok(grammar)
    }

    /// Import grammar JSON; returns the slug it was stored under.
    ///
    /// The grammar must declare `scopeName` and at least one of `patterns`
    /// or `repository`. The slug comes from `name`, else `scopeName`.
    pub fn import(&self, json: &str, original_filename: &str) -> Result<String> {
        let mut grammar: GrammarDocument = serde_json::from_str(json)?;

        let Some(scope_name) = grammar.scope_name.clone() else {
            return Err(invalid(original_filename, "missing scopeName"));
        };
        if !grammar.has_patterns() && !grammar.has_repository() {
            return Err(invalid(original_filename, "missing patterns or repository"));
        }

        let source = grammar.name.as_deref().unwrap_or(&scope_name);
        let slug = slugify(source);
        if slug.is_empty() {
            return Err(invalid(original_filename, "name has no usable characters"));
        }
        let final_slug = unique_name(self.custom.as_ref(), &slug)?;

        grammar.metadata = GrammarMetadata {
            created: Some(timestamp()),
            imported: Some(true),
            original_filename: Some(original_filename.to_string()),
            generator: Some(GENERATOR.to_string()),
            ..GrammarMetadata::default()
        };

        self.save(&final_slug, grammar)?;
        codesh_logger::info(format!(
            "Imported grammar '{}' from {}",
            final_slug, original_filename
        ));
        Ok(final_slug)
    }

    pub fn delete(&self, slug: &str) -> Result<bool> {
        if !is_valid_identifier(slug) {
            return Ok(false);
        }
        let removed = self.custom.delete(slug)?;
        if removed {
            codesh_logger::info(format!("Deleted grammar '{}'", slug));
        }
        Ok(removed)
    }

    fn stores(&self) -> impl Iterator<Item = &dyn JsonStore> {
        std::iter::once(self.custom.as_ref())
            .chain(self.plugin.as_deref())
            .chain(self.vendor.as_deref())
    }
}

fn invalid(file: &str, reason: &str) -> GrammarError {
    codesh_logger::warn(format!("Rejected grammar import '{}': {}", file, reason));
    GrammarError::InvalidGrammar(reason.to_string())
}

fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Summaries sorted case-insensitively by name; unreadable entries skipped.
fn summarize(store: Option<&dyn JsonStore>, source: GrammarSource) -> Result<Vec<GrammarSummary>> {
    let Some(store) = store else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for slug in store.list()? {
        let Some(json) = store.get(&slug)? else {
            continue;
        };
        match serde_json::from_str::<GrammarDocument>(&json) {
            Ok(doc) => out.push(GrammarSummary::new(&slug, doc, source)),
            Err(e) => codesh_logger::warn(format!("Skipping unreadable grammar '{}': {}", slug, e)),
        }
    }
    out.sort_by_key(|g| g.name.to_lowercase());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codesh_store::MemoryStore;
    use serde_json::json;
    use tempfile::TempDir;

    fn grammar_json(name: Option<&str>, scope: &str) -> String {
        let mut value = json!({"scopeName": scope, "patterns": []});
        if let Some(name) = name {
            value["name"] = json!(name);
        }
        value.to_string()
    }

    fn read_only(docs: &[(&str, String)]) -> Box<dyn JsonStore> {
        Box::new(MemoryStore::read_only(
            docs.iter().map(|(k, v)| (k.to_string(), v.clone())),
        ))
    }

    #[test]
    fn test_import_validation() {
        let mgr = GrammarManager::new(Box::new(MemoryStore::new()));

        let err = mgr.import(r#"{"patterns": []}"#, "a.json").unwrap_err();
        assert!(matches!(err, GrammarError::InvalidGrammar(ref m) if m.contains("scopeName")));

        let err = mgr.import(r#"{"scopeName": "source.x"}"#, "a.json").unwrap_err();
        assert!(matches!(err, GrammarError::InvalidGrammar(ref m) if m.contains("patterns")));

        assert!(matches!(
            mgr.import("[", "a.json").unwrap_err(),
            GrammarError::Json(_)
        ));
    }

    #[test]
    fn test_import_slugs_and_collisions() {
        let mgr = GrammarManager::new(Box::new(MemoryStore::new()));
        let json = grammar_json(Some("My Lang++"), "source.mylang");

        assert_eq!(mgr.import(&json, "mylang.json").unwrap(), "my-lang");
        assert_eq!(mgr.import(&json, "mylang.json").unwrap(), "my-lang-2");
        assert_eq!(
            mgr.import(&grammar_json(None, "source.toml"), "t.json").unwrap(),
            "source-toml"
        );

        let stored = mgr.get("my-lang").unwrap();
        assert_eq!(stored.metadata.imported, Some(true));
        assert_eq!(stored.metadata.original_filename.as_deref(), Some("mylang.json"));
        assert_eq!(stored.metadata.generator.as_deref(), Some(GENERATOR));
        assert!(stored.metadata.modified.is_some());
    }

    #[test]
    fn test_lookup_order_and_listing() {
        let plugin = read_only(&[("shortcode", grammar_json(Some("shortcode"), "text.shortcode"))]);
        let vendor = read_only(&[
            ("zig", grammar_json(Some("Zig"), "source.zig")),
            ("ada", grammar_json(None, "source.ada")),
            ("shortcode", grammar_json(Some("Vendor Shortcode"), "text.vendor")),
        ]);
        let mgr = GrammarManager::new(Box::new(MemoryStore::new()))
            .with_plugin(plugin)
            .with_vendor(vendor);

        assert_eq!(
            mgr.get("shortcode").unwrap().scope_name.as_deref(),
            Some("text.shortcode")
        );
        assert!(mgr.exists("zig").unwrap());
        assert!(!mgr.custom_exists("zig").unwrap());

        let vendor = mgr.list_vendor().unwrap();
        let names: Vec<&str> = vendor.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Vendor Shortcode", "Zig"]);
        assert_eq!(vendor[0].scope_name, "source.ada");
        assert_eq!(vendor[0].source, GrammarSource::Vendor);

        mgr.import(&grammar_json(Some("Mine"), "source.mine"), "m.json")
            .unwrap();
        let all = mgr.list_all().unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].source, GrammarSource::Plugin);
        assert!(all[4].custom);
    }

    #[test]
    fn test_delete_only_touches_custom() {
        let plugin = read_only(&[("shortcode", grammar_json(None, "text.shortcode"))]);
        let mgr = GrammarManager::new(Box::new(MemoryStore::new())).with_plugin(plugin);
        mgr.import(&grammar_json(Some("x"), "source.x"), "x.json").unwrap();

        assert!(mgr.delete("x").unwrap());
        assert!(!mgr.delete("x").unwrap());
        assert!(!mgr.delete("shortcode").unwrap());
        assert!(mgr.exists("shortcode").unwrap());
    }

    #[test]
    fn test_dir_backed_save() {
        let dir = TempDir::new().unwrap();
        let mgr = GrammarManager::open(dir.path()).unwrap();
        let doc: GrammarDocument = serde_json::from_str(&grammar_json(None, "source.q")).unwrap();

        assert!(matches!(
            mgr.save("bad slug", doc.clone()).unwrap_err(),
            GrammarError::InvalidIdentifier(_)
        ));
        mgr.save("q", doc).unwrap();
        assert!(dir.path().join("q.json").exists());
        assert_eq!(mgr.list_custom().unwrap()[0].name, "Q");
    }
}
