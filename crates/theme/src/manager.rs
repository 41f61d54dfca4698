//! Storage-backed theme management.

use std::path::Path;

use chrono::{Local, SecondsFormat};
use codesh_store::{display_name, is_valid_identifier, slugify, unique_name, DirStore, JsonStore};
use serde::Serialize;
use serde_json::Value;

use crate::builtin::builtin_store;
use crate::error::{Result, ThemeError};
use crate::normalize::{detect_theme_type, normalize_theme_colors, validate_structure};
use crate::synth;
use crate::{
    extract_core_colors, CoreColorSet, Metadata, PartialCoreColors, ThemeDocument, ThemeVariant,
    GENERATOR,
};

/// Name used for imports whose document, file name and override all
/// slugify to nothing.
const FALLBACK_IMPORT_NAME: &str = "imported-theme";

/// Listing entry for a stored theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSummary {
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub variant: ThemeVariant,
    pub custom: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copied_from: Option<String>,
    /// Core colors for swatches
    pub colors: CoreColorSet,
}

impl ThemeSummary {
    fn new(name: &str, doc: &ThemeDocument, custom: bool) -> Self {
        Self {
            name: name.to_string(),
            display_name: doc
                .display_name
                .clone()
                .unwrap_or_else(|| display_name(name)),
            variant: doc.variant,
            custom,
            created: doc.metadata.created.clone(),
            copied_from: doc.metadata.copied_from.clone(),
            colors: extract_core_colors(doc),
        }
    }
}

/// Theme CRUD over a writable custom store and an optional read-only
/// built-in store. Lookups try the custom store first.
pub struct ThemeManager {
    custom: Box<dyn JsonStore>,
    builtin: Option<Box<dyn JsonStore>>,
}

impl ThemeManager {
    /// Manager over `custom` with the codesh built-in themes.
    pub fn new(custom: Box<dyn JsonStore>) -> Self {
        Self::with_builtin(custom, Some(Box::new(builtin_store())))
    }

    pub fn with_builtin(custom: Box<dyn JsonStore>, builtin: Option<Box<dyn JsonStore>>) -> Self {
        Self { custom, builtin }
    }

    /// Manager over `<dir>/<name>.json` files, creating `dir` if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let store = DirStore::open(dir.as_ref())?;
        Ok(Self::new(Box::new(store)))
    }

    pub fn list_custom(&self) -> Result<Vec<ThemeSummary>> {
        summarize(self.custom.as_ref(), true)
    }

    pub fn list_builtin(&self) -> Result<Vec<ThemeSummary>> {
        match &self.builtin {
            Some(store) => summarize(store.as_ref(), false),
            None => Ok(Vec::new()),
        }
    }

    /// Built-in themes followed by custom ones.
    pub fn list_all(&self) -> Result<Vec<ThemeSummary>> {
        let mut all = self.list_builtin()?;
        all.extend(self.list_custom()?);
        Ok(all)
    }

    pub fn get(&self, name: &str) -> Result<ThemeDocument> {
        check_identifier(name)?;
        if let Some(json) = self.custom.get(name)? {
            return Ok(serde_json::from_str(&json)?);
        }
        if let Some(store) = &self.builtin {
            if let Some(json) = store.get(name)? {
                return Ok(serde_json::from_str(&json)?);
            }
        }
        Err(ThemeError::DocumentNotFound(name.to_string()))
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        if self.custom.exists(name)? {
            return Ok(true);
        }
        match &self.builtin {
            Some(store) => Ok(store.exists(name)?),
            None => Ok(false),
        }
    }

    pub fn custom_exists(&self, name: &str) -> Result<bool> {
        Ok(self.custom.exists(name)?)
    }

    /// Store `doc` as the custom theme `name`.
    ///
    /// The stored document takes `name` as its identifier, gains a display
    /// name if it has none, and has its `_metadata` stamped: `modified` is
    /// always refreshed, `created` only set when missing. Colors are stored
    /// as uppercase `#RRGGBB[AA]`; values that are not colors are dropped.
    pub fn save(&self, name: &str, doc: ThemeDocument) -> Result<ThemeDocument> {
        check_identifier(name)?;
        let mut doc = normalized(doc)?;

        let now = timestamp();
        doc.metadata.modified = Some(now.clone());
        doc.metadata.created.get_or_insert(now);
        doc.metadata.generator = Some(GENERATOR.to_string());

        doc.name = name.to_string();
        if doc.display_name.is_none() {
            doc.display_name = Some(display_name(name));
        }

        self.custom.put(name, &doc.to_json_pretty()?)?;
        codesh_logger::info(format!("Saved theme '{}'", name));
        Ok(doc)
    }

    /// Remove a custom theme. Built-in themes cannot be deleted.
    pub fn delete(&self, name: &str) -> Result<bool> {
        if !is_valid_identifier(name) {
            return Ok(false);
        }
        let removed = self.custom.delete(name)?;
        if removed {
            codesh_logger::info(format!("Deleted theme '{}'", name));
        }
        Ok(removed)
    }

    /// Copy any theme into the custom store; returns the name actually used.
    pub fn copy(&self, source: &str, new_name: &str) -> Result<String> {
        check_identifier(new_name)?;
        let mut doc = self.get(source)?;
        let final_name = unique_name(self.custom.as_ref(), new_name)?;

        doc.display_name = Some(display_name(&final_name));
        doc.metadata = Metadata {
            created: Some(timestamp()),
            copied_from: Some(source.to_string()),
            generator: Some(GENERATOR.to_string()),
            ..Metadata::default()
        };

        self.save(&final_name, doc)?;
        codesh_logger::info(format!("Copied theme '{}' to '{}'", source, final_name));
        Ok(final_name)
    }

    /// Import VS Code theme JSON; returns the name it was stored under.
    ///
    /// The name is taken from `new_name`, else the document's `name`, else
    /// the stem of `file_name`, and is slugified and de-duplicated.
    pub fn import(&self, json: &str, file_name: &str, new_name: Option<&str>) -> Result<String> {
        let mut value: Value = serde_json::from_str(json)?;

        let errors = validate_structure(&value);
        if !errors.is_empty() {
            codesh_logger::warn(format!(
                "Rejected theme import '{}': {}",
                file_name,
                errors.join("; ")
            ));
            return Err(ThemeError::ValidationFailed(errors));
        }

        normalize_theme_colors(&mut value);
        let variant = detect_theme_type(&value);
        if let Some(obj) = value.as_object_mut() {
            obj.insert("type".to_string(), Value::String(variant.as_str().to_string()));
        }

        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let document_name = value.get("name").and_then(Value::as_str);
        let slug = [new_name, document_name, Some(stem)]
            .into_iter()
            .flatten()
            .map(slugify)
            .find(|slug| !slug.is_empty())
            .unwrap_or_else(|| FALLBACK_IMPORT_NAME.to_string());
        let final_name = unique_name(self.custom.as_ref(), &slug)?;

        let mut doc: ThemeDocument = serde_json::from_value(value)?;
        let original_file = Path::new(file_name)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        doc.metadata = Metadata {
            created: Some(timestamp()),
            imported: Some(true),
            original_file: Some(original_file.to_string()),
            generator: Some(GENERATOR.to_string()),
            ..Metadata::default()
        };

        self.save(&final_name, doc)?;
        codesh_logger::info(format!("Imported theme '{}' from {}", final_name, file_name));
        Ok(final_name)
    }

    /// Pretty JSON of a theme without its `_metadata`.
    pub fn export(&self, name: &str) -> Result<String> {
        let mut doc = self.get(name)?;
        doc.metadata = Metadata::default();
        Ok(doc.to_json_pretty()?)
    }

    pub fn generate(&self, core: &PartialCoreColors, variant: ThemeVariant) -> ThemeDocument {
        synth::generate(core, variant)
    }

    /// Synthesize a theme from `core` and save it as `name`.
    pub fn save_generated(
        &self,
        name: &str,
        title: Option<&str>,
        core: &PartialCoreColors,
        variant: ThemeVariant,
    ) -> Result<ThemeDocument> {
        check_identifier(name)?;
        let mut doc = synth::generate(core, variant);
        doc.display_name = Some(match title {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => display_name(name),
        });
        self.save(name, doc)
    }

    /// Core colors of a stored theme.
    pub fn extract_core_colors(&self, name: &str) -> Result<CoreColorSet> {
        Ok(extract_core_colors(&self.get(name)?))
    }
}

fn check_identifier(name: &str) -> Result<()> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(ThemeError::InvalidIdentifier(name.to_string()))
    }
}

fn normalized(doc: ThemeDocument) -> Result<ThemeDocument> {
    let mut value = serde_json::to_value(doc)?;
    normalize_theme_colors(&mut value);
    Ok(serde_json::from_value(value)?)
}

fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Summaries of every parseable document in `store`; others are skipped.
fn summarize(store: &dyn JsonStore, custom: bool) -> Result<Vec<ThemeSummary>> {
    let mut out = Vec::new();
    for name in store.list()? {
        let Some(json) = store.get(&name)? else {
            continue;
        };
        match serde_json::from_str::<ThemeDocument>(&json) {
            Ok(doc) => out.push(ThemeSummary::new(&name, &doc, custom)),
            Err(e) => codesh_logger::warn(format!("Skipping unreadable theme '{}': {}", name, e)),
        }
    }
    Ok(out)
}
