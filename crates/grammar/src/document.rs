//! TextMate grammar documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generator tag written into `_metadata.generator`.
pub const GENERATOR: &str = "CodeSh Grammar Manager";

/// A TextMate grammar.
///
/// Only the fields codesh inspects are typed; the grammar body
/// (`patterns`, `repository`, `injections`, …) is kept as-is in `rest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_types: Vec<String>,
    #[serde(rename = "_metadata", default, skip_serializing_if = "GrammarMetadata::is_empty")]
    pub metadata: GrammarMetadata,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl GrammarDocument {
    pub fn has_patterns(&self) -> bool {
        self.rest.contains_key("patterns")
    }

    pub fn has_repository(&self) -> bool {
        self.rest.contains_key("repository")
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GrammarMetadata {
    pub fn is_empty(&self) -> bool {
        *self == GrammarMetadata::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_is_preserved() {
        let value = json!({
            "name": "Shortcode",
            "scopeName": "text.html.shortcode",
            "fileTypes": ["md"],
            "patterns": [{"include": "#tag"}],
            "repository": {"tag": {"match": "\\[\\w+\\]", "name": "entity.name.tag"}}
        });
        let doc: GrammarDocument = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(doc.scope_name.as_deref(), Some("text.html.shortcode"));
        assert_eq!(doc.file_types, vec!["md"]);
        assert!(doc.has_patterns() && doc.has_repository());
        assert!(doc.metadata.is_empty());
        assert_eq!(serde_json::to_value(&doc).unwrap(), value);
    }
}
