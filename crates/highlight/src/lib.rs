//! Theme-driven HTML syntax highlighting using tree-sitter.
//!
//! Code is tokenized by tree-sitter, each capture is mapped to a TextMate
//! scope, and the scope is colored from a VS Code theme document. On top
//! of the raw highlighter this crate assembles complete code blocks and
//! tabbed block groups, rewrites plain `<pre><code>` blocks in rendered
//! pages, renders theme previews and caches rendered blocks on disk.

mod block;
mod cache;
mod engine;
mod error;
mod group;
mod html;
mod language;
mod page;
mod preview;
mod scope;
mod style;

use std::collections::BTreeMap;

use codesh_theme::ThemeDocument;

pub use block::{
    error_block, extract_fenced, parse_bool, parse_line_spec, render_code_block,
    CodeBlockOptions, ThemeRef, ThemeResolver,
};
pub use cache::RenderCache;
pub use engine::TreeSitterHighlighter;
pub use error::{HighlightError, Result};
pub use group::render_code_group;
pub use html::{decode_entities, escape_html};
pub use language::{
    canonical_language, detect_language, is_plain, PLAIN_LANGUAGES, SUPPORTED_LANGUAGES,
};
pub use page::process_page_content;
pub use preview::{preview_languages, preview_sample, render_preview};
pub use scope::{textmate_scope, HIGHLIGHT_NAMES};
pub use style::{resolve_scope, ThemeStyler, TokenStyle};

/// Renders source code to a `<pre>` element colored by a theme.
pub trait Highlighter {
    fn highlight(
        &self,
        code: &str,
        language: &str,
        theme: &ThemeSelection,
        decorations: &Decorations,
    ) -> Result<String>;

    /// Whether `language` (or one of its aliases) can be highlighted.
    fn supports(&self, language: &str) -> bool;
}

/// Resolved theme(s) for one highlight call.
#[derive(Debug, Clone)]
pub enum ThemeSelection {
    Single(ThemeDocument),
    Dual {
        light: ThemeDocument,
        dark: ThemeDocument,
    },
}

impl ThemeSelection {
    pub fn is_dual(&self) -> bool {
        matches!(self, ThemeSelection::Dual { .. })
    }
}

/// Line-level decorations applied while assembling the `<pre>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorations {
    /// Emit a `line-number` span at the start of each line
    pub gutter: bool,
    pub start_line: i64,
    /// Extra classes keyed by 1-based line index
    pub line_classes: BTreeMap<usize, Vec<String>>,
    pub pre_classes: Vec<String>,
}

impl Default for Decorations {
    fn default() -> Self {
        Self {
            gutter: false,
            start_line: 1,
            line_classes: BTreeMap::new(),
            pre_classes: Vec::new(),
        }
    }
}

impl Decorations {
    pub fn add_line_class(&mut self, line: usize, class: &str) {
        let classes = self.line_classes.entry(line).or_default();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_classes_are_unique() {
        let mut deco = Decorations::default();
        deco.add_line_class(3, "highlight");
        deco.add_line_class(3, "focus");
        deco.add_line_class(3, "highlight");
        assert_eq!(deco.line_classes[&3], vec!["highlight", "focus"]);
        assert_eq!(deco.start_line, 1);
    }
}
