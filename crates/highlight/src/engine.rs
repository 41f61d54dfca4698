//! Tree-sitter backed [`Highlighter`].

use std::collections::HashMap;

use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter as TsHighlighter};

use crate::error::{HighlightError, Result};
use crate::html::escape_html;
use crate::language::{canonical_language, is_plain};
use crate::scope::HIGHLIGHT_NAMES;
use crate::style::{ThemeStyler, TokenStyle};
use crate::{Decorations, Highlighter, ThemeSelection};

/// Highlighter owning one tree-sitter configuration per supported language.
///
/// Building the configurations compiles every highlight query, so create
/// one instance and share it.
pub struct TreeSitterHighlighter {
    configs: HashMap<&'static str, HighlightConfiguration>,
}

impl TreeSitterHighlighter {
    pub fn new() -> Self {
        let mut configs = HashMap::new();
        let highlight_names: Vec<String> = HIGHLIGHT_NAMES.iter().map(|s| s.to_string()).collect();

        Self::load_language_config(
            &mut configs,
            "rust",
            tree_sitter_rust::LANGUAGE.into(),
            tree_sitter_rust::HIGHLIGHTS_QUERY,
            "",
            &highlight_names,
        );

        Self::load_language_config(
            &mut configs,
            "python",
            tree_sitter_python::LANGUAGE.into(),
            tree_sitter_python::HIGHLIGHTS_QUERY,
            "",
            &highlight_names,
        );

        Self::load_language_config(
            &mut configs,
            "javascript",
            tree_sitter_javascript::LANGUAGE.into(),
            tree_sitter_javascript::HIGHLIGHT_QUERY,
            tree_sitter_javascript::INJECTIONS_QUERY,
            &highlight_names,
        );

        Self::load_language_config(
            &mut configs,
            "php",
            tree_sitter_php::LANGUAGE_PHP.into(),
            tree_sitter_php::HIGHLIGHTS_QUERY,
            tree_sitter_php::INJECTIONS_QUERY,
            &highlight_names,
        );

        // Web technologies
        Self::load_language_config(
            &mut configs,
            "html",
            tree_sitter_html::LANGUAGE.into(),
            tree_sitter_html::HIGHLIGHTS_QUERY,
            tree_sitter_html::INJECTIONS_QUERY,
            &highlight_names,
        );

        Self::load_language_config(
            &mut configs,
            "css",
            tree_sitter_css::LANGUAGE.into(),
            tree_sitter_css::HIGHLIGHTS_QUERY,
            "",
            &highlight_names,
        );

        Self::load_language_config(
            &mut configs,
            "json",
            tree_sitter_json::LANGUAGE.into(),
            tree_sitter_json::HIGHLIGHTS_QUERY,
            "",
            &highlight_names,
        );

        Self { configs }
    }

    fn load_language_config(
        configs: &mut HashMap<&'static str, HighlightConfiguration>,
        name: &'static str,
        language: tree_sitter::Language,
        highlights_query: &str,
        injections_query: &str,
        highlight_names: &[String],
    ) {
        match HighlightConfiguration::new(language, name, highlights_query, injections_query, "") {
            Ok(mut config) => {
                config.configure(highlight_names);
                configs.insert(name, config);
            }
            Err(e) => {
                codesh_logger::error(format!("Failed to load {} highlight queries: {}", name, e));
            }
        }
    }

    pub fn get_config(&self, language: &str) -> Option<&HighlightConfiguration> {
        self.configs.get(canonical_language(language)?)
    }

    /// Per-line inner HTML of `code`.
    fn highlight_lines(&self, code: &str, language: &str, palette: &Palette) -> Result<Vec<String>> {
        if is_plain(language) {
            return Ok(code.split('\n').map(escape_html).collect());
        }

        let config = self
            .get_config(language)
            .ok_or_else(|| HighlightError::UnsupportedLanguage(language.to_string()))?;

        let mut highlighter = TsHighlighter::new();
        let events = highlighter
            .highlight(config, code.as_bytes(), None, |name| self.get_config(name))
            .map_err(|e| HighlightError::Engine(format!("{:?}", e)))?;

        let mut lines = vec![String::new()];
        let mut stack: Vec<usize> = Vec::new();

        for event in events {
            match event.map_err(|e| HighlightError::Engine(format!("{:?}", e)))? {
                HighlightEvent::Source { start, end } => {
                    let text = code.get(start..end).unwrap_or_default();
                    let style = stack.last().and_then(|&i| palette.captures.get(i));
                    for (n, piece) in text.split('\n').enumerate() {
                        if n > 0 {
                            lines.push(String::new());
                        }
                        if let Some(line) = lines.last_mut() {
                            push_span(line, piece, style.map(String::as_str));
                        }
                    }
                }
                HighlightEvent::HighlightStart(highlight) => stack.push(highlight.0),
                HighlightEvent::HighlightEnd => {
                    stack.pop();
                }
            }
        }

        Ok(lines)
    }
}

impl Default for TreeSitterHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for TreeSitterHighlighter {
    fn highlight(
        &self,
        code: &str,
        language: &str,
        theme: &ThemeSelection,
        decorations: &Decorations,
    ) -> Result<String> {
        let code = code.replace("\r\n", "\n");
        let palette = Palette::new(theme);
        let lines = self.highlight_lines(&code, language, &palette)?;
        Ok(assemble(&lines, &palette, decorations, language))
    }

    fn supports(&self, language: &str) -> bool {
        is_plain(language) || self.get_config(language).is_some()
    }
}

/// Inline styles for one theme selection.
struct Palette {
    pre_style: String,
    /// Style attribute per capture index; empty when uncolored
    captures: Vec<String>,
}

impl Palette {
    fn new(theme: &ThemeSelection) -> Self {
        match theme {
            ThemeSelection::Single(doc) => {
                let styler = ThemeStyler::new(doc);
                Self {
                    pre_style: format!(
                        "background-color:{};color:{}",
                        styler.background, styler.foreground
                    ),
                    captures: capture_styles(|i| {
                        styler.capture(i).map(|s| s.css("color", "")).unwrap_or_default()
                    }),
                }
            }
            ThemeSelection::Dual { light, dark } => {
                let light = ThemeStyler::new(light);
                let dark = ThemeStyler::new(dark);
                let css = |styler: &ThemeStyler, i: usize, mode: &str| {
                    styler
                        .capture(i)
                        .map(|s: &TokenStyle| {
                            s.css(&format!("--codesh-{}", mode), &format!("--codesh-{}-", mode))
                        })
                        .unwrap_or_default()
                };
                Self {
                    pre_style: format!(
                        "--codesh-light-bg:{};--codesh-light:{};--codesh-dark-bg:{};--codesh-dark:{}",
                        light.background, light.foreground, dark.background, dark.foreground
                    ),
                    captures: capture_styles(|i| {
                        let mut decls = css(&light, i, "light");
                        decls.extend(css(&dark, i, "dark"));
                        decls
                    }),
                }
            }
        }
    }
}

fn capture_styles(mut decls: impl FnMut(usize) -> Vec<String>) -> Vec<String> {
    (0..HIGHLIGHT_NAMES.len()).map(|i| decls(i).join(";")).collect()
}

fn push_span(line: &mut String, text: &str, style: Option<&str>) {
    if text.is_empty() {
        return;
    }
    match style {
        Some(style) if !style.is_empty() => {
            line.push_str("<span style=\"");
            line.push_str(&escape_html(style));
            line.push_str("\">");
            line.push_str(&escape_html(text));
            line.push_str("</span>");
        }
        _ => line.push_str(&escape_html(text)),
    }
}

fn assemble(lines: &[String], palette: &Palette, decorations: &Decorations, language: &str) -> String {
    let mut pre_class = String::from("codesh");
    for class in &decorations.pre_classes {
        pre_class.push(' ');
        pre_class.push_str(class);
    }

    let mut html = format!(
        "<pre class=\"{}\" style=\"{}\"><code data-language=\"{}\">",
        escape_html(&pre_class),
        escape_html(&palette.pre_style),
        escape_html(language)
    );

    for (idx, content) in lines.iter().enumerate() {
        if idx > 0 {
            html.push('\n');
        }
        html.push_str("<span class=\"line");
        if let Some(classes) = decorations.line_classes.get(&(idx + 1)) {
            for class in classes {
                html.push(' ');
                html.push_str(&escape_html(class));
            }
        }
        html.push_str("\">");
        if decorations.gutter {
            html.push_str(&format!(
                "<span class=\"line-number\">{}</span>",
                decorations.start_line + idx as i64
            ));
        }
        html.push_str(content);
        html.push_str("</span>");
    }

    html.push_str("</code></pre>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use codesh_theme::{builtin_theme_by_name, CoreColorSet, ThemeVariant};

    fn dark() -> ThemeSelection {
        ThemeSelection::Single(builtin_theme_by_name("codesh-dark").unwrap().clone())
    }

    #[test]
    fn test_supported_languages_load() {
        let hl = TreeSitterHighlighter::new();
        for lang in crate::SUPPORTED_LANGUAGES {
            assert!(hl.supports(lang), "{lang}");
        }
        assert!(hl.supports("js"));
        assert!(hl.supports("txt"));
        assert!(!hl.supports("cobol"));
    }

    #[test]
    fn test_highlight_rust_uses_theme_colors() {
        let hl = TreeSitterHighlighter::new();
        let html = hl
            .highlight("fn main() {\n    let x = 1;\n}", "rust", &dark(), &Decorations::default())
            .unwrap();

        let core = CoreColorSet::defaults(ThemeVariant::Dark);
        assert!(html.starts_with("<pre class=\"codesh\" style=\"background-color:#1F1F22;color:#ABB2BF\">"));
        assert!(html.contains(&format!("<span style=\"color:{}\">fn</span>", core.keyword)));
        assert!(html.contains(&format!("color:{}\">1</span>", core.number)));
        assert_eq!(html.matches("<span class=\"line\">").count(), 3);
        assert!(html.ends_with("</code></pre>"));
    }

    #[test]
    fn test_decorations() {
        let hl = TreeSitterHighlighter::new();
        let mut deco = Decorations {
            gutter: true,
            start_line: 10,
            ..Decorations::default()
        };
        deco.add_line_class(2, "highlight");
        deco.pre_classes.push("no-highlight".to_string());

        let html = hl
            .highlight("a\nb<c>\nd", "txt", &dark(), &deco)
            .unwrap();
        assert!(html.starts_with("<pre class=\"codesh no-highlight\""));
        assert!(html.contains(
            "<span class=\"line highlight\"><span class=\"line-number\">11</span>b&lt;c&gt;</span>"
        ));
        assert!(html.contains("<span class=\"line-number\">12</span>d"));
    }

    #[test]
    fn test_dual_theme_variables() {
        let hl = TreeSitterHighlighter::new();
        let theme = ThemeSelection::Dual {
            light: builtin_theme_by_name("codesh-light").unwrap().clone(),
            dark: builtin_theme_by_name("codesh-dark").unwrap().clone(),
        };
        let html = hl
            .highlight("{\"a\": true}", "json", &theme, &Decorations::default())
            .unwrap();
        assert!(html.contains("--codesh-light-bg:#FAFAFA"));
        assert!(html.contains("--codesh-dark-bg:#1F1F22"));
        assert!(!html.contains("background-color"));
    }

    #[test]
    fn test_unsupported_language() {
        let hl = TreeSitterHighlighter::new();
        let err = hl
            .highlight("x", "cobol", &dark(), &Decorations::default())
            .unwrap_err();
        assert!(matches!(err, HighlightError::UnsupportedLanguage(_)));
    }
}
