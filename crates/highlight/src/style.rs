//! Resolve TextMate scopes against a theme's `tokenColors`.

use codesh_theme::{scope_matches, CoreColor, FontStyle, ThemeDocument};

use crate::scope::{textmate_scope, HIGHLIGHT_NAMES};

/// Resolved style of one token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStyle {
    pub foreground: Option<String>,
    pub font_style: Option<FontStyle>,
}

impl TokenStyle {
    pub fn is_plain(&self) -> bool {
        self.foreground.is_none() && self.font_style.is_none()
    }

    /// CSS declarations, each property name prefixed by `prefix`
    /// (empty for plain `color:`/`font-style:`).
    pub fn css(&self, color_property: &str, prefix: &str) -> Vec<String> {
        let mut decls = Vec::new();
        if let Some(fg) = &self.foreground {
            decls.push(format!("{}:{}", color_property, fg));
        }
        if let Some(style) = &self.font_style {
            if style.has("italic") {
                decls.push(format!("{}font-style:italic", prefix));
            }
            if style.has("bold") {
                decls.push(format!("{}font-weight:bold", prefix));
            }
            if style.has("underline") {
                decls.push(format!("{}text-decoration:underline", prefix));
            } else if style.has("strikethrough") {
                decls.push(format!("{}text-decoration:line-through", prefix));
            }
        }
        decls
    }
}

/// Colors of a theme resolved for every highlight capture.
#[derive(Debug, Clone)]
pub struct ThemeStyler {
    pub background: String,
    pub foreground: String,
    captures: Vec<TokenStyle>,
}

impl ThemeStyler {
    pub fn new(theme: &ThemeDocument) -> Self {
        let captures = HIGHLIGHT_NAMES
            .iter()
            .map(|name| resolve_scope(theme, textmate_scope(name)))
            .collect();

        // Scope-less rules set the editor-wide defaults in older themes.
        let global = theme.token_colors.iter().find(|rule| rule.scope.is_empty());
        let pick = |ui_key: &str, from_rule: Option<&String>, role: CoreColor| {
            theme
                .color(ui_key)
                .map(str::to_string)
                .or_else(|| from_rule.cloned())
                .unwrap_or_else(|| role.default_hex(theme.variant).to_string())
        };

        Self {
            background: pick(
                "editor.background",
                global.and_then(|r| r.settings.background.as_ref()),
                CoreColor::Background,
            ),
            foreground: pick(
                "editor.foreground",
                global.and_then(|r| r.settings.foreground.as_ref()),
                CoreColor::Foreground,
            ),
            captures,
        }
    }

    /// Style for the capture at `index` in [`HIGHLIGHT_NAMES`].
    pub fn capture(&self, index: usize) -> Option<&TokenStyle> {
        self.captures.get(index)
    }
}

/// Style `theme` gives to `scope`.
///
/// A rule selector applies when `scope` equals it or extends it by whole
/// segments. Foreground and font style are resolved separately; the
/// selector with the most segments wins and later rules win ties.
/// Descendant selectors (containing spaces) need context and are skipped.
pub fn resolve_scope(theme: &ThemeDocument, scope: &str) -> TokenStyle {
    let mut fg: Option<(usize, &str)> = None;
    let mut font: Option<(usize, &FontStyle)> = None;

    for rule in &theme.token_colors {
        let specificity = rule
            .scope
            .iter()
            .filter(|sel| !sel.contains(char::is_whitespace))
            .filter(|sel| scope_matches(scope, sel))
            .map(|sel| sel.split('.').count())
            .max();
        let Some(specificity) = specificity else {
            continue;
        };

        if let Some(color) = rule.foreground() {
            if fg.map_or(true, |(best, _)| specificity >= best) {
                fg = Some((specificity, color));
            }
        }
        if let Some(style) = &rule.settings.font_style {
            if font.map_or(true, |(best, _)| specificity >= best) {
                font = Some((specificity, style));
            }
        }
    }

    TokenStyle {
        foreground: fg.map(|(_, c)| c.to_string()),
        font_style: font
            .map(|(_, s)| s.clone())
            .filter(|s| !s.as_str().trim().is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codesh_theme::{generate_from_set, CoreColorSet, ThemeVariant, TokenRule};

    #[test]
    fn test_specificity_and_order() {
        let mut theme = ThemeDocument::new("t", ThemeVariant::Dark);
        theme.token_colors = vec![
            TokenRule::new(["keyword.operator"], "#111111"),
            TokenRule::new(["keyword"], "#222222"),
            TokenRule::new(["keyword.operator"], "#333333"),
            TokenRule::new(["comment.block.documentation punctuation"], "#444444"),
        ];

        assert_eq!(
            resolve_scope(&theme, "keyword.operator.new").foreground.as_deref(),
            Some("#333333")
        );
        assert_eq!(
            resolve_scope(&theme, "keyword.control").foreground.as_deref(),
            Some("#222222")
        );
        assert!(resolve_scope(&theme, "punctuation").is_plain());
    }

    #[test]
    fn test_font_style_resolved_independently() {
        let mut theme = ThemeDocument::new("t", ThemeVariant::Dark);
        theme.token_colors = vec![
            TokenRule::new(["comment"], "#7F848E").with_font_style(FontStyle::Italic),
            TokenRule::new(["comment.line"], "#999999"),
        ];
        let style = resolve_scope(&theme, "comment.line.double-slash");
        assert_eq!(style.foreground.as_deref(), Some("#999999"));
        assert_eq!(style.font_style, Some(FontStyle::Italic));
        assert_eq!(style.css("color", ""), vec!["color:#999999", "font-style:italic"]);
    }

    #[test]
    fn test_generated_theme_colors_captures() {
        let core = CoreColorSet::defaults(ThemeVariant::Dark);
        let styler = ThemeStyler::new(&generate_from_set(&core, ThemeVariant::Dark));
        assert_eq!(styler.background, core.background);
        assert_eq!(styler.foreground, core.foreground);

        let index = |name: &str| HIGHLIGHT_NAMES.iter().position(|n| *n == name).unwrap();
        let keyword = styler.capture(index("keyword")).unwrap();
        assert_eq!(keyword.foreground.as_deref(), Some(core.keyword.as_str()));
        let comment = styler.capture(index("comment")).unwrap();
        assert_eq!(comment.font_style, Some(FontStyle::Italic));
        let func = styler.capture(index("function")).unwrap();
        assert_eq!(func.foreground.as_deref(), Some(core.function.as_str()));
    }

    #[test]
    fn test_defaults_from_global_rule() {
        let mut theme = ThemeDocument::new("old", ThemeVariant::Light);
        let mut global = TokenRule::new(Vec::<String>::new(), "#010203");
        global.settings.background = Some("#F0F0F0".to_string());
        theme.token_colors.push(global);

        let styler = ThemeStyler::new(&theme);
        assert_eq!(styler.foreground, "#010203");
        assert_eq!(styler.background, "#F0F0F0");
    }
}
