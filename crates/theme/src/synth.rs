//! Expand core colors into a complete theme.
//!
//! Output is a pure function of the resolved core colors and the variant:
//! the same inputs always produce byte-identical JSON. Timestamps are added
//! by [`crate::ThemeManager`] when a theme is saved, not here.

use codesh_color::Color;
use indexmap::IndexMap;

use crate::document::{FontStyle, Metadata, ThemeDocument, TokenRule, GENERATOR};
use crate::{CoreColor, CoreColorSet, PartialCoreColors, ThemeVariant};

/// Identifier given to freshly generated themes.
pub const GENERATED_NAME: &str = "custom-theme";
pub const GENERATED_DISPLAY_NAME: &str = "Custom Theme";

/// Synthesize a theme from possibly incomplete core colors.
pub fn generate(core: &PartialCoreColors, variant: ThemeVariant) -> ThemeDocument {
    generate_from_set(&core.resolve(variant), variant)
}

/// Synthesize a theme from a complete core color set.
pub fn generate_from_set(core: &CoreColorSet, variant: ThemeVariant) -> ThemeDocument {
    let mut doc = ThemeDocument::new(GENERATED_NAME, variant);
    doc.display_name = Some(GENERATED_DISPLAY_NAME.to_string());
    doc.colors = ui_colors(core, variant);
    doc.token_colors = token_colors(core, variant);
    doc.metadata = Metadata {
        generator: Some(GENERATOR.to_string()),
        core_colors: Some(core.clone()),
        ..Metadata::default()
    };
    doc
}

/// Editor-chrome colors derived from background, foreground and accent
/// (the `function` color).
///
/// Surfaces step away from the base background by `step` lightness points
/// per layer: lighter for dark themes, darker for light ones.
pub fn ui_colors(core: &CoreColorSet, variant: ThemeVariant) -> IndexMap<String, String> {
    let bg = core.color(CoreColor::Background, variant);
    let fg = core.color(CoreColor::Foreground, variant);
    let accent = core.color(CoreColor::Function, variant);
    let is_light = variant.is_light();
    let step = if is_light { -3.0 } else { 3.0 };

    let layer = |n: f64| bg.adjust_brightness(step * n).to_hex();
    let fade = |c: Color, opacity: f64| c.alpha(opacity).to_hex();
    // Text on accent-colored buttons and badges.
    let on_accent = if is_light { Color::WHITE } else { bg }.to_hex();

    let bg_hex = bg.to_hex();
    let fg_hex = fg.to_hex();
    let accent_hex = accent.to_hex();
    let string = core.color(CoreColor::String, variant);

    let entries: Vec<(&str, String)> = vec![
        ("editor.background", bg_hex.clone()),
        ("editor.foreground", fg_hex.clone()),
        ("editor.lineHighlightBackground", layer(1.0)),
        ("editor.selectionBackground", fade(accent, 0.2)),
        ("editorCursor.foreground", accent_hex.clone()),
        ("editorLineNumber.foreground", fade(fg, 0.4)),
        ("editorLineNumber.activeForeground", fg_hex.clone()),
        ("editorIndentGuide.background", fade(fg, 0.1)),
        ("editorIndentGuide.activeBackground", fade(fg, 0.3)),
        ("editorWhitespace.foreground", fade(fg, 0.1)),
        ("editorRuler.foreground", fade(fg, 0.1)),
        // Sidebar
        ("sideBar.background", layer(1.0)),
        ("sideBar.foreground", fg_hex.clone()),
        ("sideBarTitle.foreground", fg_hex.clone()),
        ("sideBarSectionHeader.background", bg_hex.clone()),
        // Activity bar
        ("activityBar.background", layer(2.0)),
        ("activityBar.foreground", fg_hex.clone()),
        ("activityBarBadge.background", accent_hex.clone()),
        ("activityBarBadge.foreground", on_accent.clone()),
        // Status bar
        ("statusBar.background", layer(1.0)),
        ("statusBar.foreground", fade(fg, 0.8)),
        ("statusBar.noFolderBackground", layer(1.0)),
        // Tabs
        ("tab.activeBackground", bg_hex.clone()),
        ("tab.activeForeground", fg_hex.clone()),
        ("tab.inactiveBackground", layer(1.0)),
        ("tab.inactiveForeground", fade(fg, 0.6)),
        ("tab.border", layer(3.0)),
        ("editorGroupHeader.tabsBackground", layer(1.0)),
        // Input fields sink below the background instead of rising above it
        (
            "input.background",
            bg.adjust_brightness(if is_light { 3.0 } else { -2.0 }).to_hex(),
        ),
        ("input.foreground", fg_hex.clone()),
        ("input.border", fade(fg, 0.1)),
        ("input.placeholderForeground", fade(fg, 0.4)),
        // Buttons
        ("button.background", accent_hex.clone()),
        ("button.foreground", on_accent.clone()),
        ("button.hoverBackground", accent.adjust_brightness(5.0).to_hex()),
        // Focus & selection
        ("focusBorder", accent_hex.clone()),
        ("list.activeSelectionBackground", fade(accent, 0.15)),
        ("list.activeSelectionForeground", fg_hex.clone()),
        ("list.hoverBackground", fade(fg, 0.05)),
        ("list.inactiveSelectionBackground", fade(accent, 0.1)),
        // Widgets
        ("editorWidget.background", layer(1.0)),
        ("editorWidget.border", layer(3.0)),
        ("editorHoverWidget.background", layer(1.0)),
        ("editorHoverWidget.border", layer(3.0)),
        ("editorSuggestWidget.background", layer(1.0)),
        ("editorSuggestWidget.border", layer(3.0)),
        ("editorSuggestWidget.selectedBackground", fade(accent, 0.15)),
        // Scrollbar
        ("scrollbarSlider.background", fade(fg, 0.2)),
        ("scrollbarSlider.hoverBackground", fade(fg, 0.3)),
        ("scrollbarSlider.activeBackground", fade(fg, 0.4)),
        // Notifications
        ("notification.background", layer(2.0)),
        // Diagnostics
        (
            "editorError.foreground",
            core.color(CoreColor::Variable, variant).to_hex(),
        ),
        (
            "editorWarning.foreground",
            core.color(CoreColor::Number, variant).to_hex(),
        ),
        ("editorInfo.foreground", accent_hex.clone()),
        // Title bar
        ("titleBar.activeBackground", layer(1.0)),
        ("titleBar.activeForeground", fg_hex.clone()),
        ("titleBar.inactiveBackground", layer(1.0)),
        ("titleBar.inactiveForeground", fade(fg, 0.6)),
        // Dropdown
        ("dropdown.background", layer(1.0)),
        ("dropdown.border", layer(3.0)),
        // Peek view
        ("peekView.border", accent_hex.clone()),
        ("peekViewEditor.background", bg_hex.clone()),
        ("peekViewResult.background", layer(1.0)),
        ("peekViewTitle.background", bg_hex),
        // Badge
        ("badge.background", accent_hex),
        ("badge.foreground", on_accent),
        // Extension button
        ("extensionButton.prominentBackground", string.to_hex()),
        (
            "extensionButton.prominentHoverBackground",
            string.adjust_brightness(5.0).to_hex(),
        ),
    ];

    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Where a token rule takes its foreground from.
#[derive(Clone, Copy)]
enum Ink {
    Core(CoreColor),
    Brighter(CoreColor, f64),
}

#[derive(Clone, Copy)]
enum Style {
    Italic,
    Bold,
    Strikethrough,
}

use crate::CoreColor::{
    Comment, Foreground, Function, Keyword, Number, Operator, String as Str, Type, Variable,
};

const fn ink(c: CoreColor) -> Ink {
    Ink::Core(c)
}

/// Fixed scope → color table. Order matters to consumers that match in
/// document order, and changing it changes generated JSON.
const TOKEN_TABLE: &[(&[&str], Ink, Option<Style>)] = &[
    // Comments
    (&["comment", "punctuation.definition.comment"], ink(Comment), Some(Style::Italic)),
    (
        &["comment.block.documentation", "comment.block.documentation punctuation"],
        ink(Comment),
        Some(Style::Italic),
    ),
    // Keywords
    (&["keyword", "keyword.control", "keyword.control.flow"], ink(Keyword), None),
    (&["storage", "storage.type", "storage.modifier"], ink(Keyword), None),
    (
        &["keyword.operator.new", "keyword.operator.expression", "keyword.operator.logical"],
        ink(Keyword),
        None,
    ),
    // Strings
    (
        &["string", "string.quoted", "string.quoted.single", "string.quoted.double"],
        ink(Str),
        None,
    ),
    (&["string.template", "string.interpolated"], ink(Str), None),
    (&["string.regexp"], ink(Operator), None),
    (&["punctuation.definition.string"], ink(Str), None),
    // Numbers and constants
    (
        &["constant.numeric", "constant.numeric.integer", "constant.numeric.float"],
        ink(Number),
        None,
    ),
    (&["constant.language", "constant.language.boolean"], ink(Number), None),
    (&["constant.character", "constant.character.escape"], ink(Number), None),
    // Functions
    (&["entity.name.function", "entity.name.function.member"], ink(Function), None),
    (&["support.function", "support.function.builtin"], ink(Function), None),
    (
        &["meta.function-call", "meta.method-call entity.name.function"],
        ink(Function),
        None,
    ),
    (&["keyword.other.special-method"], Ink::Brighter(Function, 10.0), None),
    // Types and classes
    (&["entity.name.type", "entity.name.type.class"], ink(Type), None),
    (&["entity.name.class", "entity.other.inherited-class"], ink(Type), None),
    (&["support.class", "support.type"], ink(Type), None),
    (&["entity.name.type.interface", "entity.name.type.enum"], ink(Type), None),
    (&["entity.name.namespace", "entity.name.module"], ink(Type), None),
    // Variables
    (
        &["variable", "variable.other", "variable.other.readwrite"],
        ink(Variable),
        None,
    ),
    (
        &["variable.parameter", "variable.parameter.function"],
        ink(Foreground),
        Some(Style::Italic),
    ),
    (&["variable.other.constant", "variable.other.enummember"], ink(Number), None),
    (
        &["variable.language", "variable.language.this", "variable.language.self"],
        ink(Variable),
        None,
    ),
    // Operators and punctuation
    (
        &["keyword.operator", "keyword.operator.assignment", "keyword.operator.arithmetic"],
        ink(Operator),
        None,
    ),
    (&["keyword.operator.comparison", "keyword.operator.relational"], ink(Operator), None),
    (
        &["punctuation", "punctuation.separator", "punctuation.terminator"],
        ink(Foreground),
        None,
    ),
    (&["punctuation.section", "punctuation.section.embedded"], ink(Variable), None),
    (&["meta.brace", "punctuation.definition.block"], ink(Foreground), None),
    // Properties and attributes
    (&["entity.other.attribute-name"], ink(Number), Some(Style::Italic)),
    (&["support.type.property-name", "entity.name.tag.css"], ink(Foreground), None),
    (&["support.type.property-name.json"], ink(Variable), None),
    // Tags
    (&["entity.name.tag", "entity.name.tag.html"], ink(Variable), None),
    (&["punctuation.definition.tag"], ink(Foreground), None),
    // Markup
    (&["markup.heading", "markup.heading entity.name"], ink(Variable), Some(Style::Bold)),
    (&["markup.bold"], ink(Number), Some(Style::Bold)),
    (&["markup.italic"], ink(Keyword), Some(Style::Italic)),
    (&["markup.inline.raw", "markup.raw.inline"], ink(Str), None),
    (&["markup.underline.link"], ink(Function), None),
    (&["markup.quote"], ink(Comment), Some(Style::Italic)),
    (&["markup.list", "punctuation.definition.list"], ink(Variable), None),
    // Diff
    (
        &["markup.inserted", "markup.inserted.git_gutter", "diff.inserted"],
        ink(Str),
        None,
    ),
    (
        &["markup.deleted", "markup.deleted.git_gutter", "diff.deleted"],
        ink(Variable),
        None,
    ),
    (
        &["markup.changed", "markup.changed.git_gutter", "diff.changed"],
        ink(Number),
        None,
    ),
    (&["meta.diff.range", "meta.diff.header"], ink(Function), Some(Style::Bold)),
    // CSS
    (
        &["support.constant.property-value", "support.constant.font-name"],
        ink(Str),
        None,
    ),
    (
        &["entity.other.attribute-name.class.css", "entity.other.attribute-name.id.css"],
        ink(Type),
        None,
    ),
    (
        &[
            "entity.other.attribute-name.pseudo-class",
            "entity.other.attribute-name.pseudo-element",
        ],
        ink(Function),
        None,
    ),
    (&["support.constant.color", "constant.other.color"], ink(Number), None),
    // Invalid / deprecated
    (&["invalid", "invalid.illegal"], ink(Variable), None),
    (&["invalid.deprecated"], ink(Number), Some(Style::Strikethrough)),
];

/// The fixed, ordered token rule list colored from `core`.
pub fn token_colors(core: &CoreColorSet, variant: ThemeVariant) -> Vec<TokenRule> {
    TOKEN_TABLE
        .iter()
        .map(|(scopes, ink, style)| {
            let color = match *ink {
                Ink::Core(key) => core.color(key, variant),
                Ink::Brighter(key, pct) => core.color(key, variant).adjust_brightness(pct),
            };
            let rule = TokenRule::new(scopes.iter().copied(), color.to_hex());
            match style {
                Some(Style::Italic) => rule.with_font_style(FontStyle::Italic),
                Some(Style::Bold) => rule.with_font_style(FontStyle::Bold),
                Some(Style::Strikethrough) => rule.with_font_style(FontStyle::Strikethrough),
                None => rule,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_core_colors;

    fn sample_core() -> PartialCoreColors {
        PartialCoreColors::default()
            .with(CoreColor::Background, "#1F1F22")
            .with(CoreColor::Foreground, "#ABB2BF")
            .with(CoreColor::Keyword, "#C678DD")
    }

    fn palettes() -> Vec<(CoreColorSet, ThemeVariant)> {
        let mut custom = CoreColorSet::defaults(ThemeVariant::Dark);
        custom.comment = "#5C6370".to_string();
        custom.operator = "#FF00AA".to_string();
        custom.function = "#123456".to_string();

        // every role the same color
        let flat = CoreColorSet::from_fn(|_| "#777777".to_string());

        vec![
            (CoreColorSet::defaults(ThemeVariant::Dark), ThemeVariant::Dark),
            (CoreColorSet::defaults(ThemeVariant::Light), ThemeVariant::Light),
            (custom.clone(), ThemeVariant::Dark),
            (custom, ThemeVariant::Light),
            (flat, ThemeVariant::Dark),
        ]
    }

    #[test]
    fn test_end_to_end_dark_scenario() {
        let doc = generate(&sample_core(), ThemeVariant::Dark);

        assert_eq!(doc.variant, ThemeVariant::Dark);
        assert_eq!(doc.color("editor.background"), Some("#1F1F22"));
        assert_eq!(doc.color("editor.foreground"), Some("#ABB2BF"));
        assert!(doc
            .token_colors
            .iter()
            .any(|r| r.scope.contains("keyword") && r.foreground() == Some("#C678DD")));
        assert_eq!(
            doc.metadata.generator.as_deref(),
            Some(crate::document::GENERATOR)
        );
        assert!(doc.metadata.created.is_none());
    }

    #[test]
    fn test_extract_after_generate_round_trips() {
        for (core, variant) in palettes() {
            let doc = generate_from_set(&core, variant);
            let extracted = extract_core_colors(&doc);
            assert_eq!(extracted, core, "variant {variant}");
        }
    }

    #[test]
    fn test_round_trip_through_json() {
        let core = CoreColorSet::defaults(ThemeVariant::Light);
        let doc = generate_from_set(&core, ThemeVariant::Light);
        let json = doc.to_json_pretty().unwrap();
        let parsed: ThemeDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
        assert_eq!(extract_core_colors(&parsed), core);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(&sample_core(), ThemeVariant::Light)
            .to_json_pretty()
            .unwrap();
        let b = generate(&sample_core(), ThemeVariant::Light)
            .to_json_pretty()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input_uses_variant_defaults() {
        let doc = generate(&PartialCoreColors::default(), ThemeVariant::Light);
        assert_eq!(doc.color("editor.background"), Some("#FAFAFA"));
        assert_eq!(
            doc.metadata.core_colors,
            Some(CoreColorSet::defaults(ThemeVariant::Light))
        );
    }

    #[test]
    fn test_ui_layers_follow_variant() {
        let dark = CoreColorSet::defaults(ThemeVariant::Dark);
        let ui = ui_colors(&dark, ThemeVariant::Dark);
        let bg = Color::from_hex("#1F1F22").unwrap();
        assert_eq!(ui["sideBar.background"], bg.lighten(3.0).to_hex());
        assert_eq!(ui["activityBar.background"], bg.lighten(6.0).to_hex());
        assert_eq!(ui["tab.border"], bg.lighten(9.0).to_hex());
        assert_eq!(ui["input.background"], bg.darken(2.0).to_hex());
        assert_eq!(ui["button.foreground"], "#1F1F22");
        assert_eq!(ui["editorLineNumber.foreground"], "#ABB2BF66");

        let light = CoreColorSet::defaults(ThemeVariant::Light);
        let ui = ui_colors(&light, ThemeVariant::Light);
        let bg = Color::from_hex("#FAFAFA").unwrap();
        assert_eq!(ui["sideBar.background"], bg.darken(3.0).to_hex());
        assert_eq!(ui["tab.border"], bg.darken(9.0).to_hex());
        assert_eq!(ui["input.background"], bg.lighten(3.0).to_hex());
        assert_eq!(ui["button.foreground"], "#FFFFFF");
        assert_eq!(ui["badge.foreground"], "#FFFFFF");
    }

    #[test]
    fn test_ui_key_set() {
        let ui = ui_colors(&CoreColorSet::defaults(ThemeVariant::Dark), ThemeVariant::Dark);
        assert_eq!(ui.len(), 68);
        assert_eq!(ui.keys().next().map(String::as_str), Some("editor.background"));
        assert!(ui
            .values()
            .all(|v| crate::normalize::normalize_hex(v).as_deref() == Some(v.as_str())));
    }

    #[test]
    fn test_token_table_shape() {
        let core = CoreColorSet::defaults(ThemeVariant::Dark);
        let rules = token_colors(&core, ThemeVariant::Dark);
        assert_eq!(rules.len(), 52);

        let special = rules
            .iter()
            .find(|r| r.scope.contains("keyword.other.special-method"))
            .unwrap();
        let expected = Color::from_hex(&core.function)
            .unwrap()
            .lighten(10.0)
            .to_hex();
        assert_eq!(special.foreground(), Some(expected.as_str()));

        let deprecated = rules.last().unwrap();
        assert_eq!(deprecated.scope.0, vec!["invalid.deprecated"]);
        assert_eq!(deprecated.settings.font_style, Some(FontStyle::Strikethrough));

        let params = rules
            .iter()
            .find(|r| r.scope.contains("variable.parameter"))
            .unwrap();
        assert_eq!(params.foreground(), Some(core.foreground.as_str()));
        assert_eq!(params.settings.font_style, Some(FontStyle::Italic));
    }
}
