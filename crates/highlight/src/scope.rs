//! Tree-sitter capture names and their TextMate equivalents.

/// Capture names recognized by the highlighter, in configuration order.
pub const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "embedded",
    "escape",
    "function",
    "function.builtin",
    "function.method",
    "keyword",
    "label",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "string",
    "string.special",
    "tag",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

/// TextMate scope that themes use for a capture.
///
/// Unknown captures map to `source`, which themes leave uncolored.
pub fn textmate_scope(capture: &str) -> &'static str {
    match capture {
        "attribute" => "entity.other.attribute-name",
        "comment" => "comment",
        "constant" | "constant.builtin" => "constant.language",
        "constructor" => "entity.name.class",
        "embedded" => "meta.embedded",
        "escape" => "constant.character.escape",
        "function" | "function.method" => "entity.name.function",
        "function.builtin" => "support.function.builtin",
        "keyword" => "keyword",
        "label" => "entity.name.label",
        "number" => "constant.numeric",
        "operator" => "keyword.operator",
        "property" => "variable.other.property",
        "punctuation" | "punctuation.bracket" | "punctuation.delimiter" => "punctuation",
        "punctuation.special" => "punctuation.section.embedded",
        "string" => "string.quoted",
        "string.special" => "string.regexp",
        "tag" => "entity.name.tag",
        "type" => "entity.name.type",
        "type.builtin" => "support.type",
        "variable" => "variable.other",
        "variable.builtin" => "variable.language",
        "variable.parameter" => "variable.parameter",
        _ => "source",
    }
}
