//! Recover the ten core colors from a full theme.

use crate::normalize::normalize_core_hex;
use crate::{CoreColor, CoreColorSet, ThemeDocument, TokenRule};

/// Candidate scopes searched for each token-derived core color, in priority order.
pub const SCOPE_CANDIDATES: [(CoreColor, &[&str]); 8] = [
    (CoreColor::Comment, &["comment", "punctuation.definition.comment"]),
    (
        CoreColor::Keyword,
        &["keyword", "keyword.control", "storage", "storage.type"],
    ),
    (CoreColor::String, &["string", "string.quoted"]),
    (CoreColor::Number, &["constant.numeric", "constant"]),
    (
        CoreColor::Function,
        &["entity.name.function", "support.function"],
    ),
    (
        CoreColor::Type,
        &["entity.name.type", "entity.name.class", "support.class"],
    ),
    (CoreColor::Variable, &["variable", "variable.other"]),
    (CoreColor::Operator, &["keyword.operator", "punctuation"]),
];

/// Extract the core colors of `theme`.
///
/// `background`/`foreground` come from `editor.background`/`editor.foreground`;
/// the other eight from `tokenColors` via [`find_color_for_scopes`]. Anything
/// missing or unparsable falls back to the defaults of the theme's variant.
/// Results are `#RRGGBB` without alpha.
pub fn extract_core_colors(theme: &ThemeDocument) -> CoreColorSet {
    let variant = theme.variant;
    let pick = |value: Option<&str>, key: CoreColor| -> String {
        value
            .and_then(normalize_core_hex)
            .unwrap_or_else(|| key.default_hex(variant).to_string())
    };

    CoreColorSet::from_fn(|key| match key {
        CoreColor::Background => pick(theme.color("editor.background"), key),
        CoreColor::Foreground => pick(theme.color("editor.foreground"), key),
        _ => {
            let targets = candidates_for(key);
            pick(find_color_for_scopes(&theme.token_colors, targets), key)
        }
    })
}

/// Candidate scopes for a token-derived core color (empty for background/foreground).
pub fn candidates_for(key: CoreColor) -> &'static [&'static str] {
    SCOPE_CANDIDATES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, scopes)| *scopes)
        .unwrap_or(&[])
}

/// Foreground of the first rule, in document order, that targets any of `targets`.
///
/// Two passes are made: the first only accepts a rule scope equal to a
/// target, the second also accepts a rule scope that starts with a target
/// followed by `.` (so `keyword.operator.new` matches `keyword` but
/// `keywords` does not). Rules without a foreground are skipped.
pub fn find_color_for_scopes<'a>(rules: &'a [TokenRule], targets: &[&str]) -> Option<&'a str> {
    let exact = |scope: &str| targets.iter().any(|t| scope == *t);
    let prefixed = |scope: &str| targets.iter().any(|t| scope_matches(scope, t));

    first_match(rules, exact).or_else(|| first_match(rules, prefixed))
}

fn first_match<'a>(rules: &'a [TokenRule], accept: impl Fn(&str) -> bool) -> Option<&'a str> {
    rules
        .iter()
        .filter(|rule| rule.scope.iter().any(&accept))
        // a matching rule with no foreground does not end the search
        .find_map(TokenRule::foreground)
}

/// `scope` equals `target` or extends it by whole dot segments.
pub fn scope_matches(scope: &str, target: &str) -> bool {
    match scope.strip_prefix(target) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
