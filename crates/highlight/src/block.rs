//! Code block assembly: fences, options, header and error fallback.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use codesh_theme::{ThemeDocument, ThemeError, ThemeManager};
use regex::Regex;

use crate::error::{HighlightError, Result};
use crate::html::{decode_entities, escape_html};
use crate::{Decorations, Highlighter, ThemeSelection};

pub(crate) const COPY_BUTTON: &str = concat!(
    "<button class=\"codesh-copy\" type=\"button\" title=\"Copy code\">",
    "<svg class=\"codesh-copy-icon\" fill=\"none\" stroke=\"currentColor\" viewBox=\"0 0 24 24\" xmlns=\"http://www.w3.org/2000/svg\">",
    "<path stroke-linecap=\"round\" stroke-linejoin=\"round\" stroke-width=\"2\" ",
    "d=\"M8 16H6a2 2 0 01-2-2V6a2 2 0 012-2h8a2 2 0 012 2v2m-6 12h8a2 2 0 002-2v-8a2 2 0 00-2-2h-8a2 2 0 00-2 2v8a2 2 0 002 2z\"/>",
    "</svg>",
    "<span class=\"codesh-copy-text\">Copy</span>",
    "</button>",
);

/// Looks up themes by name.
pub trait ThemeResolver {
    fn resolve_theme(&self, name: &str) -> Result<ThemeDocument>;
}

impl ThemeResolver for ThemeManager {
    fn resolve_theme(&self, name: &str) -> Result<ThemeDocument> {
        self.get(name).map_err(|e| match e {
            ThemeError::DocumentNotFound(name) | ThemeError::InvalidIdentifier(name) => {
                HighlightError::UnknownTheme(name)
            }
            other => HighlightError::Engine(other.to_string()),
        })
    }
}

/// Theme names to highlight with, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeRef {
    Named(String),
    /// Light and dark variants switched by CSS
    Dual { light: String, dark: String },
}

impl ThemeRef {
    pub fn resolve(&self, resolver: &dyn ThemeResolver) -> Result<ThemeSelection> {
        match self {
            ThemeRef::Named(name) => Ok(ThemeSelection::Single(resolver.resolve_theme(name)?)),
            ThemeRef::Dual { light, dark } => Ok(ThemeSelection::Dual {
                light: resolver.resolve_theme(light)?,
                dark: resolver.resolve_theme(dark)?,
            }),
        }
    }

    pub fn is_dual(&self) -> bool {
        matches!(self, ThemeRef::Dual { .. })
    }
}

/// Per-block rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlockOptions {
    /// Overrides the site theme when set
    pub theme: Option<String>,
    pub line_numbers: bool,
    pub start_line: i64,
    /// Line spec such as `1,3-5`
    pub highlight: String,
    pub focus: String,
    pub class: String,
    pub show_lang: bool,
    pub title: String,
    pub header: bool,
}

impl Default for CodeBlockOptions {
    fn default() -> Self {
        Self {
            theme: None,
            line_numbers: false,
            start_line: 1,
            highlight: String::new(),
            focus: String::new(),
            class: String::new(),
            show_lang: true,
            title: String::new(),
            header: true,
        }
    }
}

/// Render one code block to HTML.
///
/// `content` may be wrapped in a Markdown fence, whose language then
/// replaces `lang`. Blank content renders as an empty string. Any failure
/// (unknown theme, unsupported language, engine error) yields a
/// `codesh-error` block with the escaped source instead.
pub fn render_code_block(
    highlighter: &dyn Highlighter,
    resolver: &dyn ThemeResolver,
    content: &str,
    lang: &str,
    site_theme: &ThemeRef,
    options: &CodeBlockOptions,
) -> String {
    let (code, fence_lang) = extract_fenced(content);
    let lang = match fence_lang {
        Some(fence) => fence,
        None if lang.trim().is_empty() => "txt".to_string(),
        None => lang.trim().to_string(),
    };

    let code = decode_entities(&code);
    let code = code.trim_matches(|c: char| c == '\n' || c == '\r');
    if code.trim().is_empty() {
        return String::new();
    }

    let theme = match &options.theme {
        Some(name) if !name.trim().is_empty() => ThemeRef::Named(name.trim().to_string()),
        _ => site_theme.clone(),
    };

    match highlight_block(highlighter, resolver, code, &lang, &theme, options) {
        Ok(html) => html,
        Err(e) => {
            codesh_logger::error(format!("Failed to highlight {} block: {}", lang, e));
            error_block(&e, code, &[])
        }
    }
}

fn highlight_block(
    highlighter: &dyn Highlighter,
    resolver: &dyn ThemeResolver,
    code: &str,
    lang: &str,
    theme: &ThemeRef,
    options: &CodeBlockOptions,
) -> Result<String> {
    let selection = theme.resolve(resolver)?;

    let mut decorations = Decorations {
        gutter: options.line_numbers,
        start_line: options.start_line,
        ..Decorations::default()
    };
    decorations.pre_classes.push("no-highlight".to_string());
    for line in parse_line_spec(&options.highlight) {
        decorations.add_line_class(line, "highlight");
    }
    for line in parse_line_spec(&options.focus) {
        decorations.add_line_class(line, "focus");
    }

    let pre = highlighter.highlight(code, &lang.to_lowercase(), &selection, &decorations)?;

    let mut classes = vec!["codesh-block".to_string()];
    if theme.is_dual() {
        classes.push("codesh-dual-theme".to_string());
    }
    if !options.class.trim().is_empty() {
        classes.push(escape_html(options.class.trim()));
    }
    if !options.highlight.trim().is_empty() {
        classes.push("has-highlights".to_string());
    }
    if !options.focus.trim().is_empty() {
        classes.push("has-focus".to_string());
    }
    if !options.header {
        classes.push("no-header".to_string());
    }

    let mut html = format!(
        "<div class=\"{}\" data-language=\"{}\">",
        classes.join(" "),
        escape_html(lang)
    );

    if options.header {
        html.push_str("<div class=\"codesh-header\">");
        if !options.title.trim().is_empty() {
            html.push_str(&format!(
                "<span class=\"codesh-title\">{}</span>",
                escape_html(&options.title)
            ));
        } else if options.show_lang {
            html.push_str(&format!(
                "<span class=\"codesh-lang\">{}</span>",
                escape_html(&lang.to_uppercase())
            ));
        } else {
            html.push_str("<span class=\"codesh-lang\"></span>");
        }
        html.push_str(COPY_BUTTON);
        html.push_str("</div>");
    }

    html.push_str("<div class=\"codesh-code\">");
    html.push_str(&pre);
    html.push_str("</div></div>");
    Ok(html)
}

/// Fallback markup showing the escaped source.
pub fn error_block(error: &HighlightError, code: &str, extra_classes: &[&str]) -> String {
    let mut classes = String::from("codesh-block codesh-error");
    for class in extra_classes {
        classes.push(' ');
        classes.push_str(class);
    }
    format!(
        "<div class=\"{}\" data-error=\"{}\"><pre><code>{}</code></pre></div>",
        classes,
        escape_html(&error.to_string()),
        escape_html(code)
    )
}

fn fence_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [r"(?s)^```([^\s]*)\s*\n(.*?)\n```$", r"(?s)^~~~([^\s]*)\s*\n(.*?)\n~~~$"]
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    codesh_logger::error(format!("Invalid fence pattern: {}", e));
                    None
                }
            })
            .collect()
    })
}

/// Unwrap a Markdown fenced block (```` ``` ```` or `~~~`).
///
/// Returns the inner code and the fence's language, if one was given.
/// Content that is not a single fenced block is returned unchanged.
pub fn extract_fenced(content: &str) -> (String, Option<String>) {
    let trimmed = content.trim();
    for re in fence_patterns() {
        if let Some(caps) = re.captures(trimmed) {
            let lang = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|l| !l.is_empty())
                .map(str::to_string);
            let code = caps.get(2).map_or("", |m| m.as_str()).to_string();
            return (code, lang);
        }
    }
    (content.to_string(), None)
}

/// Parse `"1,3-5,7"` into sorted unique 1-based line numbers.
///
/// Zero, negative, reversed and non-numeric parts are ignored.
pub fn parse_line_spec(spec: &str) -> Vec<usize> {
    let mut lines = BTreeSet::new();

    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>())
                else {
                    continue;
                };
                if start > 0 && end >= start {
                    lines.extend(start..=end);
                }
            }
            None => {
                if let Ok(line) = part.parse::<usize>() {
                    if line > 0 {
                        lines.insert(line);
                    }
                }
            }
        }
    }

    lines.into_iter().collect()
}

/// `true`, `1`, `yes` and `on`, in any case, are true; everything else is false.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
