//! Post-process rendered pages: highlight plain `<pre><code>` blocks.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::block::{error_block, ThemeRef, ThemeResolver};
use crate::error::Result;
use crate::html::{decode_entities, escape_html};
use crate::{Decorations, Highlighter};

fn code_block_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r#"(?s)<pre><code(?: class="language-([^"]+)")?>(.*?)</code></pre>"#)
                .map_err(|e| codesh_logger::error(format!("Invalid code block pattern: {}", e)))
                .ok()
        })
        .as_ref()
}

/// Highlight every Markdown-rendered code block in `content`.
///
/// Blocks tagged `language-xxx` use that language; untagged blocks render
/// as plain text. Pages without `<pre><code` or that already contain
/// `codesh-block` markup are returned unchanged.
pub fn process_page_content(
    highlighter: &dyn Highlighter,
    resolver: &dyn ThemeResolver,
    content: &str,
    theme: &ThemeRef,
) -> String {
    if !content.contains("<pre><code") || content.contains("codesh-block") {
        return content.to_string();
    }
    let Some(pattern) = code_block_pattern() else {
        return content.to_string();
    };

    // Single pass: fallback markup contains `<pre><code>` too.
    pattern
        .replace_all(content, |caps: &Captures| {
            let lang = caps.get(1).map_or("txt", |m| m.as_str());
            let code = decode_entities(caps.get(2).map_or("", |m| m.as_str()));
            page_block(highlighter, resolver, &code, lang, theme)
        })
        .into_owned()
}

fn page_block(
    highlighter: &dyn Highlighter,
    resolver: &dyn ThemeResolver,
    code: &str,
    lang: &str,
    theme: &ThemeRef,
) -> String {
    codesh_logger::debug(format!(
        "Highlighting page block lang=\"{}\" ({} bytes)",
        lang,
        code.len()
    ));

    match try_page_block(highlighter, resolver, code, lang, theme) {
        Ok(html) => html,
        Err(e) => {
            codesh_logger::error(format!("Error highlighting lang=\"{}\": {}", lang, e));
            error_block(&e, code, &["no-header"])
        }
    }
}

fn try_page_block(
    highlighter: &dyn Highlighter,
    resolver: &dyn ThemeResolver,
    code: &str,
    lang: &str,
    theme: &ThemeRef,
) -> Result<String> {
    let selection = theme.resolve(resolver)?;
    let mut decorations = Decorations::default();
    decorations.pre_classes.push("no-highlight".to_string());

    let pre = highlighter.highlight(code, &lang.to_lowercase(), &selection, &decorations)?;
    let dual = if theme.is_dual() { " codesh-dual-theme" } else { "" };

    Ok(format!(
        "<div class=\"codesh-block no-header{}\" data-language=\"{}\"><div class=\"codesh-code\">{}</div></div>",
        dual,
        escape_html(lang),
        pre
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeSitterHighlighter;
    use codesh_store::MemoryStore;
    use codesh_theme::ThemeManager;

    fn process(content: &str, theme: &ThemeRef) -> String {
        let hl = TreeSitterHighlighter::new();
        let mgr = ThemeManager::new(Box::new(MemoryStore::new()));
        process_page_content(&hl, &mgr, content, theme)
    }

    fn dark() -> ThemeRef {
        ThemeRef::Named("codesh-dark".to_string())
    }

    #[test]
    fn test_language_and_bare_blocks() {
        let page = "<p>Intro</p>\n<pre><code class=\"language-rust\">let a = &quot;x&quot;;</code></pre>\n<pre><code>1 &lt; 2</code></pre>";
        let html = process(page, &dark());

        assert!(html.starts_with("<p>Intro</p>\n"));
        assert!(html.contains("<div class=\"codesh-block no-header\" data-language=\"rust\">"));
        assert!(html.contains("<div class=\"codesh-block no-header\" data-language=\"txt\">"));
        assert!(html.contains("<span class=\"line\">1 &lt; 2</span>"));
        assert!(html.contains("<pre class=\"codesh no-highlight\""));
        assert!(!html.contains("<pre><code>"));
    }

    #[test]
    fn test_skips_processed_or_plain_pages() {
        let done = "<div class=\"codesh-block\"></div><pre><code>x</code></pre>";
        assert_eq!(process(done, &dark()), done);

        let plain = "<p>No code here</p>";
        assert_eq!(process(plain, &dark()), plain);
    }

    #[test]
    fn test_dual_theme_class() {
        let theme = ThemeRef::Dual {
            light: "codesh-light".to_string(),
            dark: "codesh-dark".to_string(),
        };
        let html = process("<pre><code class=\"language-json\">{}</code></pre>", &theme);
        assert!(html.contains("codesh-block no-header codesh-dual-theme"));
    }

    #[test]
    fn test_errors_fall_back_to_escaped_code() {
        let html = process(
            "<pre><code class=\"language-cobol\">a &amp; b</code></pre>",
            &dark(),
        );
        assert_eq!(
            html,
            "<div class=\"codesh-block codesh-error no-header\" data-error=\"unsupported language: cobol\"><pre><code>a &amp; b</code></pre></div>"
        );
    }
}
