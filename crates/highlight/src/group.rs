//! Tabbed groups of rendered code blocks.

use std::sync::OnceLock;

use regex::Regex;

use crate::block::COPY_BUTTON;
use crate::html::{decode_entities, escape_html};

struct Patterns {
    opening: Regex,
    header: Regex,
    title: Regex,
    lang: Regex,
}

fn patterns() -> Option<&'static Patterns> {
    static PATTERNS: OnceLock<Option<Patterns>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            let compiled = (|| {
                Ok::<_, regex::Error>(Patterns {
                    opening: Regex::new(
                        r#"^\s*<div class="codesh-block([^"]*)"(?: data-language="([^"]*)")?"#,
                    )?,
                    header: Regex::new(
                        r#"(?s)<div class="codesh-header">(.*?)</div><div class="codesh-code">"#,
                    )?,
                    title: Regex::new(r#"(?s)<span class="codesh-title">(.*?)</span>"#)?,
                    lang: Regex::new(r#"(?s)<span class="codesh-lang">(.*?)</span>"#)?,
                })
            })();
            compiled
                .map_err(|e| codesh_logger::error(format!("Invalid group pattern: {}", e)))
                .ok()
        })
        .as_ref()
}

struct Tab {
    lang: String,
    title: String,
    classes: String,
    /// Block markup following the opening tag's class attribute
    rest: String,
}

/// Combine rendered code blocks into one tabbed group.
///
/// Each block's header is dropped and its title, its language label or its
/// uppercased language becomes the tab label. The first tab and panel are
/// active. A non-empty `sync` is emitted as `data-sync` so groups sharing
/// it can switch tabs together. Strings that are not code blocks are
/// ignored; when none are, the input is returned concatenated.
pub fn render_code_group(blocks: &[String], sync: &str) -> String {
    let Some(patterns) = patterns() else {
        return blocks.concat();
    };

    let tabs: Vec<Tab> = blocks
        .iter()
        .filter_map(|block| parse_tab(patterns, block))
        .collect();
    if tabs.is_empty() {
        return blocks.concat();
    }

    let group_id = group_id(blocks);
    let mut html = format!("<div class=\"codesh-group\" data-group-id=\"{}\"", group_id);
    if !sync.trim().is_empty() {
        html.push_str(&format!(" data-sync=\"{}\"", escape_html(sync.trim())));
    }
    html.push_str("><div class=\"codesh-group-header\"><div class=\"codesh-group-tabs\">");
    for (i, tab) in tabs.iter().enumerate() {
        html.push_str(&format!(
            "<button class=\"codesh-group-tab{}\" data-tab=\"{}-{}\" data-lang=\"{}\">{}</button>",
            active(i),
            group_id,
            i,
            escape_html(&tab.lang),
            escape_html(&tab.title)
        ));
    }
    html.push_str("</div>");
    html.push_str(COPY_BUTTON);
    html.push_str("</div><div class=\"codesh-group-panels\">");
    for (i, tab) in tabs.iter().enumerate() {
        html.push_str(&format!(
            "<div class=\"codesh-group-panel codesh-block{}{}\" data-panel=\"{}-{}\"{}",
            tab.classes,
            active(i),
            group_id,
            i,
            tab.rest
        ));
    }
    html.push_str("</div></div>");
    html
}

fn parse_tab(patterns: &Patterns, block: &str) -> Option<Tab> {
    let header = patterns
        .header
        .captures(block)
        .and_then(|h| h.get(1))
        .map_or("", |m| m.as_str());
    let label = |re: &Regex| {
        re.captures(header)
            .and_then(|c| c.get(1))
            .map(|m| decode_entities(m.as_str()))
    };
    let title = label(&patterns.title)
        .or_else(|| label(&patterns.lang).filter(|l| !l.trim().is_empty()));

    let body = patterns.header.replace(block, "<div class=\"codesh-code\">");
    let caps = patterns.opening.captures(&body)?;
    let classes = caps.get(1)?;
    let lang = caps
        .get(2)
        .map(|m| decode_entities(m.as_str()))
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| "txt".to_string());

    Some(Tab {
        title: title.unwrap_or_else(|| lang.to_uppercase()),
        lang,
        classes: classes.as_str().to_string(),
        // skip the closing quote of the class attribute
        rest: body[classes.end() + 1..].to_string(),
    })
}

fn active(index: usize) -> &'static str {
    if index == 0 {
        " active"
    } else {
        ""
    }
}

/// `cg-` and eight hex digits derived from the grouped blocks.
fn group_id(blocks: &[String]) -> String {
    let mut hasher = blake3::Hasher::new();
    for block in blocks {
        hasher.update(block.as_bytes());
        hasher.update(&[0]);
    }
    let hex = hasher.finalize().to_hex();
    format!("cg-{}", &hex.as_str()[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::error_block;
    use crate::{render_code_block, CodeBlockOptions, HighlightError, ThemeRef, TreeSitterHighlighter};
    use codesh_store::MemoryStore;
    use codesh_theme::ThemeManager;

    fn render(code: &str, lang: &str, options: CodeBlockOptions) -> String {
        let hl = TreeSitterHighlighter::new();
        let mgr = ThemeManager::new(Box::new(MemoryStore::new()));
        let theme = ThemeRef::Named("codesh-dark".to_string());
        render_code_block(&hl, &mgr, code, lang, &theme, &options)
    }

    fn sample_blocks() -> Vec<String> {
        vec![
            render("fn main() {}", "rust", CodeBlockOptions::default()),
            render(
                "print(1)",
                "python",
                CodeBlockOptions {
                    title: "app.py".to_string(),
                    class: "wide".to_string(),
                    ..CodeBlockOptions::default()
                },
            ),
        ]
    }

    #[test]
    fn test_group_tabs_and_panels() {
        let blocks = sample_blocks();
        let html = render_code_group(&blocks, "");
        let id = group_id(&blocks);
        assert!(id.starts_with("cg-") && id.len() == 11);

        assert!(html.starts_with(&format!(
            "<div class=\"codesh-group\" data-group-id=\"{}\"><div class=\"codesh-group-header\">",
            id
        )));
        assert!(html.contains(&format!(
            "<button class=\"codesh-group-tab active\" data-tab=\"{id}-0\" data-lang=\"rust\">RUST</button>"
        )));
        assert!(html.contains(&format!(
            "<button class=\"codesh-group-tab\" data-tab=\"{id}-1\" data-lang=\"python\">app.py</button>"
        )));
        assert!(html.contains(&format!("</div>{}</div><div class=\"codesh-group-panels\">", COPY_BUTTON)));
        assert!(html.contains(&format!(
            "<div class=\"codesh-group-panel codesh-block active\" data-panel=\"{id}-0\" data-language=\"rust\">"
        )));
        assert!(html.contains(&format!(
            "<div class=\"codesh-group-panel codesh-block wide\" data-panel=\"{id}-1\" data-language=\"python\">"
        )));
        assert!(!html.contains("codesh-header"));
        assert_eq!(html.matches(COPY_BUTTON).count(), 1);
        assert!(html.ends_with("</code></pre></div></div></div></div>"));
    }

    #[test]
    fn test_group_sync_attribute() {
        let blocks = sample_blocks();
        let html = render_code_group(&blocks, " lang\"<x> ");
        assert!(html.contains("\" data-sync=\"lang&quot;&lt;x&gt;\">"));
        assert!(!render_code_group(&blocks, "  ").contains("data-sync"));
    }

    #[test]
    fn test_group_labels_fall_back_to_language() {
        let headerless = render(
            "x",
            "txt",
            CodeBlockOptions {
                header: false,
                ..CodeBlockOptions::default()
            },
        );
        let unlabeled = render(
            "y",
            "json",
            CodeBlockOptions {
                show_lang: false,
                ..CodeBlockOptions::default()
            },
        );
        let failed = error_block(&HighlightError::UnsupportedLanguage("cobol".to_string()), "z", &[]);
        let html = render_code_group(&[headerless, unlabeled, failed], "");

        assert!(html.contains("data-lang=\"txt\">TXT</button>"));
        assert!(html.contains("data-lang=\"json\">JSON</button>"));
        assert_eq!(html.matches("data-lang=\"txt\">TXT</button>").count(), 2);
        assert!(html.contains("codesh-block codesh-error\" data-panel="));
    }

    #[test]
    fn test_group_without_blocks_returns_input() {
        let content = vec!["<p>no code</p>".to_string(), String::new()];
        assert_eq!(render_code_group(&content, "lang"), "<p>no code</p>");
        assert_eq!(render_code_group(&[], ""), "");
    }

    #[test]
    fn test_group_id_is_stable() {
        let blocks = sample_blocks();
        assert_eq!(render_code_group(&blocks, ""), render_code_group(&blocks, ""));
        assert_ne!(group_id(&blocks), group_id(&blocks[..1]));
    }
}
