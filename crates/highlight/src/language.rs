//! Language names and aliases.

use std::path::Path;

/// Languages with a tree-sitter grammar compiled in.
pub const SUPPORTED_LANGUAGES: &[&str] = &["rust", "python", "javascript", "php", "html", "css", "json"];

/// Languages rendered without any highlighting.
pub const PLAIN_LANGUAGES: &[&str] = &["txt", "text", "plain", "plaintext"];

/// Canonical name for a language or one of its common aliases.
pub fn canonical_language(name: &str) -> Option<&'static str> {
    let lang = match name.trim().to_lowercase().as_str() {
        "rust" | "rs" => "rust",
        "python" | "py" | "python3" => "python",
        "javascript" | "js" | "mjs" | "cjs" | "node" => "javascript",
        "php" => "php",
        "html" | "htm" | "xhtml" => "html",
        "css" => "css",
        "json" => "json",
        "txt" | "text" | "plain" | "plaintext" => "txt",
        _ => return None,
    };
    Some(lang)
}

pub fn is_plain(name: &str) -> bool {
    canonical_language(name) == Some("txt")
}

/// Detect language from file extension.
pub fn detect_language(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;

    match ext.to_lowercase().as_str() {
        "rs" => Some("rust"),
        "py" | "pyw" => Some("python"),
        "js" | "mjs" | "cjs" => Some("javascript"),
        "php" => Some("php"),
        "html" | "htm" => Some("html"),
        "css" => Some("css"),
        "json" => Some("json"),
        "txt" => Some("txt"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(canonical_language("JS"), Some("javascript"));
        assert_eq!(canonical_language(" py "), Some("python"));
        assert_eq!(canonical_language("plaintext"), Some("txt"));
        assert_eq!(canonical_language("cobol"), None);
        assert!(is_plain("Text"));
        assert!(!is_plain("rust"));
        for lang in PLAIN_LANGUAGES {
            assert!(is_plain(lang));
        }
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language(Path::new("src/main.rs")), Some("rust"));
        assert_eq!(detect_language(Path::new("index.HTM")), Some("html"));
        assert_eq!(detect_language(Path::new("Makefile")), None);
        for lang in SUPPORTED_LANGUAGES {
            assert_eq!(canonical_language(lang), Some(*lang));
        }
    }
}
