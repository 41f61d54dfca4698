//! On-disk cache of rendered code blocks.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Rendered HTML stored as `<dir>/<key>.html`, valid for `ttl` after it was written.
///
/// Cache failures never fail a render: unreadable entries are misses and
/// failed writes are logged.
#[derive(Debug, Clone)]
pub struct RenderCache {
    dir: PathBuf,
    ttl: Duration,
}

impl RenderCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Key over every input that affects the rendered output.
    pub fn key(parts: &[&str]) -> String {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(&(part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        format!("codesh_{}", hasher.finalize().to_hex())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.html", key))
    }

    /// Fresh entry for `key`. Expired entries are removed.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
        // clock skew: a write time in the future counts as fresh
        let age = modified.elapsed().unwrap_or(Duration::ZERO);
        if age >= self.ttl {
            let _ = fs::remove_file(&path);
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(html) => Some(html),
            Err(e) => {
                codesh_logger::debug(format!("Unreadable cache entry {}: {}", path.display(), e));
                None
            }
        }
    }

    pub fn put(&self, key: &str, html: &str) {
        let path = self.path_for(key);
        let written = fs::create_dir_all(&self.dir).and_then(|_| fs::write(&path, html));
        if let Err(e) = written {
            codesh_logger::warn(format!("Failed to cache {}: {}", path.display(), e));
        }
    }

    /// Cached HTML for `key`, rendering and storing it on a miss.
    /// Empty output is not stored.
    pub fn get_or_render(&self, key: &str, render: impl FnOnce() -> String) -> String {
        if let Some(html) = self.get(key) {
            return html;
        }
        let html = render();
        if !html.is_empty() {
            self.put(key, &html);
        }
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_key_separates_parts() {
        let key = RenderCache::key(&["ab", "c"]);
        assert!(key.starts_with("codesh_"));
        assert_eq!(key.len(), "codesh_".len() + 64);
        assert_eq!(key, RenderCache::key(&["ab", "c"]));
        assert_ne!(key, RenderCache::key(&["a", "bc"]));
    }

    #[test]
    fn test_miss_renders_then_hits() {
        let temp = TempDir::new().unwrap();
        let cache = RenderCache::new(temp.path().join("render"), HOUR);
        let calls = Cell::new(0);
        let render = || {
            calls.set(calls.get() + 1);
            "<div>x</div>".to_string()
        };

        assert_eq!(cache.get_or_render("k", render), "<div>x</div>");
        assert_eq!(cache.get_or_render("k", render), "<div>x</div>");
        assert_eq!(calls.get(), 1);
        assert!(temp.path().join("render").join("k.html").exists());
    }

    #[test]
    fn test_expired_entry_is_removed() {
        let temp = TempDir::new().unwrap();
        let cache = RenderCache::new(temp.path(), Duration::ZERO);
        cache.put("k", "old");
        assert!(temp.path().join("k.html").exists());

        assert_eq!(cache.get("k"), None);
        assert!(!temp.path().join("k.html").exists());
    }

    #[test]
    fn test_empty_output_not_stored() {
        let temp = TempDir::new().unwrap();
        let cache = RenderCache::new(temp.path(), HOUR);
        assert_eq!(cache.get_or_render("blank", String::new), "");
        assert_eq!(cache.get("blank"), None);
    }
}
