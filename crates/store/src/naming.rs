//! Identifier rules shared by theme and grammar storage.

use crate::{JsonStore, StoreError};

/// `true` when `name` matches `[A-Za-z0-9_-]+`.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Reject names that could not be used as a storage key.
pub fn validate_identifier(name: &str) -> Result<(), StoreError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier(name.to_string()))
    }
}

/// Turn free text into an identifier.
///
/// Lowercases, replaces every character outside `[a-z0-9_-]` with `-`,
/// collapses runs of `-` and trims them from both ends. May return an
/// empty string when the input has no usable characters.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        let ch = if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            ch
        } else {
            '-'
        };
        if ch == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(ch);
    }
    slug.trim_matches('-').to_string()
}

/// Human-readable name from an identifier: `one-dark_pro` → `One Dark Pro`.
pub fn display_name(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First of `desired`, `desired-2`, `desired-3`, … not present in `store`.
pub fn unique_name(store: &dyn JsonStore, desired: &str) -> Result<String, StoreError> {
    let mut candidate = desired.to_string();
    let mut counter = 2;
    while store.exists(&candidate)? {
        candidate = format!("{}-{}", desired, counter);
        counter += 1;
    }
    Ok(candidate)
}
