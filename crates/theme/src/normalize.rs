//! Lenient validation and normalization of imported theme JSON.
//!
//! These functions work on raw [`serde_json::Value`]s because imported
//! VS Code themes are only loosely structured. Malformed individual colors
//! are dropped here instead of failing the whole import.

use codesh_color::Color;
use serde_json::{Map, Value};

use crate::ThemeVariant;

/// Normalize `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` to uppercase
/// `#RRGGBB[AA]`. Returns `None` for anything else.
pub fn normalize_hex(value: &str) -> Option<String> {
    let digits = value.trim().strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let digits = digits.to_ascii_uppercase();
    match digits.len() {
        3 | 4 => {
            let mut out = String::with_capacity(1 + digits.len() * 2);
            out.push('#');
            for ch in digits.chars() {
                out.push(ch);
                out.push(ch);
            }
            Some(out)
        }
        6 | 8 => Some(format!("#{}", digits)),
        _ => None,
    }
}

/// Like [`normalize_hex`] but drops any alpha byte, giving `#RRGGBB`.
pub fn normalize_core_hex(value: &str) -> Option<String> {
    normalize_hex(value).map(|hex| hex[..7].to_string())
}

/// Decide whether a theme is dark or light.
///
/// Priority: declared `type`, then `light`/`dark` in the name, then the
/// perceived brightness of `editor.background`, then dark.
pub fn detect_theme_type(doc: &Value) -> ThemeVariant {
    if let Some(variant) = doc
        .get("type")
        .and_then(Value::as_str)
        .and_then(ThemeVariant::from_declared)
    {
        return variant;
    }

    let name = doc
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_lowercase();
    if name.contains("light") {
        return ThemeVariant::Light;
    }
    if name.contains("dark") {
        return ThemeVariant::Dark;
    }

    let background = doc
        .get("colors")
        .and_then(|colors| colors.get("editor.background"))
        .and_then(Value::as_str)
        .and_then(normalize_hex)
        .and_then(|hex| Color::from_hex(&hex).ok());
    if let Some(bg) = background {
        let brightness = (0.299 * bg.r as f64 + 0.587 * bg.g as f64 + 0.114 * bg.b as f64) / 255.0;
        return if brightness > 0.5 {
            ThemeVariant::Light
        } else {
            ThemeVariant::Dark
        };
    }

    ThemeVariant::Dark
}

/// Structural checks for an imported theme. An empty list means valid.
pub fn validate_structure(doc: &Value) -> Vec<String> {
    let Some(obj) = doc.as_object() else {
        return vec!["Theme must be a JSON object".to_string()];
    };

    let mut errors = Vec::new();

    match obj.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => {}
        _ => errors.push("Missing required field: name".to_string()),
    }

    if let Some(ty) = obj.get("type") {
        let known = ty.as_str().and_then(ThemeVariant::from_declared).is_some();
        if !known {
            errors.push(r#"Type must be "light", "dark", "hc" or "hcLight""#.to_string());
        }
    }

    if obj.get("colors").is_some_and(|c| !c.is_object()) {
        errors.push("Field colors must be an object".to_string());
    }

    if obj.get("tokenColors").is_some_and(|t| !t.is_array()) {
        errors.push("Field tokenColors must be an array".to_string());
    }

    errors
}

/// Normalize every color in `colors` and in token `foreground`/`background`
/// settings. Values that cannot be normalized are removed, as are token
/// rules that are not objects or whose `settings` is not an object.
pub fn normalize_theme_colors(doc: &mut Value) {
    if let Some(colors) = doc.get_mut("colors").and_then(Value::as_object_mut) {
        normalize_color_map(colors);
    }

    if let Some(rules) = doc.get_mut("tokenColors").and_then(Value::as_array_mut) {
        rules.retain(|rule| {
            rule.as_object()
                .is_some_and(|r| r.get("settings").map_or(true, Value::is_object))
        });

        for rule in rules.iter_mut() {
            if let Some(settings) = rule.get_mut("settings").and_then(Value::as_object_mut) {
                for key in ["foreground", "background"] {
                    normalize_entry(settings, key);
                }
            }
        }
    }
}

fn normalize_color_map(colors: &mut Map<String, Value>) {
    let keys: Vec<String> = colors.keys().cloned().collect();
    for key in keys {
        normalize_entry(colors, &key);
    }
}

fn normalize_entry(map: &mut Map<String, Value>, key: &str) {
    let normalized = map.get(key).and_then(Value::as_str).and_then(normalize_hex);
    match normalized {
        Some(hex) => {
            map.insert(key.to_string(), Value::String(hex));
        }
        None => {
            map.shift_remove(key);
        }
    }
}
