//! Lenient decoding helpers for backend payloads.
//!
//! The backend is loose about shapes: ids arrive as strings or numbers, and a
//! reference field may be a bare id or a populated document carrying `_id`.

use serde_json::Value;

/// Extract an id from a scalar or a populated reference.
/// Returns `None` for null, empty strings, and objects without an id.
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map
            .get("_id")
            .and_then(scalar_id)
            .or_else(|| map.get("id").and_then(scalar_id)),
        other => scalar_id(other),
    }
}

fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Ids we are willing to splice into a backend URL path.
pub fn is_safe_path_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Prefer `_id`, fall back to `id`.
pub fn pick_id(mongo_id: Option<&Value>, plain_id: Option<&Value>) -> Option<String> {
    mongo_id
        .and_then(id_from_value)
        .or_else(|| plain_id.and_then(id_from_value))
}

/// Render any scalar as text; null and structured values become `None`.
pub fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(s)
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
