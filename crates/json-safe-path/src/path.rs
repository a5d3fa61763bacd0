//! Path normalization and boundary parsing.

use serde_json::Value;

use crate::error::ConfigError;
use crate::key::Key;

/// An ordered list of keys.
pub type Path = Vec<Key>;

/// Normalizes a path.
///
/// Adjacent single-level wildcards merge into one whose repeat count is
/// their sum. A descent wildcard absorbs single-level wildcards on either
/// side of it, and adjacent descent wildcards collapse into one.
///
/// # Example
///
/// ```
/// use json_safe_path::{normalize, Key};
///
/// let path = normalize(&[Key::wildcard(1), Key::wildcard(2), Key::field("x")]);
/// assert!(matches!(path[0], Key::Wildcard(3)));
/// assert_eq!(path.len(), 2);
///
/// let path = normalize(&[Key::wildcard(1), Key::Descend, Key::wildcard(1)]);
/// assert!(matches!(path[..], [Key::Descend]));
/// ```
pub fn normalize(path: &[Key]) -> Path {
    let mut out: Path = Vec::with_capacity(path.len());
    for key in path {
        match (out.last_mut(), key) {
            (Some(Key::Wildcard(levels)), Key::Wildcard(more)) => *levels = levels.saturating_add(*more),
            (Some(Key::Descend), Key::Wildcard(_)) | (Some(Key::Descend), Key::Descend) => {}
            (Some(last @ Key::Wildcard(_)), Key::Descend) => *last = Key::Descend,
            (_, key) => out.push(key.clone()),
        }
    }
    out
}

/// Position of the first wildcard in `path`, if any.
pub fn find_wildcard(path: &[Key]) -> Option<usize> {
    path.iter().position(Key::is_wildcard)
}

/// Parses a JSON array into a path, see [`Key::from_json`].
///
/// # Errors
///
/// Fails if `value` is not an array or holds an unsupported key.
///
/// # Example
///
/// ```
/// use json_safe_path::{parse_path, Key};
/// use serde_json::json;
///
/// let path = parse_path(&json!(["servers", 0, "*", "port"])).unwrap();
/// assert_eq!(path[0], Key::field("servers"));
/// assert_eq!(path[1], Key::index(0));
/// assert!(path[2].is_wildcard());
/// ```
pub fn parse_path(value: &Value) -> Result<Path, ConfigError> {
    match value {
        Value::Array(items) => items.iter().map(Key::from_json).collect(),
        other => Err(ConfigError::PathNotArray(other.to_string())),
    }
}

/// Formats a path for diagnostics, e.g. `servers/0/*/port`.
pub fn format_path(path: &[Key]) -> String {
    let mut out = String::new();
    for (i, key) in path.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(&key.to_string());
    }
    out
}
