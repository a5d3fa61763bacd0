//! Path keys and their boundary encoding.

use serde_json::Value;
use std::fmt;

use crate::error::ConfigError;

/// A single step of a path.
///
/// Wildcards are plain tags: two wildcards of the same kind compare equal
/// whatever their repeat count, which is what lets [`normalize`](crate::normalize)
/// merge them.
#[derive(Debug, Clone)]
pub enum Key {
    /// Mapping field name.
    Field(String),
    /// Sequence position.
    Index(usize),
    /// Matches exactly this many nested levels, fanning out over every child.
    Wildcard(usize),
    /// Matches any depth below the current node.
    Descend,
    /// Boolean key. Accepted at the boundary, but never indexes anything.
    Bool(bool),
    /// Explicit null key.
    Null,
}

/// Classification of a [`Key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Field,
    Index,
    Wildcard(usize),
    Descend,
    /// Null and boolean keys.
    Malformed,
}

impl Key {
    pub fn field(name: impl Into<String>) -> Self {
        Key::Field(name.into())
    }

    pub fn index(index: usize) -> Self {
        Key::Index(index)
    }

    /// Single-level wildcard. A zero repeat count is bumped to one.
    pub fn wildcard(levels: usize) -> Self {
        Key::Wildcard(levels.max(1))
    }

    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Field(_) => KeyKind::Field,
            Key::Index(_) => KeyKind::Index,
            Key::Wildcard(n) => KeyKind::Wildcard(*n),
            Key::Descend => KeyKind::Descend,
            Key::Bool(_) | Key::Null => KeyKind::Malformed,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Key::Wildcard(_) | Key::Descend)
    }

    /// Parses a string key, recognising the wildcard tokens.
    ///
    /// `"*"` is a single-level wildcard, `"*N"` (N >= 1) matches N levels and
    /// `"**"` matches any depth. Everything else is a field name.
    ///
    /// # Example
    ///
    /// ```
    /// use json_safe_path::{Key, KeyKind};
    ///
    /// assert_eq!(Key::parse_token("*").kind(), KeyKind::Wildcard(1));
    /// assert_eq!(Key::parse_token("*3").kind(), KeyKind::Wildcard(3));
    /// assert_eq!(Key::parse_token("**").kind(), KeyKind::Descend);
    /// assert_eq!(Key::parse_token("*0").kind(), KeyKind::Field);
    /// assert_eq!(Key::parse_token("name").kind(), KeyKind::Field);
    /// ```
    pub fn parse_token(token: &str) -> Self {
        match token {
            "*" => Key::Wildcard(1),
            "**" => Key::Descend,
            _ => {
                if let Some(count) = token.strip_prefix('*') {
                    if !count.is_empty() && count.bytes().all(|b| b.is_ascii_digit()) {
                        if let Ok(levels) = count.parse::<usize>() {
                            if levels > 0 {
                                return Key::Wildcard(levels);
                            }
                        }
                    }
                }
                Key::Field(token.to_string())
            }
        }
    }

    /// Converts a JSON value into a key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedKey`] for negative or fractional
    /// numbers, arrays and objects.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::String(s) => Ok(Key::parse_token(s)),
            Value::Number(n) => n
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .map(Key::Index)
                .ok_or_else(|| ConfigError::UnsupportedKey(value.to_string())),
            Value::Bool(b) => Ok(Key::Bool(*b)),
            Value::Null => Ok(Key::Null),
            Value::Array(_) | Value::Object(_) => {
                Err(ConfigError::UnsupportedKey(value.to_string()))
            }
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Field(a), Key::Field(b)) => a == b,
            (Key::Index(a), Key::Index(b)) => a == b,
            (Key::Bool(a), Key::Bool(b)) => a == b,
            (Key::Wildcard(_), Key::Wildcard(_))
            | (Key::Descend, Key::Descend)
            | (Key::Null, Key::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Field(name) => f.write_str(name),
            Key::Index(i) => write!(f, "{i}"),
            Key::Wildcard(1) => f.write_str("*"),
            Key::Wildcard(n) => write!(f, "*{n}"),
            Key::Descend => f.write_str("**"),
            Key::Bool(b) => write!(f, "{b}"),
            Key::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Field(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Field(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}
