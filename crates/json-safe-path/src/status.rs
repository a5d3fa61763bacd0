//! Outcome codes reported by a single traversal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of walking one concrete path.
///
/// Statuses are data, never errors: the strategy layer decides what the
/// caller sees for each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Okay,
    /// The node being indexed is null.
    StorageNull,
    KeyNull,
    /// Key absent from a mapping, or index out of bounds.
    KeyMissing,
    KeyWrongType,
    /// The node being indexed is a scalar.
    StorageWrongType,
    Exception,
}

impl Status {
    /// Statuses meaning the failure was about the key, not the container.
    pub const WRONG_KEY: [Status; 3] = [Status::KeyNull, Status::KeyMissing, Status::KeyWrongType];

    pub fn is_okay(self) -> bool {
        self == Status::Okay
    }

    pub fn is_wrong_key(self) -> bool {
        Self::WRONG_KEY.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Okay => "OKAY",
            Status::StorageNull => "STORAGE_NULL",
            Status::KeyNull => "KEY_NULL",
            Status::KeyMissing => "KEY_MISSING",
            Status::KeyWrongType => "KEY_WRONG_TYPE",
            Status::StorageWrongType => "STORAGE_WRONG_TYPE",
            Status::Exception => "EXCEPTION",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_key_group() {
        assert!(Status::KeyNull.is_wrong_key());
        assert!(Status::KeyMissing.is_wrong_key());
        assert!(Status::KeyWrongType.is_wrong_key());

        assert!(!Status::Okay.is_wrong_key());
        assert!(!Status::StorageNull.is_wrong_key());
        assert!(!Status::StorageWrongType.is_wrong_key());
        assert!(!Status::Exception.is_wrong_key());
    }

    #[test]
    fn test_serde_names_match_display() {
        for status in [
            Status::Okay,
            Status::StorageNull,
            Status::KeyNull,
            Status::KeyMissing,
            Status::KeyWrongType,
            Status::StorageWrongType,
            Status::Exception,
        ] {
            let encoded = serde_json::to_value(status).unwrap();
            assert_eq!(encoded, serde_json::Value::String(status.to_string()));
        }
    }
}
