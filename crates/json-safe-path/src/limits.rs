use serde::{Deserialize, Serialize};

/// Default maximum document depth explored by a single resolution.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Default maximum number of outcomes emitted by a single resolution.
pub const DEFAULT_MAX_OUTCOMES: usize = 65_536;

/// Default maximum number of elements one write may append to a sequence.
pub const DEFAULT_MAX_SEQUENCE_GROWTH: usize = 1 << 20;

/// Ceilings guarding wildcard fan-out over large documents and sequence
/// growth on writes.
///
/// Missing fields fall back to the defaults when deserialized, so engine
/// settings can live in the same configuration file as the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Branches reaching deeper than this many levels are pruned.
    pub max_depth: usize,
    /// Traversal stops once this many outcomes were emitted.
    pub max_outcomes: usize,
    /// Elements one write may append to a sequence, padding included. Larger
    /// indices abort the mutation.
    pub max_sequence_growth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_outcomes: DEFAULT_MAX_OUTCOMES,
            max_sequence_growth: DEFAULT_MAX_SEQUENCE_GROWTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let limits: Limits = serde_json::from_value(json!({"max_outcomes": 10})).unwrap();
        assert_eq!(limits.max_outcomes, 10);
        assert_eq!(limits.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(limits.max_sequence_growth, DEFAULT_MAX_SEQUENCE_GROWTH);
    }
}
