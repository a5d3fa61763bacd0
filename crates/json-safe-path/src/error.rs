use thiserror::Error;

/// Caller misconfiguration. Always reported before any traversal starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown strategy `{0}`, expected one of: force, missing_key, last_value, last_container")]
    UnknownStrategy(String),
    #[error("unknown write policy `{0}`, expected one of: force, missing_key, existing_key")]
    UnknownWritePolicy(String),
    #[error("wildcard `{key}` at position {position} is not allowed in a mutation path")]
    WildcardInMutationPath { position: usize, key: String },
    #[error("unsupported key {0}: expected a string, a non-negative integer, a boolean or null")]
    UnsupportedKey(String),
    #[error("path must be an array of keys, got {0}")]
    PathNotArray(String),
}

/// Failure reported by a user supplied [`Transform`](crate::Transform).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("transform failed: {0}")]
pub struct TransformError(pub String);

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transform(#[from] TransformError),
}
