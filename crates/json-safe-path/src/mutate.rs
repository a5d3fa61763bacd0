//! Writing values at the end of a path, creating containers on the way.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::ConfigError;
use crate::key::Key;
use crate::limits::Limits;
use crate::path::{find_wildcard, format_path, normalize};
use crate::resolve::Resolver;

/// When the final write of a mutation is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Always write.
    #[default]
    Force,
    /// Write only if the final key is absent from its container.
    MissingKey,
    /// Write only if the final key is already present.
    ExistingKey,
}

impl WritePolicy {
    pub const ALL: [WritePolicy; 3] = [
        WritePolicy::Force,
        WritePolicy::MissingKey,
        WritePolicy::ExistingKey,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WritePolicy::Force => "force",
            WritePolicy::MissingKey => "missing_key",
            WritePolicy::ExistingKey => "existing_key",
        }
    }

    pub fn allows(self, present: bool) -> bool {
        match self {
            WritePolicy::Force => true,
            WritePolicy::MissingKey => !present,
            WritePolicy::ExistingKey => present,
        }
    }
}

impl FromStr for WritePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WritePolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownWritePolicy(s.to_string()))
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`mutate`] and [`mutate_copy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutateOptions {
    pub policy: WritePolicy,
    /// If false, [`mutate`] works on a deep copy and leaves the caller's
    /// document alone.
    pub in_place: bool,
    pub limits: Limits,
}

impl Default for MutateOptions {
    fn default() -> Self {
        Self {
            policy: WritePolicy::Force,
            in_place: true,
            limits: Limits::default(),
        }
    }
}

/// Why a mutation stopped before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationFailure {
    /// A null or boolean key cannot address a slot.
    UnsupportedKey { position: usize },
    /// A field key met a sequence, or an index key met a mapping.
    KeyMismatch { position: usize },
    /// A scalar sits where a container is needed.
    NotAContainer { position: usize },
    /// Reaching the index would grow a sequence past
    /// [`Limits::max_sequence_growth`] or past what can be allocated.
    CannotGrow { position: usize },
}

impl fmt::Display for MutationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationFailure::UnsupportedKey { position } => {
                write!(f, "unsupported key at position {position}")
            }
            MutationFailure::KeyMismatch { position } => {
                write!(f, "key at position {position} does not fit its container")
            }
            MutationFailure::NotAContainer { position } => {
                write!(f, "no container to hold the key at position {position}")
            }
            MutationFailure::CannotGrow { position } => {
                write!(f, "sequence cannot grow to the index at position {position}")
            }
        }
    }
}

/// What a mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationStatus {
    Written,
    /// The write policy refused the final write. Containers created on the
    /// way are kept, including one that replaced a null root when the path
    /// has more than one key.
    Skipped,
    /// The path was empty. The document is left alone and [`mutate`] hands
    /// the value back as its result.
    EmptyPath,
    /// Stopped early. Everything written before the failure is kept.
    Aborted(MutationFailure),
}

impl MutationStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, MutationStatus::Written)
    }
}

/// Result of [`mutate`] and [`mutate_copy`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<'d> {
    /// The caller's document when mutating in place, the changed copy
    /// otherwise. For an empty path, the value itself.
    pub doc: Cow<'d, Value>,
    pub status: MutationStatus,
}

impl Mutation<'_> {
    pub fn into_value(self) -> Value {
        self.doc.into_owned()
    }
}

impl Mutation<'static> {
    fn empty_path(value: Value) -> Self {
        Mutation {
            doc: Cow::Owned(value),
            status: MutationStatus::EmptyPath,
        }
    }
}

/// Writes `value` at `path`, in place or on a deep copy.
///
/// With `in_place == false` this is [`mutate_copy`].
///
/// # Errors
///
/// Returns [`ConfigError::WildcardInMutationPath`] if `path` holds a
/// wildcard. Nothing is written in that case.
///
/// # Example
///
/// ```
/// use json_safe_path::{mutate, parse_path, MutateOptions, MutationStatus};
/// use serde_json::json;
///
/// let mut doc = json!({"a": 1});
/// let path = parse_path(&json!(["b", "c"])).unwrap();
/// let mutation = mutate(&mut doc, &path, json!(2), &MutateOptions::default()).unwrap();
/// assert_eq!(mutation.status, MutationStatus::Written);
/// assert_eq!(doc, json!({"a": 1, "b": {"c": 2}}));
/// ```
pub fn mutate<'d>(
    doc: &'d mut Value,
    path: &[Key],
    value: Value,
    options: &MutateOptions,
) -> Result<Mutation<'d>, ConfigError> {
    if !options.in_place {
        return mutate_copy(doc, path, value, options);
    }
    if path.is_empty() {
        return Ok(Mutation::empty_path(value));
    }
    let status = Mutator::from(options).apply(doc, path, value)?;
    Ok(Mutation {
        doc: Cow::Borrowed(doc),
        status,
    })
}

/// Writes `value` at `path` on a deep copy of `doc`.
///
/// `options.in_place` is ignored. The caller's document is never touched,
/// so discarding an aborted copy makes the write atomic.
///
/// # Errors
///
/// See [`mutate`].
///
/// # Example
///
/// ```
/// use json_safe_path::{mutate_copy, parse_path, MutateOptions, MutationStatus};
/// use serde_json::json;
///
/// let doc = json!([1, 2]);
/// let path = parse_path(&json!([5])).unwrap();
/// let mutation = mutate_copy(&doc, &path, json!(99), &MutateOptions::default()).unwrap();
/// assert_eq!(mutation.status, MutationStatus::Written);
/// assert_eq!(*mutation.doc, json!([1, 2, null, null, null, 99]));
/// assert_eq!(doc, json!([1, 2]));
/// ```
pub fn mutate_copy(
    doc: &Value,
    path: &[Key],
    value: Value,
    options: &MutateOptions,
) -> Result<Mutation<'static>, ConfigError> {
    if path.is_empty() {
        return Ok(Mutation::empty_path(value));
    }
    let mut copy = doc.clone();
    let status = Mutator::from(options).apply(&mut copy, path, value)?;
    Ok(Mutation {
        doc: Cow::Owned(copy),
        status,
    })
}

/// Writes `value` at `path` inside `doc` under `policy` and default
/// [`Limits`].
///
/// # Errors
///
/// Returns [`ConfigError::WildcardInMutationPath`] if `path` holds a
/// wildcard.
pub fn mutate_in_place(
    doc: &mut Value,
    path: &[Key],
    value: Value,
    policy: WritePolicy,
) -> Result<MutationStatus, ConfigError> {
    Mutator::new(policy, Limits::default()).apply(doc, path, value)
}

/// Writes values into documents under a [`WritePolicy`], within [`Limits`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mutator {
    policy: WritePolicy,
    limits: Limits,
}

impl From<&MutateOptions> for Mutator {
    fn from(options: &MutateOptions) -> Self {
        Self::new(options.policy, options.limits)
    }
}

impl Mutator {
    pub fn new(policy: WritePolicy, limits: Limits) -> Self {
        Self { policy, limits }
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Writes `value` at `path` inside `doc`.
    ///
    /// Missing intermediate containers are created: a sequence when the next
    /// key is an index, a mapping otherwise. Sequences are padded with nulls
    /// up to the index being written. A null root is replaced by a container
    /// suited to the first key. An empty path leaves `doc` alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WildcardInMutationPath`] if `path` holds a
    /// wildcard.
    pub fn apply(
        &self,
        doc: &mut Value,
        path: &[Key],
        value: Value,
    ) -> Result<MutationStatus, ConfigError> {
        let path = normalize(path);
        if let Some(position) = find_wildcard(&path) {
            return Err(ConfigError::WildcardInMutationPath {
                position,
                key: path[position].to_string(),
            });
        }
        let Some((last, init)) = path.split_last() else {
            return Ok(MutationStatus::EmptyPath);
        };

        if doc.is_null() {
            let root = match self.container_for(&path[0], 0) {
                Ok(root) => root,
                Err(failure) => return Ok(abort(&path, failure)),
            };
            // The key is absent from a fresh root.
            if init.is_empty() && !self.policy.allows(false) {
                return Ok(self.refuse(&path));
            }
            *doc = root;
        }

        let consumed = {
            let resolution = Resolver::new(self.limits).resolve(doc, &path);
            resolution
                .first()
                .and_then(|outcome| outcome.last_container)
                .map_or(0, |captured| captured.depth)
                .min(init.len())
        };

        let mut node = doc;
        for key in &path[..consumed] {
            node = match child_mut(node, key) {
                Some(child) => child,
                // The resolver saw these containers a moment ago.
                None => {
                    return Ok(abort(&path, MutationFailure::NotAContainer { position: consumed }))
                }
            };
        }

        for (offset, key) in init[consumed..].iter().enumerate() {
            let position = consumed + offset;
            let next = &path[position + 1];
            node = match self.descend_or_create(node, key, next, position) {
                Ok(child) => child,
                Err(failure) => return Ok(abort(&path, failure)),
            };
        }

        let position = init.len();
        let present = match slot_mut(node, last, position) {
            Ok(slot) => slot.is_some(),
            Err(failure) => return Ok(abort(&path, failure)),
        };
        if !self.policy.allows(present) {
            return Ok(self.refuse(&path));
        }
        match self.write(node, last, value, position) {
            Ok(()) => Ok(MutationStatus::Written),
            Err(failure) => Ok(abort(&path, failure)),
        }
    }

    fn refuse(&self, path: &[Key]) -> MutationStatus {
        debug!(path = %format_path(path), policy = %self.policy, "write refused by policy");
        MutationStatus::Skipped
    }

    /// A container able to hold `key`, with `key` itself still absent.
    fn container_for(&self, key: &Key, position: usize) -> Result<Value, MutationFailure> {
        match key {
            Key::Index(idx) => {
                let mut arr = Vec::new();
                self.pad(&mut arr, *idx, position)?;
                Ok(Value::Array(arr))
            }
            Key::Field(_) => Ok(Value::Object(Map::new())),
            _ => Err(MutationFailure::UnsupportedKey { position }),
        }
    }

    /// Extends `arr` with nulls to at least `len` elements.
    fn pad(&self, arr: &mut Vec<Value>, len: usize, position: usize) -> Result<(), MutationFailure> {
        let growth = len.saturating_sub(arr.len());
        if growth == 0 {
            return Ok(());
        }
        if growth > self.limits.max_sequence_growth || arr.try_reserve(growth).is_err() {
            return Err(MutationFailure::CannotGrow { position });
        }
        arr.resize(len, Value::Null);
        Ok(())
    }

    /// Stores `value` under `key`, null-padding sequences as needed.
    ///
    /// Callers check the key against the container with [`slot_mut`] first.
    fn write(
        &self,
        node: &mut Value,
        key: &Key,
        value: Value,
        position: usize,
    ) -> Result<(), MutationFailure> {
        match (node, key) {
            (Value::Array(arr), Key::Index(idx)) => {
                let len = idx
                    .checked_add(1)
                    .ok_or(MutationFailure::CannotGrow { position })?;
                self.pad(arr, len, position)?;
                if let Some(slot) = arr.get_mut(*idx) {
                    *slot = value;
                }
            }
            (Value::Object(map), Key::Field(name)) => {
                map.insert(name.clone(), value);
            }
            _ => {}
        }
        Ok(())
    }

    /// Steps from `node` into the child under `key`, creating a container
    /// suited to `next` if the child is absent or null.
    fn descend_or_create<'a>(
        &self,
        node: &'a mut Value,
        key: &Key,
        next: &Key,
        position: usize,
    ) -> Result<&'a mut Value, MutationFailure> {
        let needs_container = match slot_mut(node, key, position)? {
            Some(child) if child.is_array() || child.is_object() => false,
            Some(child) if !child.is_null() => {
                return Err(MutationFailure::NotAContainer {
                    position: position + 1,
                })
            }
            _ => true,
        };
        if needs_container {
            let fresh = self.container_for(next, position + 1)?;
            self.write(node, key, fresh, position)?;
        }
        child_mut(node, key).ok_or(MutationFailure::NotAContainer { position })
    }
}

fn abort(path: &[Key], failure: MutationFailure) -> MutationStatus {
    debug!(path = %format_path(path), %failure, "mutation aborted");
    MutationStatus::Aborted(failure)
}

fn child_mut<'a>(node: &'a mut Value, key: &Key) -> Option<&'a mut Value> {
    match (node, key) {
        (Value::Array(arr), Key::Index(idx)) => arr.get_mut(*idx),
        (Value::Object(map), Key::Field(name)) => map.get_mut(name),
        _ => None,
    }
}

/// Checks that `key` fits `node` and reports whether it is already present.
fn slot_mut<'a>(
    node: &'a mut Value,
    key: &Key,
    position: usize,
) -> Result<Option<&'a mut Value>, MutationFailure> {
    match (node, key) {
        (_, Key::Null | Key::Bool(_) | Key::Wildcard(_) | Key::Descend) => {
            Err(MutationFailure::UnsupportedKey { position })
        }
        (Value::Array(arr), Key::Index(idx)) => Ok(arr.get_mut(*idx)),
        (Value::Object(map), Key::Field(name)) => Ok(map.get_mut(name)),
        (Value::Array(_) | Value::Object(_), _) => Err(MutationFailure::KeyMismatch { position }),
        _ => Err(MutationFailure::NotAContainer { position }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse_path;
    use serde_json::json;

    fn keys(path: Value) -> Vec<Key> {
        parse_path(&path).unwrap()
    }

    fn set(mut doc: Value, path: Value, value: Value, policy: WritePolicy) -> (Value, MutationStatus) {
        let status = mutate_in_place(&mut doc, &keys(path), value, policy).unwrap();
        (doc, status)
    }

    #[test]
    fn test_policy_names() {
        for policy in WritePolicy::ALL {
            assert_eq!(policy.as_str().parse::<WritePolicy>(), Ok(policy));
        }
        assert_eq!(
            "none".parse::<WritePolicy>(),
            Err(ConfigError::UnknownWritePolicy("none".to_string()))
        );
    }

    #[test]
    fn test_options_deserialize() {
        let options: MutateOptions =
            serde_json::from_value(json!({"policy": "existing_key"})).unwrap();
        assert_eq!(options.policy, WritePolicy::ExistingKey);
        assert!(options.in_place);
    }

    #[test]
    fn test_write_existing_key() {
        let (doc, status) = set(json!({"a": {"b": 1}}), json!(["a", "b"]), json!(2), WritePolicy::Force);
        assert_eq!(status, MutationStatus::Written);
        assert_eq!(doc, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_creates_nested_mappings() {
        let (doc, status) = set(json!({"a": 1}), json!(["b", "c", "d"]), json!(true), WritePolicy::Force);
        assert_eq!(status, MutationStatus::Written);
        assert_eq!(doc, json!({"a": 1, "b": {"c": {"d": true}}}));
    }

    #[test]
    fn test_creates_padded_sequences() {
        let (doc, _) = set(json!({}), json!(["list", 2, "name"]), json!("x"), WritePolicy::Force);
        assert_eq!(doc, json!({"list": [null, null, {"name": "x"}]}));
    }

    #[test]
    fn test_index_growth() {
        let (doc, _) = set(json!([1, 2]), json!([5]), json!(99), WritePolicy::Force);
        assert_eq!(doc, json!([1, 2, null, null, null, 99]));

        let (doc, _) = set(json!({"s": [0]}), json!(["s", 3, 1]), json!("v"), WritePolicy::Force);
        assert_eq!(doc, json!({"s": [0, null, null, [null, "v"]]}));
    }

    #[test]
    fn test_null_child_is_replaced() {
        let (doc, status) = set(json!({"a": null}), json!(["a", "b"]), json!(1), WritePolicy::Force);
        assert_eq!(status, MutationStatus::Written);
        assert_eq!(doc, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_null_root_is_replaced() {
        let (doc, _) = set(Value::Null, json!(["a", 1]), json!("x"), WritePolicy::Force);
        assert_eq!(doc, json!({"a": [null, "x"]}));

        let (doc, status) = set(Value::Null, json!([1]), json!("x"), WritePolicy::MissingKey);
        assert_eq!(status, MutationStatus::Written);
        assert_eq!(doc, json!([null, "x"]));
    }

    #[test]
    fn test_policies() {
        let doc = json!({"a": 1});

        let (out, status) = set(doc.clone(), json!(["b"]), json!(2), WritePolicy::ExistingKey);
        assert_eq!(status, MutationStatus::Skipped);
        assert_eq!(out, doc);

        let (out, status) = set(doc.clone(), json!(["b"]), json!(2), WritePolicy::MissingKey);
        assert_eq!(status, MutationStatus::Written);
        assert_eq!(out, json!({"a": 1, "b": 2}));

        let (out, _) = set(doc.clone(), json!(["a"]), json!(2), WritePolicy::ExistingKey);
        assert_eq!(out, json!({"a": 2}));

        let (out, status) = set(doc.clone(), json!(["a"]), json!(2), WritePolicy::MissingKey);
        assert_eq!(status, MutationStatus::Skipped);
        assert_eq!(out, doc);
    }

    #[test]
    fn test_existing_null_counts_as_present() {
        let (out, status) = set(json!({"a": null}), json!(["a"]), json!(1), WritePolicy::MissingKey);
        assert_eq!(status, MutationStatus::Skipped);
        assert_eq!(out, json!({"a": null}));
    }

    #[test]
    fn test_skipped_write_keeps_created_containers() {
        let (out, status) = set(json!({}), json!(["a", "b"]), json!(1), WritePolicy::ExistingKey);
        assert_eq!(status, MutationStatus::Skipped);
        assert_eq!(out, json!({"a": {}}));
    }

    #[test]
    fn test_scalar_in_the_way_aborts() {
        let (out, status) = set(json!({"a": {"b": 5}}), json!(["a", "b", "c"]), json!(1), WritePolicy::Force);
        assert_eq!(
            status,
            MutationStatus::Aborted(MutationFailure::NotAContainer { position: 2 })
        );
        assert_eq!(out, json!({"a": {"b": 5}}));

        let (out, status) = set(json!("leaf"), json!(["a"]), json!(1), WritePolicy::Force);
        assert_eq!(
            status,
            MutationStatus::Aborted(MutationFailure::NotAContainer { position: 0 })
        );
        assert_eq!(out, json!("leaf"));
    }

    #[test]
    fn test_partial_write_is_not_rolled_back() {
        let (out, status) = set(json!({}), json!(["a", "b", null]), json!(1), WritePolicy::Force);
        assert_eq!(
            status,
            MutationStatus::Aborted(MutationFailure::UnsupportedKey { position: 2 })
        );
        assert_eq!(out, json!({"a": {}}));
    }

    #[test]
    fn test_key_mismatch_aborts() {
        let (out, status) = set(json!({"a": [1]}), json!(["a", "x"]), json!(1), WritePolicy::Force);
        assert_eq!(
            status,
            MutationStatus::Aborted(MutationFailure::KeyMismatch { position: 1 })
        );
        assert_eq!(out, json!({"a": [1]}));
    }

    #[test]
    fn test_wildcard_is_config_error() {
        let mut doc = json!({});
        let err = mutate_in_place(&mut doc, &keys(json!(["a", "*"])), json!(1), WritePolicy::Force)
            .unwrap_err();
        assert!(matches!(err, ConfigError::WildcardInMutationPath { position: 1, .. }));
        assert_eq!(doc, json!({}));
    }

    #[test]
    fn test_empty_path_leaves_document() {
        let (out, status) = set(json!({"a": 1}), json!([]), json!([1]), WritePolicy::Force);
        assert_eq!(status, MutationStatus::EmptyPath);
        assert!(!status.is_written());
        assert_eq!(out, json!({"a": 1}));

        let mut doc = json!({"a": 1});
        let mutation = mutate(&mut doc, &[], json!([1]), &MutateOptions::default()).unwrap();
        assert_eq!(mutation.status, MutationStatus::EmptyPath);
        assert_eq!(mutation.into_value(), json!([1]));
        assert_eq!(doc, json!({"a": 1}));
    }

    #[test]
    fn test_null_root_respects_policy_for_single_key() {
        let (doc, status) = set(Value::Null, json!([0]), json!("x"), WritePolicy::ExistingKey);
        assert_eq!(status, MutationStatus::Skipped);
        assert_eq!(doc, Value::Null);

        let (doc, status) = set(Value::Null, json!(["a"]), json!("x"), WritePolicy::ExistingKey);
        assert_eq!(status, MutationStatus::Skipped);
        assert_eq!(doc, Value::Null);

        // Longer paths keep the containers built on the way.
        let (doc, status) = set(Value::Null, json!(["a", "b"]), json!("x"), WritePolicy::ExistingKey);
        assert_eq!(status, MutationStatus::Skipped);
        assert_eq!(doc, json!({"a": {}}));
    }

    #[test]
    fn test_huge_final_index_aborts() {
        let mut doc = json!([1, 2]);
        let status =
            mutate_in_place(&mut doc, &[Key::Index(usize::MAX)], json!(9), WritePolicy::Force).unwrap();
        assert_eq!(
            status,
            MutationStatus::Aborted(MutationFailure::CannotGrow { position: 0 })
        );
        assert_eq!(doc, json!([1, 2]));

        let mut doc = Value::Null;
        let status =
            mutate_in_place(&mut doc, &[Key::Index(usize::MAX)], json!(9), WritePolicy::Force).unwrap();
        assert_eq!(
            status,
            MutationStatus::Aborted(MutationFailure::CannotGrow { position: 0 })
        );
        assert_eq!(doc, Value::Null);
    }

    #[test]
    fn test_huge_intermediate_index_aborts() {
        let path = [Key::field("a"), Key::Index(usize::MAX), Key::field("b")];

        let mut doc = json!({});
        let status = mutate_in_place(&mut doc, &path, json!(9), WritePolicy::Force).unwrap();
        assert_eq!(
            status,
            MutationStatus::Aborted(MutationFailure::CannotGrow { position: 1 })
        );
        assert_eq!(doc, json!({}));

        let mut doc = json!({"a": []});
        let status = mutate_in_place(&mut doc, &path, json!(9), WritePolicy::Force).unwrap();
        assert_eq!(
            status,
            MutationStatus::Aborted(MutationFailure::CannotGrow { position: 1 })
        );
        assert_eq!(doc, json!({"a": []}));
    }

    #[test]
    fn test_sequence_growth_limit() {
        let mutator = Mutator::new(
            WritePolicy::Force,
            Limits {
                max_sequence_growth: 4,
                ..Limits::default()
            },
        );

        let mut doc = json!([]);
        assert_eq!(mutator.apply(&mut doc, &[Key::index(3)], json!(1)), Ok(MutationStatus::Written));
        assert_eq!(doc, json!([null, null, null, 1]));

        let mut doc = json!([]);
        assert_eq!(
            mutator.apply(&mut doc, &[Key::index(4)], json!(1)),
            Ok(MutationStatus::Aborted(MutationFailure::CannotGrow { position: 0 }))
        );
        assert_eq!(doc, json!([]));

        // Growth is counted from the current length.
        let mut doc = json!([0, 0, 0]);
        assert_eq!(mutator.apply(&mut doc, &[Key::index(6)], json!(1)), Ok(MutationStatus::Written));
        assert_eq!(doc.as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn test_copy_leaves_original_untouched() {
        let mut doc = json!({"a": {"b": 1}});
        let options = MutateOptions {
            in_place: false,
            ..MutateOptions::default()
        };
        let mutation = mutate(&mut doc, &keys(json!(["a", "c"])), json!(2), &options).unwrap();
        assert!(matches!(mutation.doc, Cow::Owned(_)));
        assert_eq!(mutation.into_value(), json!({"a": {"b": 1, "c": 2}}));
        assert_eq!(doc, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_copy_borrows_shared_document() {
        let doc = json!({"a": [1]});
        let first = mutate_copy(&doc, &keys(json!(["a", 1])), json!(2), &MutateOptions::default())
            .unwrap();
        let second = mutate_copy(&doc, &keys(json!(["b"])), json!(3), &MutateOptions::default())
            .unwrap();
        assert_eq!(first.into_value(), json!({"a": [1, 2]}));
        assert_eq!(second.into_value(), json!({"a": [1], "b": 3}));
        assert_eq!(doc, json!({"a": [1]}));
    }

    #[test]
    fn test_in_place_changes_caller_document() {
        let mut doc = json!({"a": {"b": 1}});
        let mutation = mutate(&mut doc, &keys(json!(["a", "b"])), json!(3), &MutateOptions::default())
            .unwrap();
        assert_eq!(mutation.status, MutationStatus::Written);
        assert!(matches!(mutation.doc, Cow::Borrowed(_)));
        assert_eq!(doc, json!({"a": {"b": 3}}));
    }
}
