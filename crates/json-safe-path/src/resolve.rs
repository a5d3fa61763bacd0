//! Path resolution.
//!
//! A path without wildcards yields exactly one [`Outcome`]. Wildcards fan the
//! walk out over every child of the node they meet, so a single query can
//! produce many outcomes. The walk is depth-first and uses an explicit stack:
//! outcomes come out in discovery order, children in container order.

use serde_json::Value;
use tracing::{trace, warn};

use crate::key::Key;
use crate::limits::Limits;
use crate::path::{format_path, normalize};
use crate::status::Status;

/// Structural kind of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Mapping,
            Value::Array(_) => NodeKind::Sequence,
            _ => NodeKind::Scalar,
        }
    }

    pub fn is_container(self) -> bool {
        self != NodeKind::Scalar
    }
}

/// A value seen while walking, with the depth it was found at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Captured<'a> {
    pub value: &'a Value,
    /// Levels below the document root. The root itself is depth 0.
    pub depth: usize,
}

/// Result of walking one concrete path.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<'a> {
    pub status: Status,
    /// The resolved node. `None` unless `status` is [`Status::Okay`].
    pub value: Option<&'a Value>,
    /// Deepest non-null value seen along the way.
    pub last_value: Option<Captured<'a>>,
    /// Deepest mapping or sequence seen along the way.
    pub last_container: Option<Captured<'a>>,
}

impl Outcome<'_> {
    pub fn is_okay(&self) -> bool {
        self.status.is_okay()
    }
}

/// All outcomes of one resolution, after aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution<'a> {
    pub outcomes: Vec<Outcome<'a>>,
    /// Set when [`Limits`] cut the traversal short.
    pub truncated: bool,
}

impl<'a> Resolution<'a> {
    pub fn first(&self) -> Option<&Outcome<'a>> {
        self.outcomes.first()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Resolved values of the successful outcomes, in discovery order.
    pub fn values(&self) -> impl Iterator<Item = &'a Value> + '_ {
        self.outcomes.iter().filter_map(|o| o.value)
    }
}

/// Looks `key` up in `node`, one level deep.
///
/// # Errors
///
/// Returns the [`Status`] describing why the step failed.
///
/// # Example
///
/// ```
/// use json_safe_path::{lookup, Key, Status};
/// use serde_json::json;
///
/// let doc = json!({"a": [10, 20]});
/// assert_eq!(lookup(&doc, &Key::field("a")), Ok(&json!([10, 20])));
/// assert_eq!(lookup(&doc["a"], &Key::index(2)), Err(Status::KeyMissing));
/// assert_eq!(lookup(&doc["a"][0], &Key::index(0)), Err(Status::StorageWrongType));
/// ```
pub fn lookup<'a>(node: &'a Value, key: &Key) -> Result<&'a Value, Status> {
    if node.is_null() {
        return Err(Status::StorageNull);
    }
    match key {
        Key::Null => return Err(Status::KeyNull),
        Key::Bool(_) | Key::Wildcard(_) | Key::Descend => return Err(Status::KeyWrongType),
        Key::Field(_) | Key::Index(_) => {}
    }
    match (node, key) {
        (Value::Array(arr), Key::Index(idx)) => arr.get(*idx).ok_or(Status::KeyMissing),
        (Value::Object(map), Key::Field(name)) => map.get(name).ok_or(Status::KeyMissing),
        (Value::Array(_), _) | (Value::Object(_), _) => Err(Status::KeyMissing),
        _ => Err(Status::StorageWrongType),
    }
}

/// Status reported when a wildcard meets a node it cannot fan out over.
fn childless_status(node: &Value) -> Status {
    match node {
        Value::Null => Status::StorageNull,
        Value::Array(_) | Value::Object(_) => Status::KeyMissing,
        _ => Status::StorageWrongType,
    }
}

fn children(node: &Value) -> Vec<&Value> {
    match node {
        Value::Array(arr) => arr.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => Vec::new(),
    }
}

/// Fallback captures carried along one chain.
#[derive(Debug, Clone, Copy, Default)]
struct Trail<'a> {
    last_value: Option<Captured<'a>>,
    last_container: Option<Captured<'a>>,
}

impl<'a> Trail<'a> {
    fn start(root: &'a Value) -> Self {
        Self::default().visit(root, 0)
    }

    fn visit(self, node: &'a Value, depth: usize) -> Self {
        let here = Captured { value: node, depth };
        Self {
            last_value: if node.is_null() { self.last_value } else { Some(here) },
            last_container: if NodeKind::of(node).is_container() {
                Some(here)
            } else {
                self.last_container
            },
        }
    }

    fn outcome(self, status: Status, value: Option<&'a Value>) -> Outcome<'a> {
        Outcome {
            status,
            value,
            last_value: self.last_value,
            last_container: self.last_container,
        }
    }
}

struct Frame<'a> {
    node: &'a Value,
    position: usize,
    /// Levels still to match for a partially consumed `Key::Wildcard`.
    pending: Option<usize>,
    depth: usize,
    trail: Trail<'a>,
}

impl<'a> Frame<'a> {
    fn child(&self, child: &'a Value, position: usize, pending: Option<usize>) -> Self {
        let depth = self.depth + 1;
        Frame {
            node: child,
            position,
            pending,
            depth,
            trail: self.trail.visit(child, depth),
        }
    }
}

/// Walks documents along paths, within [`Limits`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    limits: Limits,
}

impl Resolver {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Resolves `path` against `doc`.
    ///
    /// If at least one outcome succeeded, only the successful ones are kept.
    /// Otherwise every failed outcome is returned so a strategy can still
    /// pick a fallback from it.
    pub fn resolve<'a>(&self, doc: &'a Value, path: &[Key]) -> Resolution<'a> {
        let path = normalize(path);
        // Concrete paths are never pruned, whatever their length.
        let max_depth = self.limits.max_depth.max(path.len());

        let mut outcomes = Vec::new();
        let mut truncated = false;
        let mut stack = vec![Frame {
            node: doc,
            position: 0,
            pending: None,
            depth: 0,
            trail: Trail::start(doc),
        }];

        while let Some(frame) = stack.pop() {
            if outcomes.len() >= self.limits.max_outcomes {
                truncated = true;
                break;
            }
            if frame.depth > max_depth {
                truncated = true;
                continue;
            }
            let Some(key) = path.get(frame.position) else {
                outcomes.push(frame.trail.outcome(Status::Okay, Some(frame.node)));
                continue;
            };
            match key {
                Key::Wildcard(levels) => {
                    let remaining = frame.pending.unwrap_or(*levels);
                    let kids = children(frame.node);
                    if kids.is_empty() {
                        let status = childless_status(frame.node);
                        outcomes.push(frame.trail.outcome(status, None));
                        continue;
                    }
                    for child in kids.into_iter().rev() {
                        let next = if remaining > 1 {
                            frame.child(child, frame.position, Some(remaining - 1))
                        } else {
                            frame.child(child, frame.position + 1, None)
                        };
                        stack.push(next);
                    }
                }
                Key::Descend => {
                    let kids = children(frame.node);
                    if kids.is_empty() {
                        let status = childless_status(frame.node);
                        outcomes.push(frame.trail.outcome(status, None));
                        continue;
                    }
                    for child in kids.into_iter().rev() {
                        // Pushed first, popped last: go deeper with the wildcard kept.
                        stack.push(frame.child(child, frame.position, None));
                        stack.push(frame.child(child, frame.position + 1, None));
                    }
                }
                key => match lookup(frame.node, key) {
                    Ok(child) => stack.push(frame.child(child, frame.position + 1, None)),
                    Err(status) => {
                        trace!(%key, position = frame.position, %status, "lookup failed");
                        outcomes.push(frame.trail.outcome(status, None));
                    }
                },
            }
        }

        if truncated {
            warn!(
                path = %format_path(&path),
                emitted = outcomes.len(),
                max_depth = self.limits.max_depth,
                max_outcomes = self.limits.max_outcomes,
                "resolution truncated by limits"
            );
        }

        if outcomes.iter().any(Outcome::is_okay) {
            outcomes.retain(Outcome::is_okay);
        }
        Resolution {
            outcomes,
            truncated,
        }
    }
}

/// Resolves `path` against `doc` with default [`Limits`].
pub fn resolve_outcomes<'a>(doc: &'a Value, path: &[Key]) -> Resolution<'a> {
    Resolver::default().resolve(doc, path)
}
