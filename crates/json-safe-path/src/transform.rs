//! Post-processing of resolved values.

use serde_json::{Map, Value};

use crate::error::TransformError;

/// Arguments handed to a [`Transform`].
///
/// Sequences are unpacked positionally and mappings by name, so a transform
/// can read a resolved sub-document as if it were a call's argument list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformArgs<'a> {
    Positional(&'a [Value]),
    Keyword(&'a Map<String, Value>),
    Value(&'a Value),
}

impl<'a> TransformArgs<'a> {
    /// Unpacks `value` according to its container kind.
    pub fn unpack(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => TransformArgs::Positional(items),
            Value::Object(map) => TransformArgs::Keyword(map),
            other => TransformArgs::Value(other),
        }
    }

    pub fn positional(&self) -> Option<&'a [Value]> {
        match *self {
            TransformArgs::Positional(items) => Some(items),
            _ => None,
        }
    }

    pub fn keyword(&self, name: &str) -> Option<&'a Value> {
        match *self {
            TransformArgs::Keyword(map) => map.get(name),
            _ => None,
        }
    }

    /// Rebuilds the value the arguments were unpacked from.
    pub fn to_value(&self) -> Value {
        match *self {
            TransformArgs::Positional(items) => Value::Array(items.to_vec()),
            TransformArgs::Keyword(map) => Value::Object(map.clone()),
            TransformArgs::Value(value) => value.clone(),
        }
    }
}

/// Function applied to every non-null resolved value.
pub trait Transform {
    fn call(&self, args: TransformArgs<'_>) -> Result<Value, TransformError>;

    /// Whether containers are unpacked into [`TransformArgs::Positional`] and
    /// [`TransformArgs::Keyword`]. When `false` the whole value is passed as
    /// [`TransformArgs::Value`].
    fn unpacks(&self) -> bool {
        true
    }
}

impl<F> Transform for F
where
    F: Fn(TransformArgs<'_>) -> Result<Value, TransformError>,
{
    fn call(&self, args: TransformArgs<'_>) -> Result<Value, TransformError> {
        self(args)
    }
}

/// A transform that always receives the resolved value whole.
#[derive(Debug, Clone, Copy)]
pub struct Direct<F>(pub F);

impl<F> Transform for Direct<F>
where
    F: Fn(&Value) -> Result<Value, TransformError>,
{
    fn call(&self, args: TransformArgs<'_>) -> Result<Value, TransformError> {
        match args {
            TransformArgs::Value(value) => (self.0)(value),
            packed => (self.0)(&packed.to_value()),
        }
    }

    fn unpacks(&self) -> bool {
        false
    }
}

/// Wraps `f` so it sees resolved values without unpacking.
///
/// # Example
///
/// ```
/// use json_safe_path::{resolve, transform, Key, ResolveOptions};
/// use serde_json::{json, Value};
///
/// let doc = json!({"status": 200});
/// let options = ResolveOptions::new()
///     .transform(transform::direct(|v: &Value| Ok(Value::Bool(v != &json!(404)))));
/// let ok = resolve(&doc, &[Key::field("status")], &options).unwrap();
/// assert_eq!(ok, json!(true));
/// ```
pub fn direct<F>(f: F) -> Direct<F>
where
    F: Fn(&Value) -> Result<Value, TransformError>,
{
    Direct(f)
}

/// Runs `transform` on `value`, unpacking it unless the transform opts out.
pub(crate) fn apply(transform: &dyn Transform, value: &Value) -> Result<Value, TransformError> {
    let args = if transform.unpacks() {
        TransformArgs::unpack(value)
    } else {
        TransformArgs::Value(value)
    };
    transform.call(args)
}
