//! Turning outcomes into the values callers see.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::error::{ConfigError, ResolveError};
use crate::key::Key;
use crate::limits::Limits;
use crate::resolve::{Outcome, Resolver};
use crate::transform::{self, Transform};

/// How an [`Outcome`] becomes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The resolved value, or the default when it is absent or null.
    #[default]
    Force,
    /// The default only when a key was missing or malformed. A null leaf is
    /// returned as null.
    MissingKey,
    /// The deepest non-null value seen when the walk failed or hit null.
    LastValue,
    /// The deepest container seen, whatever the outcome.
    LastContainer,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Force,
        Strategy::MissingKey,
        Strategy::LastValue,
        Strategy::LastContainer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Force => "force",
            Strategy::MissingKey => "missing_key",
            Strategy::LastValue => "last_value",
            Strategy::LastContainer => "last_container",
        }
    }

    /// Picks the base value for one outcome, before any transform.
    pub fn select(self, outcome: &Outcome<'_>, default: &Value) -> Value {
        let resolved = outcome.value.filter(|v| !v.is_null());
        match self {
            Strategy::Force => resolved.unwrap_or(default).clone(),
            Strategy::MissingKey => {
                if outcome.status.is_wrong_key() {
                    default.clone()
                } else {
                    outcome.value.cloned().unwrap_or(Value::Null)
                }
            }
            Strategy::LastValue => match resolved {
                Some(value) if outcome.is_okay() => value.clone(),
                _ => outcome
                    .last_value
                    .map(|c| c.value.clone())
                    .unwrap_or(Value::Null),
            },
            Strategy::LastContainer => outcome
                .last_container
                .map(|c| c.value.clone())
                .unwrap_or_else(|| Value::Object(Map::new())),
        }
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`resolve`] and [`resolve_all`].
#[derive(Clone, Default)]
pub struct ResolveOptions {
    pub strategy: Strategy,
    /// Substituted by [`Strategy::Force`] and [`Strategy::MissingKey`].
    pub default: Value,
    pub transform: Option<Arc<dyn Transform>>,
    /// If false, a failing transform yields null instead of an error.
    pub raise_on_transform_failure: bool,
    pub limits: Limits,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the strategy by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownStrategy`] for an unrecognised name.
    pub fn strategy_name(self, name: &str) -> Result<Self, ConfigError> {
        Ok(self.strategy(name.parse()?))
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    pub fn transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn raise_on_transform_failure(mut self, raise: bool) -> Self {
        self.raise_on_transform_failure = raise;
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    fn process(&self, outcome: &Outcome<'_>) -> Result<Value, ResolveError> {
        let base = self.strategy.select(outcome, &self.default);
        let Some(transform) = self.transform.as_deref() else {
            return Ok(base);
        };
        if base.is_null() {
            return Ok(base);
        }
        match transform::apply(transform, &base) {
            Ok(value) => Ok(value),
            Err(err) if self.raise_on_transform_failure => Err(err.into()),
            Err(err) => {
                debug!(error = %err, status = %outcome.status, "transform failed, substituting null");
                Ok(Value::Null)
            }
        }
    }
}

impl fmt::Debug for ResolveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveOptions")
            .field("strategy", &self.strategy)
            .field("default", &self.default)
            .field("transform", &self.transform.as_ref().map(|_| "<transform>"))
            .field("raise_on_transform_failure", &self.raise_on_transform_failure)
            .field("limits", &self.limits)
            .finish()
    }
}

/// Applies the strategy and transform of `options` to every outcome.
///
/// # Errors
///
/// Fails on the first transform error when
/// [`ResolveOptions::raise_on_transform_failure`] is set.
pub fn apply_strategy(
    outcomes: &[Outcome<'_>],
    options: &ResolveOptions,
) -> Result<Vec<Value>, ResolveError> {
    outcomes.iter().map(|outcome| options.process(outcome)).collect()
}

/// Resolves `path` against `doc` and returns the first value.
///
/// Missing keys, wrong-typed keys and absent containers never fail: the
/// configured [`Strategy`] decides what comes back.
///
/// # Errors
///
/// Only a failing transform with
/// [`ResolveOptions::raise_on_transform_failure`] set produces an error.
///
/// # Example
///
/// ```
/// use json_safe_path::{parse_path, resolve, ResolveOptions, Strategy};
/// use serde_json::json;
///
/// let config = json!({"greetings": [{"hello": "world"}, {"hi": "there"}]});
///
/// let path = parse_path(&json!(["greetings", 1, "hi"])).unwrap();
/// assert_eq!(resolve(&config, &path, &ResolveOptions::new()).unwrap(), json!("there"));
///
/// let path = parse_path(&json!(["greetings", 2, "hi"])).unwrap();
/// let options = ResolveOptions::new().default_value("fallback");
/// assert_eq!(resolve(&config, &path, &options).unwrap(), json!("fallback"));
///
/// let options = ResolveOptions::new().strategy(Strategy::LastValue);
/// assert_eq!(
///     resolve(&config, &path, &options).unwrap(),
///     json!([{"hello": "world"}, {"hi": "there"}])
/// );
/// ```
pub fn resolve(doc: &Value, path: &[Key], options: &ResolveOptions) -> Result<Value, ResolveError> {
    let resolution = Resolver::new(options.limits).resolve(doc, path);
    match resolution.first() {
        Some(outcome) => options.process(outcome),
        // Only reachable when the limits allow no outcome at all.
        None => Ok(options.default.clone()),
    }
}

/// Resolves `path` against `doc` and returns every value, in discovery order.
///
/// # Errors
///
/// See [`resolve`].
///
/// # Example
///
/// ```
/// use json_safe_path::{parse_path, resolve_all, ResolveOptions};
/// use serde_json::json;
///
/// let doc = json!([{"x": 1}, {"x": 2}, {"x": 3}]);
/// let path = parse_path(&json!(["*", "x"])).unwrap();
/// let all = resolve_all(&doc, &path, &ResolveOptions::new()).unwrap();
/// assert_eq!(all, vec![json!(1), json!(2), json!(3)]);
/// ```
pub fn resolve_all(
    doc: &Value,
    path: &[Key],
    options: &ResolveOptions,
) -> Result<Vec<Value>, ResolveError> {
    let resolution = Resolver::new(options.limits).resolve(doc, path);
    apply_strategy(&resolution.outcomes, options)
}
