//! Safe path-based access to nested JSON-like documents.
//!
//! Documents are [`serde_json::Value`] trees of mappings and sequences, such
//! as parsed configuration files. [`resolve`] reads the value at the end of a
//! key path and [`mutate`] writes one. Neither fails on a missing key, a
//! wrong-typed key or an absent container: reads report a [`Status`] that a
//! [`Strategy`] turns into a value, writes create the containers they need
//! under a [`WritePolicy`].
//!
//! Paths may hold wildcards. `Key::Wildcard(n)` matches exactly `n` levels and
//! `Key::Descend` matches any depth, fanning one query out into many results.
//!
//! # Example
//!
//! ```
//! use json_safe_path::{
//!     mutate_in_place, parse_path, resolve, resolve_all, ResolveOptions, Strategy, WritePolicy,
//! };
//! use serde_json::json;
//!
//! let mut config = json!({
//!     "servers": [
//!         {"host": "a.example", "port": 80},
//!         {"host": "b.example", "port": 8080}
//!     ]
//! });
//!
//! // Missing keys fall back to the default.
//! let path = parse_path(&json!(["servers", 0, "timeout"])).unwrap();
//! let options = ResolveOptions::new().default_value(30);
//! assert_eq!(resolve(&config, &path, &options).unwrap(), json!(30));
//!
//! // Wildcards collect every match.
//! let path = parse_path(&json!(["servers", "*", "port"])).unwrap();
//! let ports = resolve_all(&config, &path, &ResolveOptions::new()).unwrap();
//! assert_eq!(ports, vec![json!(80), json!(8080)]);
//!
//! // Writes create what is missing.
//! let path = parse_path(&json!(["servers", 2, "host"])).unwrap();
//! mutate_in_place(&mut config, &path, json!("c.example"), WritePolicy::Force).unwrap();
//! assert_eq!(config["servers"][2], json!({"host": "c.example"}));
//!
//! // Strategies pick fallbacks from a failed walk.
//! let path = parse_path(&json!(["servers", 1, "port", "tcp"])).unwrap();
//! let options = ResolveOptions::new().strategy(Strategy::LastContainer);
//! assert_eq!(
//!     resolve(&config, &path, &options).unwrap(),
//!     json!({"host": "b.example", "port": 8080})
//! );
//! ```

pub mod error;
pub use error::{ConfigError, ResolveError, TransformError};

pub mod key;
pub use key::{Key, KeyKind};

pub mod limits;
pub use limits::Limits;

pub mod mutate;
pub use mutate::{
    mutate, mutate_copy, mutate_in_place, MutateOptions, Mutation, MutationFailure,
    MutationStatus, Mutator, WritePolicy,
};

pub mod path;
pub use path::{find_wildcard, format_path, normalize, parse_path, Path};

pub mod resolve;
pub use resolve::{lookup, resolve_outcomes, Captured, NodeKind, Outcome, Resolution, Resolver};

pub mod status;
pub use status::Status;

pub mod strategy;
pub use strategy::{apply_strategy, resolve, resolve_all, ResolveOptions, Strategy};

pub mod transform;
pub use transform::{Transform, TransformArgs};
