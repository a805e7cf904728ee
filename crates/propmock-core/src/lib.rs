//! # propmock-core
//!
//! Value-tree algorithms behind prop assertions on mocked components.
//!
//! A test replaces a real component with a stand-in that records the props it
//! receives. This crate supplies the two pieces that make assertions on those
//! props trustworthy and debuggable:
//!
//! - a **structural comparator** ([`compare`]) with a pluggable matcher escape
//!   hatch, so `any_number()` or `object_containing(..)` can stand in for a
//!   literal expected value;
//! - a **cycle-safe serializer** ([`serialize`]) that projects an arbitrary
//!   value tree into a display-safe copy, replacing functions, opaque UI
//!   elements and back-references with fixed markers.
//!
//! ## Quick start
//!
//! ```rust
//! use propmock_core::{compare, matchers, serialize, Mapping, SafeValue, Value};
//!
//! let props = Mapping::new()
//!     .with("label", "Save")
//!     .with("count", 3)
//!     .with("onClick", Value::function("handleClick", |_| Value::Undefined));
//!
//! let expected = Mapping::new()
//!     .with("label", "Save")
//!     .with("count", matchers::any_number())
//!     .with("onClick", matchers::any_function());
//! assert!(compare(&props.clone().into(), &expected.into()));
//!
//! let safe = serialize(&props);
//! assert_eq!(
//!     safe.get("onClick"),
//!     Some(&SafeValue::String("[Function: handleClick]".into()))
//! );
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the `Value` tree (primitives, shared sequences and mappings,
//!   functions, opaque objects, matchers)
//! - [`probe`] — capability probes: kind, identity, strict equality
//! - [`matcher`] — the asymmetric matcher protocol
//! - [`matchers`] — built-in matchers (`anything`, `any`, `close_to`, ...)
//! - [`compare`] — structural equality
//! - [`cycle`] — identity-keyed visited tracking for traversals
//! - [`serialize`] — display-safe projection (`SafeValue`)
//! - [`json`] — JSON hand-off for serialized trees
//! - [`error`] — error types for the JSON hand-off

pub mod compare;
pub mod cycle;
pub mod error;
pub mod json;
pub mod matcher;
pub mod matchers;
pub mod probe;
pub mod serialize;
pub mod value;

pub use compare::{compare, Comparator};
pub use cycle::{CycleTracking, VisitedSet};
pub use error::CoreError;
pub use json::{from_json_str, to_json_string, to_json_string_pretty, to_json_value};
pub use matcher::{AsymmetricMatch, Matcher};
pub use probe::{Identity, ValueKind};
pub use serialize::{
    serialize, serialize_value, serialize_value_with, serialize_with, SafeMap, SafeValue,
    SerializeOptions,
};
pub use value::{Element, Function, Mapping, Object, Opaque, Sequence, Value};
