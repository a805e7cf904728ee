//! Cycle-safe projection of a value tree into a display-safe copy.
//!
//! The output ([`SafeValue`]) is an owned tree with the same shape as the
//! input, except:
//!
//! - functions become `[Function: <name>]`, or [`ANONYMOUS_FUNCTION`];
//! - opaque UI elements become [`ELEMENT_PLACEHOLDER`] without being entered;
//! - other opaque objects become `[Object: <type name>]`;
//! - matchers become their `describe()` text;
//! - a composite met again while still inside it becomes
//!   [`CIRCULAR_OBJECT`] or [`CIRCULAR_ARRAY`].
//!
//! Serialization never fails and always terminates. The result is meant for
//! display and hand-off to a text encoder (see [`crate::json`]); the original
//! tree stays the source of truth for callable functions.

use tracing::trace;

use crate::cycle::{CycleTracking, VisitedSet};
use crate::value::{Function, Mapping, Sequence, Value};

pub const ANONYMOUS_FUNCTION: &str = "[Function: anonymous]";
pub const ELEMENT_PLACEHOLDER: &str = "[Element]";
pub const CIRCULAR_OBJECT: &str = "[Circular Object]";
pub const CIRCULAR_ARRAY: &str = "[Circular Array]";

/// Display label for a function reference.
pub fn function_label(f: &Function) -> String {
    match f.name() {
        Some(name) => format!("[Function: {name}]"),
        None => ANONYMOUS_FUNCTION.to_string(),
    }
}

/// An owned, acyclic, function-free value tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SafeValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<SafeValue>),
    Mapping(SafeMap),
}

impl SafeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SafeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up `key` when this is a mapping.
    pub fn get(&self, key: &str) -> Option<&SafeValue> {
        match self {
            SafeValue::Mapping(map) => map.get(key),
            _ => None,
        }
    }
}

impl From<&str> for SafeValue {
    fn from(s: &str) -> Self {
        SafeValue::String(s.to_string())
    }
}

impl From<f64> for SafeValue {
    fn from(n: f64) -> Self {
        SafeValue::Number(n)
    }
}

impl From<SafeMap> for SafeValue {
    fn from(map: SafeMap) -> Self {
        SafeValue::Mapping(map)
    }
}

/// Serialized keyed mapping. Keeps the input's insertion order; equality
/// (`PartialEq`) is order-sensitive, use [`compare`](crate::compare) on the
/// lifted [`Value`] for order-insensitive checks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SafeMap {
    entries: Vec<(String, SafeValue)>,
}

impl SafeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SafeValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SafeValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SafeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<SafeValue>> FromIterator<(K, V)> for SafeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SafeMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Serializer settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    pub cycle_tracking: CycleTracking,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cycle_tracking(mut self, cycle_tracking: CycleTracking) -> Self {
        self.cycle_tracking = cycle_tracking;
        self
    }
}

/// Serialize a props mapping with default options.
///
/// ```
/// use propmock_core::{serialize, Mapping, SafeMap, SafeValue};
///
/// let node = Mapping::new().with("name", "n");
/// node.insert("self", node.clone());
/// let props = Mapping::new().with("data", node);
///
/// let expected: SafeMap = [(
///     "data",
///     SafeValue::Mapping(
///         [("name", "n"), ("self", "[Circular Object]")].into_iter().collect(),
///     ),
/// )]
/// .into_iter()
/// .collect();
/// assert_eq!(serialize(&props), expected);
/// ```
pub fn serialize(props: &Mapping) -> SafeMap {
    serialize_with(props, &SerializeOptions::default())
}

/// Serialize a props mapping. The props mapping itself is tracked, so a prop
/// that refers back to the whole props object becomes a circular marker.
pub fn serialize_with(props: &Mapping, options: &SerializeOptions) -> SafeMap {
    Serializer::new(options)
        .mapping(props)
        .unwrap_or_default()
}

/// Serialize any single value with default options.
pub fn serialize_value(value: &Value) -> SafeValue {
    serialize_value_with(value, &SerializeOptions::default())
}

pub fn serialize_value_with(value: &Value, options: &SerializeOptions) -> SafeValue {
    Serializer::new(options).value(value)
}

struct Serializer {
    visited: VisitedSet,
}

impl Serializer {
    fn new(options: &SerializeOptions) -> Self {
        Self {
            visited: VisitedSet::new(options.cycle_tracking),
        }
    }

    fn value(&mut self, value: &Value) -> SafeValue {
        match value {
            Value::Undefined => SafeValue::Undefined,
            Value::Null => SafeValue::Null,
            Value::Bool(b) => SafeValue::Bool(*b),
            Value::Number(n) => SafeValue::Number(*n),
            Value::String(s) => SafeValue::String(s.clone()),
            Value::Function(f) => SafeValue::String(function_label(f)),
            Value::Object(o) if o.is_element() => ELEMENT_PLACEHOLDER.into(),
            Value::Object(o) => SafeValue::String(format!("[Object: {}]", o.type_name())),
            Value::Matcher(m) => SafeValue::String(m.describe()),
            Value::Sequence(seq) => self.sequence(seq),
            Value::Mapping(map) => match self.mapping(map) {
                Some(map) => SafeValue::Mapping(map),
                None => CIRCULAR_OBJECT.into(),
            },
        }
    }

    fn sequence(&mut self, seq: &Sequence) -> SafeValue {
        let id = seq.identity();
        if !self.visited.enter(id) {
            trace!(?id, tracking = ?self.visited.tracking(), "circular sequence");
            return CIRCULAR_ARRAY.into();
        }
        let items = seq.items().iter().map(|item| self.value(item)).collect();
        self.visited.leave(id);
        SafeValue::Sequence(items)
    }

    /// `None` when `map` has already been entered.
    fn mapping(&mut self, map: &Mapping) -> Option<SafeMap> {
        let id = map.identity();
        if !self.visited.enter(id) {
            trace!(?id, tracking = ?self.visited.tracking(), "circular mapping");
            return None;
        }
        let entries = map
            .entries()
            .iter()
            .map(|(key, value)| (key.clone(), self.value(value)))
            .collect();
        self.visited.leave(id);
        Some(entries)
    }
}

// ============================================================================
// Lifting serialized output back into values
// ============================================================================

/// Rebuild a fresh [`Value`] tree from serialized output, e.g. to compare a
/// stored snapshot with [`compare`](crate::compare).
impl From<&SafeValue> for Value {
    fn from(value: &SafeValue) -> Self {
        match value {
            SafeValue::Undefined => Value::Undefined,
            SafeValue::Null => Value::Null,
            SafeValue::Bool(b) => Value::Bool(*b),
            SafeValue::Number(n) => Value::Number(*n),
            SafeValue::String(s) => Value::String(s.clone()),
            SafeValue::Sequence(items) => Value::sequence(items.iter().map(Value::from)),
            SafeValue::Mapping(map) => Value::Mapping(Mapping::from(map)),
        }
    }
}

impl From<&SafeMap> for Mapping {
    fn from(map: &SafeMap) -> Self {
        map.iter().map(|(k, v)| (k, Value::from(v))).collect()
    }
}
