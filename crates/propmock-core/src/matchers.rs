//! Built-in matchers.
//!
//! These mirror the asymmetric matchers test authors already know from
//! JavaScript test runners (`expect.any(Number)`, `expect.anything()`,
//! `expect.objectContaining(..)`), built on the public [`AsymmetricMatch`]
//! protocol so they carry no special treatment inside the comparator.

use crate::compare::Comparator;
use crate::matcher::{AsymmetricMatch, Matcher};
use crate::probe::ValueKind;
use crate::serialize::serialize_value;
use crate::value::{Mapping, Value};

/// Matches anything except `Null` and `Undefined`.
pub fn anything() -> Matcher {
    Matcher::from_fn("Anything", |v| !v.is_nullish())
}

/// Matches any value of the given kind.
pub fn any(kind: ValueKind) -> Matcher {
    Matcher::from_fn(format!("Any<{kind}>"), move |v| v.kind() == kind)
}

pub fn any_string() -> Matcher {
    any(ValueKind::String)
}

pub fn any_number() -> Matcher {
    any(ValueKind::Number)
}

pub fn any_bool() -> Matcher {
    any(ValueKind::Bool)
}

pub fn any_function() -> Matcher {
    any(ValueKind::Function)
}

pub fn any_array() -> Matcher {
    any(ValueKind::Sequence)
}

pub fn any_object() -> Matcher {
    any(ValueKind::Mapping)
}

/// Matches opaque objects whose [`Opaque::type_name`](crate::Opaque::type_name)
/// equals `type_name`.
pub fn any_instance_of(type_name: impl Into<String>) -> Matcher {
    let type_name = type_name.into();
    Matcher::from_fn(format!("Any<{type_name}>"), move |v| {
        matches!(v, Value::Object(o) if o.type_name() == type_name)
    })
}

/// Matches strings containing `needle`.
pub fn string_containing(needle: impl Into<String>) -> Matcher {
    let needle = needle.into();
    Matcher::from_fn(format!("StringContaining {needle:?}"), move |v| {
        v.as_str().is_some_and(|s| s.contains(needle.as_str()))
    })
}

/// Matches strings starting with `prefix`.
pub fn string_starting_with(prefix: impl Into<String>) -> Matcher {
    let prefix = prefix.into();
    Matcher::from_fn(format!("StringStartingWith {prefix:?}"), move |v| {
        v.as_str().is_some_and(|s| s.starts_with(prefix.as_str()))
    })
}

/// Matches numbers within `0.5 * 10^-digits` of `expected`.
///
/// Equal infinities match each other; `NaN` matches nothing.
pub fn close_to(expected: f64, digits: i32) -> Matcher {
    let tolerance = 10f64.powi(-digits) / 2.0;
    Matcher::from_fn(
        format!("NumberCloseTo {expected} ({digits} digits)"),
        move |v| match v.as_f64() {
            Some(actual) if actual == expected => true,
            Some(actual) => (actual - expected).abs() < tolerance,
            None => false,
        },
    )
}

/// Matches mappings that contain every key of `expected` with an equal value.
/// Extra keys on the candidate are ignored.
pub fn object_containing(expected: Mapping) -> Matcher {
    Matcher::new(ObjectContaining { expected })
}

/// Matches sequences in which every expected item equals at least one item,
/// in any order.
pub fn array_containing(expected: Vec<Value>) -> Matcher {
    Matcher::new(ArrayContaining { expected })
}

struct ObjectContaining {
    expected: Mapping,
}

impl AsymmetricMatch for ObjectContaining {
    fn matches(&self, candidate: &Value) -> bool {
        self.matches_within(candidate, &mut Comparator::new())
    }

    fn matches_within(&self, candidate: &Value, comparator: &mut Comparator) -> bool {
        let Value::Mapping(actual) = candidate else {
            return false;
        };
        self.expected.entries().iter().all(|(key, expected)| {
            actual
                .get(key)
                .is_some_and(|value| comparator.equals(&value, expected))
        })
    }

    fn describe(&self) -> String {
        format!(
            "ObjectContaining {:?}",
            serialize_value(&Value::Mapping(self.expected.clone()))
        )
    }
}

struct ArrayContaining {
    expected: Vec<Value>,
}

impl AsymmetricMatch for ArrayContaining {
    fn matches(&self, candidate: &Value) -> bool {
        self.matches_within(candidate, &mut Comparator::new())
    }

    fn matches_within(&self, candidate: &Value, comparator: &mut Comparator) -> bool {
        let Value::Sequence(actual) = candidate else {
            return false;
        };
        let items = actual.items();
        self.expected
            .iter()
            .all(|expected| items.iter().any(|item| comparator.equals(item, expected)))
    }

    fn describe(&self) -> String {
        let items: Vec<_> = self.expected.iter().map(serialize_value).collect();
        format!("ArrayContaining {items:?}")
    }
}
