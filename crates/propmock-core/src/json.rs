//! JSON hand-off for serialized props.
//!
//! [`SafeValue`] and [`SafeMap`] implement `serde::Serialize` with the same
//! conventions a JavaScript text encoder applies to props:
//!
//! - `Undefined` mapping entries are omitted;
//! - `Undefined` sequence items become `null`;
//! - non-finite numbers become `null`;
//! - integral numbers are written without a fractional part (`42`, not `42.0`).
//!
//! The reverse direction, `Value: From<serde_json::Value>`, is for building
//! fixtures from JSON literals.

use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::Value as Json;

use crate::error::Result;
use crate::serialize::{SafeMap, SafeValue};
use crate::value::Value;

/// Largest integer an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for SafeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SafeValue::Undefined | SafeValue::Null => serializer.serialize_unit(),
            SafeValue::Bool(b) => serializer.serialize_bool(*b),
            SafeValue::Number(n) => serialize_number(*n, serializer),
            SafeValue::String(s) => serializer.serialize_str(s),
            SafeValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            SafeValue::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for SafeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let defined: Vec<_> = self
            .iter()
            .filter(|(_, v)| !matches!(v, SafeValue::Undefined))
            .collect();
        let mut map = serializer.serialize_map(Some(defined.len()))?;
        for (key, value) in defined {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn serialize_number<S: Serializer>(n: f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if !n.is_finite() {
        serializer.serialize_unit()
    } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        // -0.0 lands here too and is written as 0.
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

/// Convert a serialized tree into a `serde_json::Value`.
pub fn to_json_value(value: &SafeValue) -> Result<Json> {
    Ok(serde_json::to_value(value)?)
}

/// Compact JSON text for serialized props, e.g. for a debug attribute.
pub fn to_json_string(props: &SafeMap) -> Result<String> {
    Ok(serde_json::to_string(props)?)
}

/// Indented JSON text for serialized props, e.g. for a failure message.
pub fn to_json_string_pretty(props: &SafeMap) -> Result<String> {
    Ok(serde_json::to_string_pretty(props)?)
}

/// Parse JSON text into a fresh [`Value`] tree.
///
/// ```
/// use propmock_core::{compare, from_json_str, Mapping, Value};
///
/// let parsed = from_json_str(r#"{"a":1,"tags":["x"]}"#).unwrap();
/// let built = Mapping::new().with("a", 1).with("tags", Value::sequence(["x"]));
/// assert!(compare(&parsed, &built.into()));
/// ```
pub fn from_json_str(json: &str) -> Result<Value> {
    let parsed: Json = serde_json::from_str(json)?;
    Ok(Value::from(parsed))
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::sequence(items.into_iter().map(Value::from)),
            Json::Object(map) => Value::mapping(map.into_iter().map(|(k, v)| (k, Value::from(v)))),
        }
    }
}
