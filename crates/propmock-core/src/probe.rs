//! Capability probes: classify a [`Value`] without caring where it came from.
//!
//! The comparator and serializer only ask a handful of questions about a
//! node: what kind is it, is it null-ish, is it a matcher or a UI element,
//! and which shared allocation (if any) backs it. Those questions live here
//! so both algorithms answer them the same way.

use std::fmt;
use std::rc::Rc;

use crate::matcher::Matcher;
use crate::value::Value;

/// The runtime kind of a value. Two values of different kinds are never
/// structurally equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
    Function,
    Object,
    Matcher,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Undefined => "Undefined",
            ValueKind::Null => "Null",
            ValueKind::Bool => "Boolean",
            ValueKind::Number => "Number",
            ValueKind::String => "String",
            ValueKind::Sequence => "Array",
            ValueKind::Mapping => "Object",
            ValueKind::Function => "Function",
            ValueKind::Object => "Opaque",
            ValueKind::Matcher => "Matcher",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Address of a shared allocation, used as a reference-identity key.
///
/// Only meaningful while the value it was taken from is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(usize);

impl Identity {
    pub(crate) fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Identity(Rc::as_ptr(rc).cast::<()>() as usize)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
            Value::Function(_) => ValueKind::Function,
            Value::Object(_) => ValueKind::Object,
            Value::Matcher(_) => ValueKind::Matcher,
        }
    }

    /// `Null` or `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Sequences and mappings.
    pub fn is_composite(&self) -> bool {
        self.is_sequence() || self.is_mapping()
    }

    pub fn as_matcher(&self) -> Option<&Matcher> {
        match self {
            Value::Matcher(m) => Some(m),
            _ => None,
        }
    }

    /// True for opaque objects that declare themselves UI elements.
    pub fn is_element(&self) -> bool {
        matches!(self, Value::Object(o) if o.is_element())
    }

    /// Reference identity for handle-backed values; `None` for primitives.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Sequence(seq) => Some(seq.identity()),
            Value::Mapping(map) => Some(map.identity()),
            Value::Function(f) => Some(f.identity()),
            Value::Object(o) => Some(o.identity()),
            Value::Matcher(m) => Some(m.identity()),
            _ => None,
        }
    }

    /// Same reference, or primitives equal under strict equality.
    ///
    /// Numbers compare with IEEE semantics: `NaN` is not equal to itself and
    /// `0.0` equals `-0.0`.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => match (self.identity(), other.identity()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}
