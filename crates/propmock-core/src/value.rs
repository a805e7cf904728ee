//! The value tree handed to the comparator and serializer.
//!
//! Props on a mocked component are loosely typed: primitives, nested lists
//! and maps, callbacks, framework objects and (in expected values) matchers.
//! [`Value`] models all of them as one sum type.
//!
//! Sequences and mappings are shared handles (`Rc<RefCell<..>>`) rather than
//! owned containers. Cloning a `Value` clones the handle, which is what lets a
//! test author build the self-referential graphs the serializer must survive:
//!
//! ```
//! use propmock_core::{Mapping, Value};
//!
//! let node = Mapping::new().with("name", "n");
//! node.insert("self", node.clone());
//! assert!(node.get("self").is_some());
//! ```
//!
//! Such a graph is a reference cycle and is never freed; that is acceptable
//! for fixtures that live as long as a test.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::matcher::Matcher;
use crate::probe::Identity;
use crate::serialize::serialize_value;

/// A single datum flowing through the comparator or serializer.
///
/// `Undefined` (an absent value) and `Null` are distinct from each other and
/// from every falsy primitive.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Sequence),
    Mapping(Mapping),
    Function(Function),
    Object(Object),
    Matcher(Matcher),
}

impl Value {
    /// Build a fresh sequence value from anything convertible to values.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Sequence(items.into_iter().collect())
    }

    /// Build a fresh mapping value from key/value pairs.
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Mapping(entries.into_iter().collect())
    }

    /// A named function reference. An empty name counts as anonymous.
    pub fn function<F>(name: &str, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Value::Function(Function::new(name, body))
    }

    /// A function reference without a usable name.
    pub fn anonymous<F>(body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Value::Function(Function::anonymous(body))
    }

    /// Wrap an opaque object.
    pub fn object<O: Opaque>(object: O) -> Self {
        Value::Object(Object::new(object))
    }

    /// An opaque UI-element placeholder with the given tag.
    pub fn element(tag: impl Into<String>) -> Self {
        Value::object(Element::new(tag))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }
}

/// Debug output goes through the serializer so it terminates on cycles.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&serialize_value(self), f)
    }
}

// ============================================================================
// Sequence
// ============================================================================

/// A shared, ordered list of values.
#[derive(Clone, Default)]
pub struct Sequence(Rc<RefCell<Vec<Value>>>);

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    /// Builder form of [`Sequence::push`].
    pub fn with(self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Borrow the elements. Panics if the sequence is being mutated.
    pub fn items(&self) -> Ref<'_, [Value]> {
        Ref::map(self.0.borrow(), Vec::as_slice)
    }

    /// True when both handles point at the same sequence.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }
}

impl<V: Into<Value>> FromIterator<V> for Sequence {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Sequence(Rc::new(RefCell::new(
            iter.into_iter().map(Into::into).collect(),
        )))
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Sequence(self.clone()), f)
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// A shared string-keyed mapping.
///
/// Entries keep insertion order so serialized output reads the way the props
/// were written; equality ignores order. Inserting an existing key replaces
/// its value in place.
#[derive(Clone, Default)]
pub struct Mapping(Rc<RefCell<Vec<(String, Value)>>>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`, returning the previous value if any.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        let mut entries = self.0.borrow_mut();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                entries.push((key, value));
                None
            }
        }
    }

    /// Builder form of [`Mapping::insert`].
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        let mut entries = self.0.borrow_mut();
        let index = entries.iter().position(|(k, _)| k == key)?;
        Some(entries.remove(index).1)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().iter().any(|(k, _)| k == key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    /// Borrow the entries. Panics if the mapping is being mutated.
    pub fn entries(&self) -> Ref<'_, [(String, Value)]> {
        Ref::map(self.0.borrow(), Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// True when both handles point at the same mapping.
    pub fn ptr_eq(&self, other: &Mapping) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = Mapping::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Mapping(self.clone()), f)
    }
}

// ============================================================================
// Function
// ============================================================================

type Body = dyn Fn(&[Value]) -> Value;

struct FunctionInner {
    name: Option<String>,
    body: Box<Body>,
}

/// A callable reference. Two functions are equal only if they are the same
/// reference; behavior and name play no part.
#[derive(Clone)]
pub struct Function(Rc<FunctionInner>);

impl Function {
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        let name = (!name.is_empty()).then(|| name.to_string());
        Function(Rc::new(FunctionInner {
            name,
            body: Box::new(body),
        }))
    }

    pub fn anonymous<F>(body: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Function(Rc::new(FunctionInner {
            name: None,
            body: Box::new(body),
        }))
    }

    /// The declared name, or `None` for an anonymous function.
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0.body)(args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Function")
            .field(&self.name().unwrap_or("anonymous"))
            .finish()
    }
}

// ============================================================================
// Opaque objects
// ============================================================================

/// Anything the comparator and serializer must not look inside.
///
/// Implementors report a type name (used by `any_instance_of` and the
/// `[Object: ..]` marker) and may declare themselves UI elements, which the
/// serializer replaces with the element placeholder.
pub trait Opaque: 'static {
    fn type_name(&self) -> &str;

    fn is_element(&self) -> bool {
        false
    }
}

/// A shared opaque object. Equal only to itself.
#[derive(Clone)]
pub struct Object(Rc<dyn Opaque>);

impl Object {
    pub fn new<O: Opaque>(object: O) -> Self {
        Object(Rc::new(object))
    }

    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn is_element(&self) -> bool {
        self.0.is_element()
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Object").field(&self.type_name()).finish()
    }
}

/// A rendered UI element (e.g. a child passed through props).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Opaque for Element {
    fn type_name(&self) -> &str {
        "Element"
    }

    fn is_element(&self) -> bool {
        true
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items.into_iter().collect())
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Sequence(seq)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Matcher> for Value {
    fn from(m: Matcher) -> Self {
        Value::Matcher(m)
    }
}

/// `None` becomes `Undefined`, matching an omitted optional prop.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}
