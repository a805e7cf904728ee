//! The asymmetric matcher protocol.
//!
//! A matcher is an expected value that says "any value satisfying C" instead
//! of naming a literal. The comparator recognizes one by pattern match on
//! [`Value::Matcher`] and hands it the other operand, whichever side the
//! matcher was written on.
//!
//! Third-party predicates participate by implementing [`AsymmetricMatch`];
//! the comparator never needs to know their concrete type.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::compare::Comparator;
use crate::probe::Identity;
use crate::value::Value;

/// A predicate usable in place of an expected value.
///
/// `matches` must be pure. A panic raised inside it is not caught: it unwinds
/// through [`compare`](crate::compare) to the caller.
pub trait AsymmetricMatch {
    fn matches(&self, candidate: &Value) -> bool;

    /// `matches` as called from inside a comparison. Matchers that compare
    /// nested values should override this and recurse through `comparator`
    /// so that cycles running through the matcher terminate.
    fn matches_within(&self, candidate: &Value, comparator: &mut Comparator) -> bool {
        let _ = comparator;
        self.matches(candidate)
    }

    /// Short human-readable form, e.g. `Any<Number>`. Also used as the
    /// matcher's serialized form.
    fn describe(&self) -> String;
}

/// A shared, type-erased matcher. Owned by the test author; the comparator
/// only borrows it.
#[derive(Clone)]
pub struct Matcher(Rc<dyn AsymmetricMatch>);

impl Matcher {
    pub fn new<M: AsymmetricMatch + 'static>(matcher: M) -> Self {
        Matcher(Rc::new(matcher))
    }

    /// A matcher from a closure.
    ///
    /// ```
    /// use propmock_core::{compare, Matcher, Value};
    ///
    /// let even = Matcher::from_fn("Even", |v| v.as_f64().is_some_and(|n| n % 2.0 == 0.0));
    /// assert!(compare(&Value::from(4), &even.clone().into()));
    /// assert!(!compare(&Value::from(3), &even.into()));
    /// ```
    pub fn from_fn<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + 'static,
    {
        Matcher::new(FnMatcher {
            description: description.into(),
            predicate,
        })
    }

    pub fn matches(&self, candidate: &Value) -> bool {
        self.0.matches(candidate)
    }

    pub fn matches_within(&self, candidate: &Value, comparator: &mut Comparator) -> bool {
        self.0.matches_within(candidate, comparator)
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }

    pub fn ptr_eq(&self, other: &Matcher) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.describe()).finish()
    }
}

struct FnMatcher<F> {
    description: String,
    predicate: F,
}

impl<F: Fn(&Value) -> bool> AsymmetricMatch for FnMatcher<F> {
    fn matches(&self, candidate: &Value) -> bool {
        (self.predicate)(candidate)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// Matcher delegation step of the comparator.
///
/// Returns `Some(verdict)` when either operand is a matcher, preferring the
/// expected side (`b`), and `None` when neither is.
pub fn delegate(a: &Value, b: &Value) -> Option<bool> {
    let (matcher, candidate) = split(a, b)?;
    let verdict = matcher.matches(candidate);
    trace!(matcher = %matcher.describe(), verdict, "matcher delegation");
    Some(verdict)
}

/// The matcher and the value it should judge, expected side first.
pub fn split<'v>(a: &'v Value, b: &'v Value) -> Option<(&'v Matcher, &'v Value)> {
    match (a, b) {
        (_, Value::Matcher(m)) => Some((m, a)),
        (Value::Matcher(m), _) => Some((m, b)),
        _ => None,
    }
}
