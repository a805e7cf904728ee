//! Structural equality with a matcher escape hatch.
//!
//! Rules, first match wins:
//!
//! 1. Same reference, or primitives equal under strict equality → equal.
//! 2. Exactly one side null-ish (or `Null` against `Undefined`) → unequal.
//! 3. Either side is a matcher → the matcher's verdict on the other side.
//!    The expected side (`b`) is consulted first.
//! 4. Different kinds → unequal.
//! 5. Sequences: same length and pairwise equal.
//! 6. Mappings: same key count, every key of `a` present in `b`, and equal
//!    values per key. Key order is irrelevant.
//! 7. Anything else (distinct functions, distinct opaque objects) → unequal.
//!
//! Cyclic graphs terminate: while a pair of composites is being compared it
//! sits on an in-progress stack, and meeting the same pair again further
//! down is treated as equal. A composite handed to a matcher is pushed the
//! same way, paired with the matcher, and container matchers recurse through
//! the same [`Comparator`], so cycles that pass through a matcher terminate
//! too. Acyclic verdicts are unaffected.

use tracing::trace;

use crate::matcher;
use crate::probe::Identity;
use crate::value::{Mapping, Sequence, Value};

/// Compare `actual` against `expected`.
///
/// Total: returns `false` for every kind of mismatch and never errors. A
/// panicking matcher unwinds through this call.
///
/// ```
/// use propmock_core::{compare, Mapping, Value};
///
/// let a = Mapping::new().with("a", 1).with("b", 2);
/// let b = Mapping::new().with("b", 2).with("a", 1);
/// assert!(compare(&a.into(), &b.into()));
/// assert!(!compare(&Value::Null, &Value::Undefined));
/// ```
pub fn compare(actual: &Value, expected: &Value) -> bool {
    Comparator::new().equals(actual, expected)
}

/// One comparison in flight, carrying its in-progress stack.
///
/// Matchers that compare nested values (see
/// [`AsymmetricMatch::matches_within`](crate::AsymmetricMatch::matches_within))
/// recurse through the comparator they were handed instead of starting a
/// fresh [`compare`].
#[derive(Debug, Default)]
pub struct Comparator {
    in_progress: Vec<(Identity, Identity)>,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// [`compare`] within this comparison.
    pub fn equals(&mut self, a: &Value, b: &Value) -> bool {
        if a.strict_equals(b) {
            return true;
        }

        if a.is_nullish() || b.is_nullish() {
            return false;
        }

        if let Some((matcher, candidate)) = matcher::split(a, b) {
            let verdict = match candidate.identity() {
                Some(id) => self.guarded(id, matcher.identity(), |c| {
                    matcher.matches_within(candidate, c)
                }),
                None => matcher.matches_within(candidate, self),
            };
            trace!(matcher = ?matcher.identity(), verdict, "matcher delegation");
            return verdict;
        }

        if a.kind() != b.kind() {
            return false;
        }

        match (a, b) {
            (Value::Sequence(x), Value::Sequence(y)) => {
                self.guarded(x.identity(), y.identity(), |c| c.sequences(x, y))
            }
            (Value::Mapping(x), Value::Mapping(y)) => {
                self.guarded(x.identity(), y.identity(), |c| c.mappings(x, y))
            }
            _ => false,
        }
    }

    /// Run `f` with the pair pushed onto the in-progress stack. A pair that is
    /// already on the stack is a back-reference and compares equal.
    fn guarded<F>(&mut self, a: Identity, b: Identity, f: F) -> bool
    where
        F: FnOnce(&mut Self) -> bool,
    {
        if self.in_progress.contains(&(a, b)) {
            return true;
        }
        self.in_progress.push((a, b));
        let verdict = f(self);
        self.in_progress.pop();
        verdict
    }

    fn sequences(&mut self, a: &Sequence, b: &Sequence) -> bool {
        let (a, b) = (a.items(), b.items());
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| self.equals(x, y))
    }

    fn mappings(&mut self, a: &Mapping, b: &Mapping) -> bool {
        let (a, b) = (a.entries(), b.entries());
        if a.len() != b.len() {
            return false;
        }
        a.iter().all(|(key, x)| match b.iter().find(|(k, _)| k == key) {
            Some((_, y)) => self.equals(x, y),
            None => false,
        })
    }
}
