/// Matcher protocol and built-in matcher tests.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use propmock_core::matcher::delegate;
use propmock_core::matchers::{
    any, any_array, any_bool, any_function, any_instance_of, any_number, any_object, any_string,
    anything, array_containing, close_to, object_containing, string_containing,
    string_starting_with,
};
use propmock_core::{compare, AsymmetricMatch, Comparator, Element, Mapping, Matcher, Opaque, Value, ValueKind};

fn matches(m: &Matcher, v: impl Into<Value>) -> bool {
    compare(&v.into(), &Value::Matcher(m.clone()))
}

// ============================================================================
// Protocol
// ============================================================================

struct Even;

impl AsymmetricMatch for Even {
    fn matches(&self, candidate: &Value) -> bool {
        candidate.as_f64().is_some_and(|n| n % 2.0 == 0.0)
    }

    fn describe(&self) -> String {
        "Even".into()
    }
}

#[test]
fn custom_matcher_type_participates() {
    let even = Matcher::new(Even);
    assert!(matches(&even, 4));
    assert!(!matches(&even, 5));
    assert_eq!(even.describe(), "Even");
}

/// Matches mappings whose `next` entry equals `expected`.
struct NextIs {
    expected: Rc<RefCell<Value>>,
}

impl AsymmetricMatch for NextIs {
    fn matches(&self, candidate: &Value) -> bool {
        self.matches_within(candidate, &mut Comparator::new())
    }

    fn matches_within(&self, candidate: &Value, comparator: &mut Comparator) -> bool {
        let Some(next) = candidate.as_mapping().and_then(|m| m.get("next")) else {
            return false;
        };
        let expected = self.expected.borrow().clone();
        comparator.equals(&next, &expected)
    }

    fn describe(&self) -> String {
        "NextIs".into()
    }
}

#[test]
fn custom_matcher_recursing_through_the_comparator_terminates_on_cycles() {
    let node = Mapping::new();
    node.insert("next", node.clone());
    let expected = Rc::new(RefCell::new(Value::Null));
    let next_is = Value::Matcher(Matcher::new(NextIs {
        expected: Rc::clone(&expected),
    }));
    *expected.borrow_mut() = next_is.clone();

    assert!(compare(&node.clone().into(), &next_is));
    assert!(!compare(&Mapping::new().with("next", 1).into(), &next_is));
}

#[test]
fn delegate_returns_none_without_matchers() {
    assert_eq!(delegate(&Value::from(1), &Value::from(2)), None);
}

#[test]
fn delegate_prefers_expected_side() {
    let yes = Value::Matcher(Matcher::from_fn("Yes", |_| true));
    let no = Value::Matcher(Matcher::from_fn("No", |_| false));
    assert_eq!(delegate(&yes, &no), Some(false));
    assert_eq!(delegate(&no, &yes), Some(true));
}

#[test]
fn delegation_is_symmetric_for_a_single_matcher() {
    let m = Value::Matcher(any_number());
    assert_eq!(delegate(&Value::from(1), &m), Some(true));
    assert_eq!(delegate(&m, &Value::from(1)), Some(true));
}

#[test]
fn matcher_receives_the_other_operand() {
    let seen = Rc::new(Cell::new(0.0));
    let spy = {
        let seen = Rc::clone(&seen);
        Matcher::from_fn("Spy", move |v| {
            seen.set(v.as_f64().unwrap_or(-1.0));
            true
        })
    };
    assert!(compare(&Value::from(9), &spy.into()));
    assert_eq!(seen.get(), 9.0);
}

#[test]
#[should_panic(expected = "matcher exploded")]
fn matcher_panics_propagate() {
    let boom = Matcher::from_fn("Boom", |_| panic!("matcher exploded"));
    compare(&Value::from(1), &boom.into());
}

// ============================================================================
// Built-ins
// ============================================================================

#[test]
fn anything_rejects_only_null_ish() {
    let m = anything();
    assert!(matches(&m, 0));
    assert!(matches(&m, ""));
    assert!(matches(&m, false));
    assert!(matches(&m, Value::sequence(Vec::<Value>::new())));
    assert!(!matches(&m, Value::Null));
    assert!(!matches(&m, Value::Undefined));
}

#[test]
fn any_kind_matchers() {
    assert!(matches(&any_string(), "x"));
    assert!(!matches(&any_string(), 1));
    assert!(matches(&any_number(), 1.5));
    assert!(!matches(&any_number(), "1.5"));
    assert!(matches(&any_bool(), true));
    assert!(matches(&any_function(), Value::anonymous(|_| Value::Null)));
    assert!(!matches(&any_function(), "fn"));
    assert!(matches(&any_array(), Value::sequence([1, 2])));
    assert!(!matches(&any_array(), Value::mapping([("a", 1)])));
    assert!(matches(&any_object(), Value::mapping([("a", 1)])));
    assert!(matches(&any(ValueKind::Object), Value::element("div")));
}

#[test]
fn any_describes_kind() {
    assert_eq!(any_number().describe(), "Any<Number>");
    assert_eq!(any_array().describe(), "Any<Array>");
}

struct Clock;

impl Opaque for Clock {
    fn type_name(&self) -> &str {
        "Clock"
    }
}

#[test]
fn any_instance_of_checks_type_name() {
    let m = any_instance_of("Clock");
    assert!(matches(&m, Value::object(Clock)));
    assert!(!matches(&m, Value::object(Element::new("div"))));
    assert!(!matches(&m, "Clock"));
}

#[test]
fn string_matchers() {
    assert!(matches(&string_containing("ell"), "hello"));
    assert!(!matches(&string_containing("xyz"), "hello"));
    assert!(!matches(&string_containing("1"), 1));
    assert!(matches(&string_starting_with("he"), "hello"));
    assert!(!matches(&string_starting_with("lo"), "hello"));
}

#[test]
fn close_to_uses_digit_tolerance() {
    let m = close_to(0.3, 2);
    assert!(matches(&m, 0.1 + 0.2));
    assert!(matches(&m, 0.304));
    assert!(!matches(&m, 0.31));
    assert!(!matches(&m, "0.3"));
}

#[test]
fn close_to_handles_infinities_and_nan() {
    assert!(matches(&close_to(f64::INFINITY, 2), f64::INFINITY));
    assert!(!matches(&close_to(f64::INFINITY, 2), f64::NEG_INFINITY));
    assert!(!matches(&close_to(1.0, 2), f64::NAN));
}

#[test]
fn object_containing_ignores_extra_keys() {
    let m = object_containing(Mapping::new().with("id", any_number()));
    let actual = Mapping::new().with("id", 3).with("name", "x");
    assert!(matches(&m, actual));
    assert!(!matches(&m, Mapping::new().with("name", "x")));
    assert!(!matches(&m, Mapping::new().with("id", "3")));
    assert!(!matches(&m, Value::sequence([3])));
}

#[test]
fn array_containing_is_order_free() {
    let m = array_containing(vec![Value::from(3), Value::from(1)]);
    assert!(matches(&m, Value::sequence([1, 2, 3])));
    assert!(!matches(&m, Value::sequence([1, 2])));
    assert!(!matches(&m, Value::mapping([("0", 1)])));
}

#[test]
fn containing_matchers_describe_their_contents() {
    let m = object_containing(Mapping::new().with("id", 1));
    assert!(m.describe().starts_with("ObjectContaining"));
    assert!(m.describe().contains("id"));
    let a = array_containing(vec![Value::from("x")]);
    assert!(a.describe().starts_with("ArrayContaining"));
}
