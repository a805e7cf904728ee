//! Assertions on recorded props.
//!
//! Verdicts come from [`propmock_core::compare`] run against the original
//! props, so functions compare by identity and matchers such as
//! `any_function()` work. Failure messages serialize those same props at the
//! time of the assertion, so a diff always shows what was compared and is
//! safe to print even when the props contain cycles.

use std::fmt;

use propmock_core::{compare, serialize_value, serialize_value_with, Mapping, SafeValue, Value};
use thiserror::Error;
use tracing::debug;

use crate::error::HarnessError;
use crate::registry::MockRegistry;

/// Expected-versus-received values for a failed comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Diff {
    pub message: String,
    pub actual: SafeValue,
    pub expected: SafeValue,
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\nExpected:\n{}\n\nReceived:\n{}",
            self.message,
            pretty(&self.expected),
            pretty(&self.actual)
        )
    }
}

fn pretty(value: &SafeValue) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
}

/// Why a props assertion failed.
#[derive(Error, Debug)]
pub enum AssertionError {
    /// Props were found but did not compare equal.
    #[error("{0}")]
    Mismatch(Diff),

    #[error("Expected element to have prop \"{key}\", but it doesn't. Available props: {available}")]
    MissingProp { key: String, available: String },

    #[error("Expected element not to have prop \"{key}\", but it does")]
    UnexpectedProp { key: String },

    /// `to_have_prop_entry` needs exactly one key/value pair.
    #[error("Expected exactly one key-value pair, got {0}")]
    EntryCount(usize),

    /// The mock could not be found or rendered without props.
    #[error("Expected element to have mock props, but {0}")]
    Harness(#[from] HarnessError),
}

pub type Result<T> = std::result::Result<T, AssertionError>;

/// Assertions on one mock's recorded props. Obtained from
/// [`MockRegistry::expect`].
#[derive(Debug)]
pub struct MockExpectation<'a> {
    registry: &'a MockRegistry,
    test_id: String,
}

impl<'a> MockExpectation<'a> {
    pub(crate) fn new(registry: &'a MockRegistry, test_id: String) -> Self {
        Self { registry, test_id }
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    /// With `Some(expected)`, the props must compare equal to `expected`.
    /// With `None`, the mock only has to have received some props.
    pub fn to_have_props(&self, expected: Option<&Mapping>) -> Result<()> {
        let actual = self.registry.original_props(&self.test_id)?;
        let Some(expected) = expected else {
            return Ok(());
        };
        if compare(&actual.clone().into(), &expected.clone().into()) {
            return Ok(());
        }
        Err(self.mismatch(
            "Expected props to match".to_string(),
            self.received(&actual.clone().into()),
            serialize_value(&expected.clone().into()),
        ))
    }

    /// The mock must have received a prop named `key`.
    pub fn to_have_prop(&self, key: &str) -> Result<()> {
        let actual = self.registry.original_props(&self.test_id)?;
        if actual.contains_key(key) {
            Ok(())
        } else {
            Err(self.missing(key, actual))
        }
    }

    /// The mock must not have received a prop named `key`. A mock rendered
    /// without props passes.
    pub fn not_to_have_prop(&self, key: &str) -> Result<()> {
        let record = self.registry.get(&self.test_id)?;
        match record.props() {
            Some(props) if props.contains_key(key) => Err(AssertionError::UnexpectedProp {
                key: key.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// The prop `key` must exist and compare equal to `expected`.
    pub fn to_have_prop_value(&self, key: &str, expected: &Value) -> Result<()> {
        let actual = self.registry.original_props(&self.test_id)?;
        let Some(value) = actual.get(key) else {
            return Err(self.missing(key, actual));
        };
        if compare(&value, expected) {
            return Ok(());
        }
        Err(self.mismatch(
            format!("Expected element to have prop \"{key}\" with correct value"),
            self.received(&value),
            serialize_value(expected),
        ))
    }

    /// Single-pair form: `{ key: value }`.
    pub fn to_have_prop_entry(&self, entry: &Mapping) -> Result<()> {
        let entries = entry.entries();
        match &entries[..] {
            [(key, value)] => self.to_have_prop_value(key, value),
            other => Err(AssertionError::EntryCount(other.len())),
        }
    }

    fn received(&self, actual: &Value) -> SafeValue {
        serialize_value_with(actual, self.registry.options())
    }

    fn missing(&self, key: &str, actual: &Mapping) -> AssertionError {
        let keys = actual.keys();
        let available = if keys.is_empty() {
            "none".to_string()
        } else {
            keys.join(", ")
        };
        debug!(test_id = %self.test_id, key, "prop missing");
        AssertionError::MissingProp {
            key: key.to_string(),
            available,
        }
    }

    fn mismatch(&self, message: String, actual: SafeValue, expected: SafeValue) -> AssertionError {
        debug!(test_id = %self.test_id, %message, "props mismatch");
        AssertionError::Mismatch(Diff {
            message,
            actual,
            expected,
        })
    }
}
