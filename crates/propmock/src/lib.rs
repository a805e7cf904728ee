//! # propmock
//!
//! Test-side bookkeeping for mocked components: record the props each mock
//! received, keyed by test id, then assert on them.
//!
//! The registry keeps two views of every render. The **original** props keep
//! functions callable, so a test can fire a mock's `onClick`. The
//! **snapshot** is the cycle-safe serialized copy from
//! [`propmock_core::serialize`], used for display and failure messages.
//!
//! ```rust
//! use propmock::MockRegistry;
//! use propmock_core::{matchers, Mapping, Value};
//!
//! let mut registry = MockRegistry::new();
//! registry.record(
//!     "save-button",
//!     Mapping::new()
//!         .with("label", "Save")
//!         .with("onClick", Value::function("handleSave", |_| Value::from(true))),
//! );
//!
//! let expect = registry.expect("save-button");
//! expect.to_have_prop_value("label", &"Save".into()).unwrap();
//! expect
//!     .to_have_props(Some(
//!         &Mapping::new()
//!             .with("label", matchers::any_string())
//!             .with("onClick", matchers::any_function()),
//!     ))
//!     .unwrap();
//!
//! let clicked = registry.call("save-button", "onClick", &[]).unwrap();
//! assert_eq!(clicked.as_bool(), Some(true));
//! ```
//!
//! ## Modules
//!
//! - [`registry`] — `MockRegistry`, recorded renders per test id
//! - [`functions`] — splitting callbacks out of props
//! - [`assert`] — `to_have_props` / `to_have_prop` assertions
//! - [`error`] — lookup and assertion errors

pub mod assert;
pub mod error;
pub mod functions;
pub mod registry;

pub use assert::{AssertionError, Diff, MockExpectation};
pub use error::HarnessError;
pub use functions::{contains_function, separate_functions, MockedFunctions, Separated};
pub use registry::{MockRecord, MockRegistry};
