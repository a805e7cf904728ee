//! Recorded renders of mocked components, keyed by test id.
//!
//! The registry is an ordinary value owned by the test (or its harness) and
//! passed to whatever needs it. Nothing is registered globally.

use std::collections::HashMap;

use propmock_core::{serialize_with, to_json_string, Mapping, SafeMap, SerializeOptions, Value};
use tracing::debug;

use crate::assert::MockExpectation;
use crate::error::{HarnessError, Result};
use crate::functions::MockedFunctions;

const CHILDREN: &str = "children";

/// What one mock received on its latest render.
#[derive(Debug, Clone)]
pub struct MockRecord {
    test_id: String,
    props: Option<Mapping>,
    snapshot: Option<SafeMap>,
    children: Option<Value>,
    renders: usize,
}

impl MockRecord {
    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    /// The props as passed, functions still callable. `None` when the mock
    /// rendered without props.
    pub fn props(&self) -> Option<&Mapping> {
        self.props.as_ref()
    }

    /// The serialized copy taken at record time.
    pub fn snapshot(&self) -> Option<&SafeMap> {
        self.snapshot.as_ref()
    }

    /// The `children` prop, kept apart from the other props.
    pub fn children(&self) -> Option<&Value> {
        self.children.as_ref()
    }

    /// How many times props were recorded under this test id.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

/// Props received by mocked components, keyed by test id.
#[derive(Debug, Default)]
pub struct MockRegistry {
    options: SerializeOptions,
    records: HashMap<String, MockRecord>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose snapshots use the given serializer settings.
    pub fn with_options(options: SerializeOptions) -> Self {
        Self {
            options,
            records: HashMap::new(),
        }
    }

    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Record a render. The `children` prop is set aside and never appears
    /// in the recorded props; what remains is stored in a new top-level
    /// mapping, nested values still shared with the caller. No remaining
    /// props records "rendered without props". Recording the same test id
    /// again replaces its props.
    pub fn record(&mut self, test_id: impl Into<String>, props: Mapping) -> &MockRecord {
        let test_id = test_id.into();
        let mut children = None;
        let props: Mapping = props
            .entries()
            .iter()
            .filter_map(|(key, value)| {
                if key == CHILDREN {
                    children = Some(value.clone());
                    None
                } else {
                    Some((key.clone(), value.clone()))
                }
            })
            .collect();

        let (props, snapshot) = if props.is_empty() {
            (None, None)
        } else {
            let snapshot = serialize_with(&props, &self.options);
            (Some(props), Some(snapshot))
        };

        let record = self
            .records
            .entry(test_id.clone())
            .or_insert_with(|| MockRecord {
                test_id: test_id.clone(),
                props: None,
                snapshot: None,
                children: None,
                renders: 0,
            });
        record.props = props;
        record.snapshot = snapshot;
        record.children = children;
        record.renders += 1;

        debug!(
            test_id = %record.test_id,
            renders = record.renders,
            children = record.children.is_some(),
            props = record.snapshot.as_ref().map_or(0, SafeMap::len),
            "recorded mock props"
        );
        record
    }

    pub fn contains(&self, test_id: &str) -> bool {
        self.records.contains_key(test_id)
    }

    pub fn get(&self, test_id: &str) -> Result<&MockRecord> {
        self.records.get(test_id).ok_or_else(|| {
            debug!(test_id, "no mock recorded");
            HarnessError::NotFound(test_id.to_string())
        })
    }

    /// The serialized props snapshot.
    pub fn props(&self, test_id: &str) -> Result<&SafeMap> {
        self.get(test_id)?
            .snapshot()
            .ok_or_else(|| HarnessError::NoProps(test_id.to_string()))
    }

    /// The props as passed, functions still callable.
    pub fn original_props(&self, test_id: &str) -> Result<&Mapping> {
        self.get(test_id)?
            .props()
            .ok_or_else(|| HarnessError::NoProps(test_id.to_string()))
    }

    pub fn render_count(&self, test_id: &str) -> Result<usize> {
        Ok(self.get(test_id)?.renders())
    }

    /// Compact JSON of the snapshot, `None` when the mock has no props.
    pub fn debug_string(&self, test_id: &str) -> Result<Option<String>> {
        match self.get(test_id)?.snapshot() {
            Some(snapshot) => Ok(Some(to_json_string(snapshot)?)),
            None => Ok(None),
        }
    }

    /// The mock's top-level function props. Empty when it has none.
    pub fn functions(&self, test_id: &str) -> Result<MockedFunctions> {
        Ok(self
            .get(test_id)?
            .props()
            .map(MockedFunctions::from_props)
            .unwrap_or_default())
    }

    /// Call a mock's function prop by key.
    pub fn call(&self, test_id: &str, key: &str, args: &[Value]) -> Result<Value> {
        self.functions(test_id)?
            .call(key, args)
            .ok_or_else(|| HarnessError::FunctionNotFound {
                test_id: test_id.to_string(),
                key: key.to_string(),
            })
    }

    /// Start an assertion on the props recorded under `test_id`.
    pub fn expect(&self, test_id: impl Into<String>) -> MockExpectation<'_> {
        MockExpectation::new(self, test_id.into())
    }

    pub fn test_ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget every recorded render.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
