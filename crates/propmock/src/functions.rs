//! Splitting callbacks out of props.
//!
//! Serialized props are for looking at; callbacks are for calling. These
//! helpers pull the callable parts out of a props mapping so a test can
//! invoke them by key.

use propmock_core::{CycleTracking, Function, Mapping, Value, VisitedSet};

/// Top-level function props of one mock, by key.
#[derive(Debug, Clone, Default)]
pub struct MockedFunctions {
    entries: Vec<(String, Function)>,
}

impl MockedFunctions {
    /// Collect every top-level function prop of `props`.
    pub fn from_props(props: &Mapping) -> Self {
        let entries = props
            .entries()
            .iter()
            .filter_map(|(key, value)| Some((key.clone(), value.as_function()?.clone())))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Function> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    /// Call the function stored under `key`, or `None` if there is none.
    pub fn call(&self, key: &str, args: &[Value]) -> Option<Value> {
        self.get(key).map(|f| f.call(args))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of [`separate_functions`].
#[derive(Debug, Clone, Default)]
pub struct Separated {
    /// A new mapping where each function prop is replaced by
    /// `[Function: <key>]`; `None` when the input had no props.
    pub props: Option<Mapping>,
    /// The function props; `None` when there were none.
    pub functions: Option<MockedFunctions>,
}

/// Split top-level function props out of `props`.
///
/// Only the first level is inspected; functions nested deeper stay where
/// they are. The label uses the prop key, not the function's own name.
pub fn separate_functions(props: &Mapping) -> Separated {
    if props.is_empty() {
        return Separated::default();
    }
    let labelled = Mapping::new();
    for (key, value) in props.entries().iter() {
        match value {
            Value::Function(_) => labelled.insert(key.clone(), format!("[Function: {key}]")),
            other => labelled.insert(key.clone(), other.clone()),
        };
    }
    let functions = MockedFunctions::from_props(props);
    Separated {
        props: Some(labelled),
        functions: (!functions.is_empty()).then_some(functions),
    }
}

/// True when a function is reachable anywhere inside `value`.
///
/// Cycle-safe: each composite is inspected once.
pub fn contains_function(value: &Value) -> bool {
    let mut visited = VisitedSet::new(CycleTracking::EverVisited);
    search(value, &mut visited)
}

fn search(value: &Value, visited: &mut VisitedSet) -> bool {
    match value {
        Value::Function(_) => true,
        Value::Sequence(seq) => {
            visited.enter(seq.identity()) && seq.items().iter().any(|v| search(v, visited))
        }
        Value::Mapping(map) => {
            visited.enter(map.identity())
                && map.entries().iter().any(|(_, v)| search(v, visited))
        }
        _ => false,
    }
}
