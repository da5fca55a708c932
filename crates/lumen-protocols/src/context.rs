//! Shared runtime context threaded through one run.
//!
//! The context has two halves: a typed [`LaunchPlan`] that becomes the JSON
//! payload handed to the launched program, and a free-form value map that
//! hooks and component handlers use as a shared namespace. Access is
//! single-threaded; hooks receive the context by mutable reference in
//! registration order.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Typed payload describing what the launched program should bootstrap.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LaunchPlan {
    /// Configuration endpoint mapping from the project manifest.
    pub config_endpoints: BTreeMap<String, String>,
    /// Configuration format table from the project manifest.
    pub config_format: BTreeMap<String, Value>,
    /// Module endpoints to import, in declaration order.
    pub modules: Vec<String>,
    /// Service endpoints to install into the child's service manager.
    pub services: Vec<String>,
    /// Arguments passed through to the launched program.
    pub args: Vec<String>,
}

/// Shared, mutable state for one orchestrator run.
///
/// Keys in `values` form a shared namespace across all extensions; by
/// convention each component writes under its own component name.
#[derive(Debug, Default)]
pub struct RuntimeContext {
    pub launch: LaunchPlan,
    pub values: BTreeMap<String, Value>,
}

impl RuntimeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value from the shared namespace.
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set a value in the shared namespace.
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            self.values.insert(key.into(), v);
        }
    }

    /// Serialize the context into the payload consumed by the runner shim.
    ///
    /// The launch plan lives under the `"lumen"` key; shared values are
    /// merged at the top level so each component's entry sits beside it.
    pub fn payload(&self) -> Result<String, serde_json::Error> {
        let mut root = serde_json::Map::new();
        root.insert("lumen".to_string(), serde_json::to_value(&self.launch)?);
        for (key, value) in &self.values {
            root.insert(key.clone(), value.clone());
        }
        serde_json::to_string(&Value::Object(root))
    }
}
