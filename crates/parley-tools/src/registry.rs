//! Tool registry with registration-order schema export

use dashmap::DashMap;
use serde_json::Value;
use std::sync::{Arc, RwLock};

use crate::{error::ToolError, tool::Tool, Result, ToolOutput};

/// Registry mapping tool names to implementations
///
/// Thread-safe and cheap to clone across async tasks. Registration order is
/// preserved so schema export is deterministic.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Arc<DashMap<String, Arc<dyn Tool>>>,
    order: Arc<RwLock<Vec<String>>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: Arc::new(DashMap::new()),
            order: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a tool, replacing any existing tool of the same name.
    ///
    /// A replaced tool keeps its original position in the export order.
    pub fn register<T: Tool + 'static>(&self, tool: T) {
        let name = tool.name().to_string();
        let replaced = self.tools.insert(name.clone(), Arc::new(tool)).is_some();

        if !replaced {
            self.order
                .write()
                .expect("registry order lock poisoned")
                .push(name.clone());
        }

        tracing::debug!(tool = %name, replaced, "Registered tool");
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Execute a tool by name
    ///
    /// Lookup misses are the caller's concern; actual tool faults come back
    /// inside the [`ToolOutput`].
    pub async fn execute(&self, name: &str, args: Value) -> Result<ToolOutput> {
        let tool = self.get(name).ok_or_else(|| ToolError::not_found(name))?;

        tracing::info!(tool = %name, "Executing tool");
        Ok(tool.execute(args).await)
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<String> {
        self.order
            .read()
            .expect("registry order lock poisoned")
            .clone()
    }

    /// Function schemas in registration order, optionally restricted to an
    /// allow-list of names
    pub fn schemas(&self, names: Option<&[String]>) -> Vec<Value> {
        self.names()
            .into_iter()
            .filter(|name| names.map_or(true, |allowed| allowed.contains(name)))
            .filter_map(|name| self.get(&name))
            .map(|tool| tool.schema().to_function(tool.name(), tool.description()))
            .collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
