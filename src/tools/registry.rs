// Tool registry module
//
// This module defines the tool registry which manages the catalog of
// operations and the handler table behind it. Registration happens once
// at startup; the registry is immutable afterwards, and a duplicate name
// is a startup error rather than a silent override.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ToolError;
use crate::tools::{CallResponse, ToolContext};

/// Which backend an operation needs before its handler may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Purely local or informational; no backend is touched.
    None,
    /// Stateless HTTP control-plane API.
    ControlPlane,
    /// The managed key-value store connection.
    Store,
}

/// ToolParameter defines one field of a tool's input contract.
///
/// The contract is advisory metadata for discovery; each handler enforces
/// its own required fields when it deserializes its arguments.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Name of the parameter
    pub name: String,
    /// Description of the parameter
    pub description: String,
    /// Whether the parameter is required
    pub required: bool,
    /// Type of the parameter (string, number, boolean, object, array)
    pub parameter_type: String,
}

impl ToolParameter {
    pub fn required(name: &str, parameter_type: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            parameter_type: parameter_type.to_string(),
        }
    }

    pub fn optional(name: &str, parameter_type: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: false,
            parameter_type: parameter_type.to_string(),
        }
    }
}

/// ToolDefinition describes one operation in the catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool
    pub name: String,
    /// Description of the tool
    pub description: String,
    /// Input contract
    pub parameters: Vec<ToolParameter>,
    /// Backend the tool needs
    pub backend: BackendKind,
    /// Tags for categorizing the tool
    pub tags: Vec<String>,
}

/// Tool trait for implementing operation handlers
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given arguments and context
    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError>;
}

/// ToolRegistry holds the ordered operation catalog and the handler table.
///
/// The two are the same collection: every registered value carries both
/// its definition and its handler, so catalog and table cover each other
/// 1:1 by construction. Listing order is registration order and stays
/// stable for the process lifetime.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new, empty tool registry
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. A second tool with the same name is rejected.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.definition().name;
        if self.index.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered(name));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&i| self.tools[i].clone())
    }

    /// List all registered tools, in registration order
    pub fn list(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Distinct tags across the catalog, sorted for stable output.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .tools
            .iter()
            .flat_map(|tool| tool.definition().tags)
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for FixedTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition {
                name: self.name.to_string(),
                description: "test tool".to_string(),
                parameters: vec![],
                backend: BackendKind::None,
                tags: vec!["test".to_string()],
            }
        }

        async fn execute(&self, _args: Value, _ctx: &ToolContext) -> Result<CallResponse, ToolError> {
            Ok(CallResponse::text("ok"))
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FixedTool { name: "alpha" })).unwrap();
        let err = registry
            .register(Arc::new(FixedTool { name: "alpha" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Operation 'alpha' is already registered");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn listing_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["gamma", "alpha", "beta"] {
            registry.register(Arc::new(FixedTool { name })).unwrap();
        }
        let names: Vec<String> = registry.list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["gamma", "alpha", "beta"]);
    }
}
