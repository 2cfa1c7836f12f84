// Tools module for the MCP server
//
// This module implements the operation catalog, the request/response
// envelope of the calling protocol, and dispatch.

pub mod database;
pub mod dispatch;
pub mod registry;
pub mod store;

pub use dispatch::Dispatcher;
pub use registry::{BackendKind, Tool, ToolDefinition, ToolParameter, ToolRegistry};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::backend::{ControlPlaneClient, StoreManager};
use crate::errors::ToolError;

/// ToolContext carries what a handler may need to perform its call:
/// the backends and a request id for log correlation. Handlers never
/// receive the ability to alter backend connection state.
#[derive(Clone)]
pub struct ToolContext {
    /// Request ID for tracking
    pub request_id: String,
    /// Control-plane API client
    pub control: Arc<ControlPlaneClient>,
    /// Store connection manager
    pub store: Arc<StoreManager>,
}

impl ToolContext {
    pub fn new(control: Arc<ControlPlaneClient>, store: Arc<StoreManager>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            control,
            store,
        }
    }
}

/// CallRequest is one incoming call: an operation name plus the raw
/// argument mapping as the caller supplied it.
#[derive(Deserialize, Clone, Debug)]
pub struct CallRequest {
    /// Name of the operation to invoke
    #[serde(rename = "operationName", alias = "name")]
    pub operation: String,
    /// Arguments for the operation
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(serde_json::Map::new())
}

/// One typed content item of a response. This server only ever emits
/// text items.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ContentItem {
    pub kind: String,
    pub text: String,
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

/// CallResponse is the uniform envelope returned for every call,
/// successful or failed. Failures appear as a text item prefixed with
/// `Error: `, never as a protocol-level exception.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CallResponse {
    pub content: Vec<ContentItem>,
}

impl CallResponse {
    /// A single human-readable text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(text)],
        }
    }

    /// A structured result, rendered as formatted JSON text.
    pub fn json(value: &Value) -> Self {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        Self::text(text)
    }

    /// The uniform rendering of a failure.
    pub fn error(err: &ToolError) -> Self {
        Self::text(format!("Error: {}", err))
    }

    /// Text of the first content item. Every envelope this server
    /// produces has at least one item.
    pub fn first_text(&self) -> &str {
        self.content.first().map(|item| item.text.as_str()).unwrap_or("")
    }
}

/// Deserialize a handler's typed argument struct from the raw mapping.
/// serde's error messages name the missing or mistyped field.
pub fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Build the operation catalog. Fails when two tools claim the same name.
pub fn init_registry() -> Result<Arc<ToolRegistry>, ToolError> {
    let mut registry = ToolRegistry::new();

    // Control-plane database management tools
    database::register_tools(&mut registry)?;

    // Key-value store tools
    store::register_tools(&mut registry)?;

    Ok(Arc::new(registry))
}
