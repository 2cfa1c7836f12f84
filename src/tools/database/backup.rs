// Database export tool (placeholder)
//
// Listed in the catalog like every other tool, but the platform API for
// exports has not shipped yet. The handler raises a not-implemented
// failure that the dispatcher renders as its usual error envelope, and
// contacts nothing.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

pub struct DatabaseExportTool;

impl DatabaseExportTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for DatabaseExportTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "export_database".to_string(),
            description: "Export a database snapshot".to_string(),
            parameters: vec![ToolParameter::required("id", "string", "ID of the database to export")],
            backend: BackendKind::None,
            tags: vec!["database".to_string()],
        }
    }

    async fn execute(&self, _args: Value, _ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        Err(ToolError::NotImplemented(
            "database export has not shipped yet; use the platform console to export a snapshot"
                .to_string(),
        ))
    }
}
