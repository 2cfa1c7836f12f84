// Database listing tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{CallResponse, Tool, ToolContext, ToolDefinition};

pub struct DatabaseListTool;

impl DatabaseListTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for DatabaseListTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "list_databases".to_string(),
            description: "List all databases in the account".to_string(),
            parameters: vec![],
            backend: BackendKind::ControlPlane,
            tags: vec!["database".to_string()],
        }
    }

    async fn execute(&self, _args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let result = ctx.control.get("/v2/kv/databases").await?;
        Ok(CallResponse::json(&result))
    }
}
