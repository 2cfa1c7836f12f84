// Database details tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{parse_args, CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

pub struct DatabaseDetailsTool;

#[derive(Deserialize)]
struct Args {
    id: String,
}

impl DatabaseDetailsTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for DatabaseDetailsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_database".to_string(),
            description: "Get the details of one database".to_string(),
            parameters: vec![ToolParameter::required("id", "string", "ID of the database")],
            backend: BackendKind::ControlPlane,
            tags: vec!["database".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: Args = parse_args(args)?;
        let result = ctx
            .control
            .get(&format!("/v2/kv/database/{}", args.id))
            .await?;
        Ok(CallResponse::json(&result))
    }
}
