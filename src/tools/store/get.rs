// Get value tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{parse_args, CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

pub struct GetValueTool;

#[derive(Deserialize)]
struct Args {
    key: String,
}

impl GetValueTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for GetValueTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_value".to_string(),
            description: "Read the value stored at a key".to_string(),
            parameters: vec![ToolParameter::required("key", "string", "Key to read")],
            backend: BackendKind::Store,
            tags: vec!["store".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: Args = parse_args(args)?;
        let conn = ctx.store.ensure_ready().await?;

        match conn.get(&args.key).await? {
            Some(value) => Ok(CallResponse::text(value)),
            None => Ok(CallResponse::text(format!("Key \"{}\" not found", args.key))),
        }
    }
}
