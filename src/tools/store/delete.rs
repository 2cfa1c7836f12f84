// Delete key tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{parse_args, CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

pub struct DeleteKeyTool;

#[derive(Deserialize)]
struct Args {
    key: String,
}

impl DeleteKeyTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for DeleteKeyTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "delete_key".to_string(),
            description: "Delete a single key".to_string(),
            parameters: vec![ToolParameter::required("key", "string", "Key to delete")],
            backend: BackendKind::Store,
            tags: vec!["store".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: Args = parse_args(args)?;
        let conn = ctx.store.ensure_ready().await?;

        let removed = conn.del(&[args.key.clone()]).await?;
        let text = if removed == 0 {
            format!("Key \"{}\" did not exist.", args.key)
        } else {
            format!("Deleted key \"{}\".", args.key)
        };
        Ok(CallResponse::text(text))
    }
}
