// Set value tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{parse_args, CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

pub struct SetValueTool;

#[derive(Deserialize)]
struct Args {
    key: String,
    value: String,
    #[serde(default)]
    ttl_seconds: Option<u64>,
}

impl SetValueTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for SetValueTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "set_value".to_string(),
            description: "Store a value at a key, optionally with an expiration".to_string(),
            parameters: vec![
                ToolParameter::required("key", "string", "Key to write"),
                ToolParameter::required("value", "string", "Value to store"),
                ToolParameter::optional("ttl_seconds", "number", "Expiration in seconds"),
            ],
            backend: BackendKind::Store,
            tags: vec!["store".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: Args = parse_args(args)?;
        let conn = ctx.store.ensure_ready().await?;

        conn.set(&args.key, &args.value, args.ttl_seconds).await?;

        let text = match args.ttl_seconds {
            Some(ttl) => format!("OK. Key \"{}\" set (expires in {} seconds).", args.key, ttl),
            None => format!("OK. Key \"{}\" set.", args.key),
        };
        Ok(CallResponse::text(text))
    }
}
