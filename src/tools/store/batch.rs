// Batch write tool
//
// Writes several entries in one call and reports the outcome of each
// item. One failing entry never aborts the rest of the batch.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{parse_args, CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

pub struct SetValuesTool;

#[derive(Deserialize)]
struct Entry {
    key: String,
    value: String,
    #[serde(default)]
    ttl_seconds: Option<u64>,
}

#[derive(Deserialize)]
struct Args {
    entries: Vec<Entry>,
}

impl SetValuesTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for SetValuesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "set_values".to_string(),
            description: "Store several key/value entries, reporting each outcome".to_string(),
            parameters: vec![ToolParameter::required(
                "entries",
                "array",
                "Entries to store, each {key, value, ttl_seconds?}",
            )],
            backend: BackendKind::Store,
            tags: vec!["store".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: Args = parse_args(args)?;
        if args.entries.is_empty() {
            return Err(ToolError::InvalidArguments("'entries' must not be empty".to_string()));
        }

        let conn = ctx.store.ensure_ready().await?;

        let total = args.entries.len();
        let mut succeeded = 0;
        let mut lines = Vec::with_capacity(total + 1);
        for entry in &args.entries {
            match conn.set(&entry.key, &entry.value, entry.ttl_seconds).await {
                Ok(()) => {
                    succeeded += 1;
                    lines.push(format!("OK {}", entry.key));
                }
                Err(err) => lines.push(format!("FAILED {}: {}", entry.key, err)),
            }
        }

        lines.insert(0, format!("Set {} of {} entries.", succeeded, total));
        Ok(CallResponse::text(lines.join("\n")))
    }
}
