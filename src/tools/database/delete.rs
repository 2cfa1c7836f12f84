// Database deletion tool
//
// Deletes one database by id. This targets a single named resource, so
// it is a plain pass-through rather than a confirm-gated bulk operation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{parse_args, CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

pub struct DatabaseDeleteTool;

#[derive(Deserialize)]
struct Args {
    id: String,
}

impl DatabaseDeleteTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for DatabaseDeleteTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "delete_database".to_string(),
            description: "Delete a database by ID".to_string(),
            parameters: vec![ToolParameter::required("id", "string", "ID of the database to delete")],
            backend: BackendKind::ControlPlane,
            tags: vec!["database".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: Args = parse_args(args)?;
        ctx.control
            .delete(&format!("/v2/kv/database/{}", args.id))
            .await?;
        Ok(CallResponse::text(format!("Database \"{}\" deleted.", args.id)))
    }
}
