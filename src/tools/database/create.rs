// Database creation tool

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{parse_args, CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

pub struct DatabaseCreateTool;

#[derive(Deserialize)]
struct Args {
    name: String,
    #[serde(default)]
    region: Option<String>,
}

impl DatabaseCreateTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for DatabaseCreateTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "create_database".to_string(),
            description: "Create a new managed database".to_string(),
            parameters: vec![
                ToolParameter::required("name", "string", "Name for the new database"),
                ToolParameter::optional("region", "string", "Region to create the database in"),
            ],
            backend: BackendKind::ControlPlane,
            tags: vec!["database".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: Args = parse_args(args)?;

        let mut body = json!({ "database_name": args.name });
        if let Some(region) = args.region {
            body["region"] = json!(region);
        }

        let result = ctx.control.post("/v2/kv/database", body).await?;
        Ok(CallResponse::json(&result))
    }
}
