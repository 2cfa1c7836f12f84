// Guarded bulk operations
//
// These delete or clear keys across a pattern or the whole database and
// therefore require an explicit confirm=true. Without it they perform
// nothing and answer with guidance; that is a successful no-op, not an
// error.

use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use serde::Deserialize;
use serde_json::Value;

use crate::backend::scan::scan_keys;
use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{parse_args, CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

/// Per-page size hint for the pattern lookup.
const SCAN_PAGE_HINT: usize = 100;

/// Client-side ceiling on how many keys one confirmed bulk delete will
/// touch, so an overly broad pattern stays bounded.
const DEFAULT_BULK_LIMIT: usize = 10_000;

/// Keys per DEL command when removing a large match set.
const DELETE_CHUNK: usize = 500;

pub struct DeleteByPatternTool;

#[derive(Deserialize)]
struct DeleteArgs {
    pattern: String,
    #[serde(default)]
    confirm: bool,
    #[serde(default)]
    limit: Option<usize>,
}

impl DeleteByPatternTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for DeleteByPatternTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "delete_by_pattern".to_string(),
            description: "Delete every key matching a glob pattern. Requires confirm=true.".to_string(),
            parameters: vec![
                ToolParameter::required("pattern", "string", "Glob pattern selecting the keys to delete"),
                ToolParameter::optional("confirm", "boolean", "Must be true for the deletion to happen"),
                ToolParameter::optional("limit", "number", "Maximum number of keys to delete (default 10000)"),
            ],
            backend: BackendKind::Store,
            tags: vec!["store".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: DeleteArgs = parse_args(args)?;
        if !args.confirm {
            return Ok(CallResponse::text("Deletion cancelled. Set confirm=true to proceed."));
        }

        let conn = ctx.store.ensure_ready().await?;
        let limit = args.limit.unwrap_or(DEFAULT_BULK_LIMIT);
        let keys = scan_keys(conn.as_ref(), &args.pattern, SCAN_PAGE_HINT, limit).await?;

        if keys.is_empty() {
            return Ok(CallResponse::text(format!(
                "No keys match pattern \"{}\". Nothing was deleted.",
                args.pattern
            )));
        }

        let truncated = keys.len() == limit;
        let mut removed = 0;
        for chunk in keys.chunks(DELETE_CHUNK) {
            removed += conn.del(chunk).await?;
        }
        info!("[{}] deleted {} keys matching '{}'", ctx.request_id, removed, args.pattern);

        let mut text = format!("Deleted {} keys matching \"{}\".", removed, args.pattern);
        if truncated {
            text.push_str(&format!(
                " Stopped at the limit of {} keys; more may match, run again to continue.",
                limit
            ));
        }
        Ok(CallResponse::text(text))
    }
}

pub struct FlushAllTool;

#[derive(Deserialize)]
struct FlushArgs {
    #[serde(default)]
    confirm: bool,
}

impl FlushAllTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for FlushAllTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "flush_all".to_string(),
            description: "Remove every key in the database. Requires confirm=true.".to_string(),
            parameters: vec![ToolParameter::optional(
                "confirm",
                "boolean",
                "Must be true for the flush to happen",
            )],
            backend: BackendKind::Store,
            tags: vec!["store".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: FlushArgs = parse_args(args)?;
        if !args.confirm {
            return Ok(CallResponse::text("Flush cancelled. Set confirm=true to proceed."));
        }

        let conn = ctx.store.ensure_ready().await?;
        conn.flush_all().await?;
        info!("[{}] flushed the database", ctx.request_id);

        Ok(CallResponse::text("The database has been flushed. All keys were removed."))
    }
}
