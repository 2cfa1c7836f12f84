// Key listing and counting tools

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::scan::scan_keys;
use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{parse_args, CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

/// Per-page size hint forwarded to the backend's SCAN.
const SCAN_PAGE_HINT: usize = 100;

const DEFAULT_LIMIT: usize = 100;

pub struct ListKeysTool;

#[derive(Deserialize)]
struct ListArgs {
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

impl ListKeysTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for ListKeysTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "list_keys".to_string(),
            description: "List keys matching a pattern, up to a limit".to_string(),
            parameters: vec![
                ToolParameter::optional("pattern", "string", "Glob pattern to match (default *)"),
                ToolParameter::optional("limit", "number", "Maximum number of keys to return (default 100)"),
            ],
            backend: BackendKind::Store,
            tags: vec!["store".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: ListArgs = parse_args(args)?;
        let pattern = args.pattern.unwrap_or_else(|| "*".to_string());
        let limit = args.limit.unwrap_or(DEFAULT_LIMIT);

        let conn = ctx.store.ensure_ready().await?;
        let keys = scan_keys(conn.as_ref(), &pattern, SCAN_PAGE_HINT, limit).await?;

        if keys.is_empty() {
            return Ok(CallResponse::text(format!("No keys match pattern \"{}\"", pattern)));
        }
        Ok(CallResponse::json(&json!({
            "pattern": pattern,
            "count": keys.len(),
            "truncated": keys.len() == limit,
            "keys": keys,
        })))
    }
}

pub struct CountKeysTool;

impl CountKeysTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for CountKeysTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "count_keys".to_string(),
            description: "Count the keys in the database".to_string(),
            parameters: vec![],
            backend: BackendKind::Store,
            tags: vec!["store".to_string()],
        }
    }

    async fn execute(&self, _args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let conn = ctx.store.ensure_ready().await?;
        let count = conn.dbsize().await?;
        Ok(CallResponse::text(format!("The database holds {} keys.", count)))
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::testing::{manager_with, MemoryStore};
    use crate::backend::ControlPlaneClient;
    use crate::backend::testing::PanicTransport;
    use crate::tools::{CallRequest, Dispatcher};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn dispatcher(store: Arc<MemoryStore>) -> Dispatcher {
        Dispatcher::new(
            crate::tools::init_registry().unwrap(),
            Arc::new(ControlPlaneClient::with_transport(
                "https://api.example.test".to_string(),
                None,
                Arc::new(PanicTransport),
            )),
            Arc::new(manager_with(store)),
        )
    }

    #[tokio::test]
    async fn list_keys_honours_the_limit() {
        let store = Arc::new(MemoryStore::new());
        for i in 0..20 {
            store.insert(format!("k:{:02}", i), "v".to_string());
        }
        let response = dispatcher(store)
            .dispatch(CallRequest {
                operation: "list_keys".to_string(),
                arguments: json!({"pattern": "k:*", "limit": 5}),
            })
            .await;

        let body: serde_json::Value = serde_json::from_str(response.first_text()).unwrap();
        assert_eq!(body["count"], json!(5));
        assert_eq!(body["truncated"], json!(true));
        assert_eq!(body["keys"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn list_keys_reports_empty_matches() {
        let store = Arc::new(MemoryStore::new());
        store.insert("other".to_string(), "v".to_string());
        let response = dispatcher(store)
            .dispatch(CallRequest {
                operation: "list_keys".to_string(),
                arguments: json!({"pattern": "missing:*"}),
            })
            .await;
        assert_eq!(response.first_text(), "No keys match pattern \"missing:*\"");
    }

    #[tokio::test]
    async fn count_keys_reports_the_database_size() {
        let store = Arc::new(MemoryStore::new());
        store.insert("a".to_string(), "1".to_string());
        store.insert("b".to_string(), "2".to_string());
        store.insert("c".to_string(), "3".to_string());

        let response = dispatcher(store)
            .dispatch(CallRequest {
                operation: "count_keys".to_string(),
                arguments: json!({}),
            })
            .await;

        assert_eq!(response.first_text(), "The database holds 3 keys.");
    }
}
