// Key expiration tools

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ToolError;
use crate::tools::registry::{BackendKind, ToolRegistry};
use crate::tools::{parse_args, CallResponse, Tool, ToolContext, ToolDefinition, ToolParameter};

pub struct GetTtlTool;

#[derive(Deserialize)]
struct TtlArgs {
    key: String,
}

impl GetTtlTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for GetTtlTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_ttl".to_string(),
            description: "Get the remaining time to live of a key".to_string(),
            parameters: vec![ToolParameter::required("key", "string", "Key to inspect")],
            backend: BackendKind::Store,
            tags: vec!["store".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: TtlArgs = parse_args(args)?;
        let conn = ctx.store.ensure_ready().await?;

        // TTL reports -2 for a missing key and -1 for a key with no expiry.
        let text = match conn.ttl(&args.key).await? {
            -2 => format!("Key \"{}\" not found", args.key),
            -1 => format!("Key \"{}\" has no expiration.", args.key),
            ttl => format!("Key \"{}\" expires in {} seconds.", args.key, ttl),
        };
        Ok(CallResponse::text(text))
    }
}

pub struct ExpireKeyTool;

#[derive(Deserialize)]
struct ExpireArgs {
    key: String,
    seconds: i64,
}

impl ExpireKeyTool {
    pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
        registry.register(Arc::new(Self))
    }
}

#[async_trait]
impl Tool for ExpireKeyTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "expire_key".to_string(),
            description: "Set an expiration on a key".to_string(),
            parameters: vec![
                ToolParameter::required("key", "string", "Key to expire"),
                ToolParameter::required("seconds", "number", "Seconds until expiration"),
            ],
            backend: BackendKind::Store,
            tags: vec!["store".to_string()],
        }
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> Result<CallResponse, ToolError> {
        let args: ExpireArgs = parse_args(args)?;
        let conn = ctx.store.ensure_ready().await?;

        let text = if conn.expire(&args.key, args.seconds).await? {
            format!("Key \"{}\" will expire in {} seconds.", args.key, args.seconds)
        } else {
            format!("Key \"{}\" not found", args.key)
        };
        Ok(CallResponse::text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{manager_with, MemoryStore, PanicTransport};
    use crate::backend::ControlPlaneClient;
    use crate::tools::{CallRequest, Dispatcher};
    use pretty_assertions::assert_eq;
    use serde_json::json;

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

    fn call(operation: &str, arguments: serde_json::Value) -> CallRequest {
        CallRequest {
            operation: operation.to_string(),
            arguments,
        }
    }

    #[tokio::test]
    async fn ttl_of_a_missing_key_reports_not_found() {
        let store = Arc::new(MemoryStore::new());

        let response = dispatcher(store)
            .dispatch(call("get_ttl", json!({"key": "gone"})))
            .await;

        assert_eq!(response.first_text(), "Key \"gone\" not found");
    }

    #[tokio::test]
    async fn ttl_of_a_persistent_key_reports_no_expiration() {
        let store = Arc::new(MemoryStore::new());
        store.insert("k".to_string(), "v".to_string());

        let response = dispatcher(store)
            .dispatch(call("get_ttl", json!({"key": "k"})))
            .await;

        assert_eq!(response.first_text(), "Key \"k\" has no expiration.");
    }

    #[tokio::test]
    async fn expiring_a_key_is_visible_to_get_ttl() {
        let store = Arc::new(MemoryStore::new());
        store.insert("k".to_string(), "v".to_string());
        let dispatcher = dispatcher(store);

        let response = dispatcher
            .dispatch(call("expire_key", json!({"key": "k", "seconds": 120})))
            .await;
        assert_eq!(response.first_text(), "Key \"k\" will expire in 120 seconds.");

        let response = dispatcher
            .dispatch(call("get_ttl", json!({"key": "k"})))
            .await;
        assert_eq!(response.first_text(), "Key \"k\" expires in 120 seconds.");
    }

    #[tokio::test]
    async fn expiring_a_missing_key_reports_not_found() {
        let store = Arc::new(MemoryStore::new());

        let response = dispatcher(store)
            .dispatch(call("expire_key", json!({"key": "gone", "seconds": 30})))
            .await;

        assert_eq!(response.first_text(), "Key \"gone\" not found");
    }
}
