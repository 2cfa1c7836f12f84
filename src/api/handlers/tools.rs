// Tool handlers for the MCP server API
//
// This module contains handlers for the calling protocol: discovery of
// the operation catalog and invocation of one operation. Invocation
// always answers HTTP 200 with the uniform envelope; failures live
// inside the envelope, not in the status code.

use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::Value;

use crate::api::handlers::ApiResponse;
use crate::tools::{CallRequest, Dispatcher, ToolDefinition};

/// Data structure for the discovery response
#[derive(serde::Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDefinition>,
    pub categories: Vec<String>,
}

/// Handler for listing available tools
pub async fn list_tools(dispatcher: web::Data<Arc<Dispatcher>>) -> impl Responder {
    let registry = dispatcher.registry();
    HttpResponse::Ok().json(ApiResponse::success(ToolListResponse {
        tools: registry.list(),
        categories: registry.categories(),
    }))
}

/// Body for invoking a tool by path
#[derive(Deserialize)]
pub struct CallBody {
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Handler for invoking one tool by name
pub async fn call_tool(
    dispatcher: web::Data<Arc<Dispatcher>>,
    path: web::Path<String>,
    body: web::Json<CallBody>,
) -> impl Responder {
    let request = CallRequest {
        operation: path.into_inner(),
        arguments: body
            .into_inner()
            .arguments
            .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
    };
    HttpResponse::Ok().json(dispatcher.dispatch(request).await)
}

/// Handler for a full `{operationName, arguments}` call body
pub async fn dispatch_call(
    dispatcher: web::Data<Arc<Dispatcher>>,
    request: web::Json<CallRequest>,
) -> impl Responder {
    HttpResponse::Ok().json(dispatcher.dispatch(request.into_inner()).await)
}
