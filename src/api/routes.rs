// API routes for the MCP server
//
// This file defines the routing for the MCP server API endpoints.

use actix_web::{web, HttpResponse, Responder};
use crate::api::handlers::tools;
use crate::api::handlers::ApiResponse;
use crate::api::health_check;

/// Configure API routes for the MCP server
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check endpoint
        .route("/health", web::get().to(health_check))

        // Discovery and invocation
        .route("/tools", web::get().to(tools::list_tools))
        .route("/tools/{name}", web::post().to(tools::call_tool))
        .route("/call", web::post().to(tools::dispatch_call))

        // Fallback for undefined routes
        .default_service(web::route().to(not_found));
}

/// Handler for undefined routes
async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(ApiResponse::<()>::error("Resource not found"))
}
