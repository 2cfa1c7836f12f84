// API module for the MCP server
//
// This module contains the API endpoints, handlers, and middleware
// for the MCP server.

mod routes;
pub mod handlers;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use log::info;
use std::sync::Arc;

use crate::config::Settings;
use crate::tools::Dispatcher;

/// Initialize the API server with the appropriate routes and middleware
pub async fn init_server(
    settings: Arc<Settings>,
    dispatcher: Arc<Dispatcher>,
) -> std::io::Result<()> {
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = if settings.server.workers == 0 {
        num_cpus::get()
    } else {
        settings.server.workers
    };
    let request_timeout = std::time::Duration::from_secs(settings.server.request_timeout);

    info!("Listening on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = build_cors(&settings);
        App::new()
            .app_data(web::Data::new(dispatcher.clone()))
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .configure(routes::configure)
    })
    .workers(workers)
    .client_request_timeout(request_timeout)
    .bind((host.as_str(), port))?
    .run()
    .await
}

/// CORS policy from settings. Disabled CORS means the restrictive
/// default, which permits no cross-origin requests.
fn build_cors(settings: &Settings) -> Cors {
    if !settings.server.cors_enabled {
        return Cors::default();
    }
    if settings.server.cors_origins.iter().any(|o| o == "*") {
        return Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
    }
    let mut cors = Cors::default().allow_any_method().allow_any_header();
    for origin in &settings.server.cors_origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}

/// Health check handler
pub async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": crate::MCP_VERSION,
    }))
}
