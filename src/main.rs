use std::env;
use std::process;
use std::sync::Arc;

use anyhow::Result;
use log::{error, info, warn};

use kvcloud_mcp::backend::{ControlPlaneClient, StoreManager};
use kvcloud_mcp::tools::Dispatcher;
use kvcloud_mcp::{api, tools};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    info!("Starting kvcloud-mcp server version {}", kvcloud_mcp::MCP_VERSION);

    // Get configuration path from command line arguments
    let config_path = env::args().nth(1);

    // Load configuration
    let settings = match kvcloud_mcp::config::load_config(config_path.as_deref()) {
        Ok(settings) => {
            info!("Loaded configuration successfully");
            settings
        },
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Missing credentials leave the server running in a degraded state:
    // discovery works, dependent operations fail with a clear message.
    let control = Arc::new(ControlPlaneClient::new(
        settings.control.api_base.clone(),
        settings.control.api_token.clone(),
    ));
    if !control.is_configured() {
        warn!("No control-plane API token configured; database operations will fail until one is set");
    }

    let store = Arc::new(StoreManager::new(settings.store.url.clone()));
    if !store.is_configured() {
        warn!("No store connection URL configured; key operations will fail until one is set");
    }

    // Initialize the tool registry; a duplicate tool name is a
    // configuration bug and aborts startup.
    let registry = match tools::init_registry() {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to build tool registry: {}", e);
            process::exit(1);
        }
    };
    info!("Initialized tool registry with {} tools", registry.len());

    let dispatcher = Arc::new(Dispatcher::new(registry, control, store));

    // Start the API server
    match api::init_server(settings, dispatcher).await {
        Ok(_) => {
            info!("kvcloud-mcp server stopped gracefully");
            Ok(())
        },
        Err(e) => {
            error!("Error starting kvcloud-mcp server: {}", e);
            process::exit(1);
        }
    }
}
