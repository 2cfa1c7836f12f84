// Settings module for configuration
//
// This module defines the settings structure and loading/saving functions
// for the MCP server configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use anyhow::Result;

/// Server settings for the MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Number of worker threads
    pub workers: usize,
    /// Enable CORS
    pub cors_enabled: bool,
    /// CORS allowed origins
    pub cors_origins: Vec<String>,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: crate::defaults::SERVER_HOST.to_string(),
            port: crate::defaults::SERVER_PORT,
            workers: num_cpus::get(),
            cors_enabled: false,
            cors_origins: vec!["*".to_string()],
            request_timeout: crate::defaults::REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Control-plane API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlSettings {
    /// Base URL of the platform control-plane API
    pub api_base: String,
    /// Bearer token for the control-plane API. Absent means every
    /// control-plane operation fails with a configuration error; the
    /// process itself still starts and serves discovery.
    pub api_token: Option<String>,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.kvcloud.dev".to_string(),
            api_token: None,
        }
    }
}

/// Store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Connection URL for the key-value store (e.g. redis://host:6379).
    /// Absent means every store operation fails with a configuration error.
    pub url: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { url: None }
    }
}

/// Complete settings for the MCP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Environment (development, staging, production)
    pub environment: String,
    /// Server settings
    pub server: ServerSettings,
    /// Control-plane API settings
    pub control: ControlSettings,
    /// Store connection settings
    pub store: StoreSettings,
    /// Log level
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerSettings::default(),
            control: ControlSettings::default(),
            store: StoreSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Load settings from a file
pub fn load(path: impl AsRef<Path>) -> Result<Settings> {
    let config_str = match fs::read_to_string(&path) {
        Ok(config_str) => config_str,
        Err(_) => {
            // If the file doesn't exist, create default settings
            let default_settings = Settings::default();
            save(&default_settings, path)?;
            return Ok(apply_env_overrides(default_settings));
        }
    };

    let settings: Settings = toml::from_str(&config_str)?;
    Ok(apply_env_overrides(settings))
}

/// Save settings to a file
pub fn save(settings: &Settings, path: impl AsRef<Path>) -> Result<()> {
    let config_str = toml::to_string_pretty(settings)?;

    // Create parent directories if they don't exist
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, config_str)?;
    Ok(())
}

/// Environment variables take precedence over the config file for
/// credentials, so deployments can keep secrets out of the file.
fn apply_env_overrides(mut settings: Settings) -> Settings {
    if let Ok(token) = env::var("KVCLOUD_API_TOKEN") {
        if !token.is_empty() {
            settings.control.api_token = Some(token);
        }
    }
    if let Ok(url) = env::var("KVCLOUD_STORE_URL") {
        if !url.is_empty() {
            settings.store.url = Some(url);
        }
    }
    settings
}
