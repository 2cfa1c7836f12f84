// Control-plane backend
//
// Client for the platform's HTTP control-plane API. Every call is
// independent and carries the bearer token; there is no session to
// manage. With no token configured the client never attempts a call
// and reports a configuration error instead.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::errors::ToolError;

/// One control-plane request, already resolved to a full URL.
pub struct ControlRequest {
    pub method: Method,
    pub url: String,
    pub token: String,
    pub body: Option<Value>,
}

/// Transport seam for the control-plane API. The real implementation
/// speaks HTTP via reqwest; tests record or forbid requests.
#[async_trait]
pub trait ControlTransport: Send + Sync {
    async fn send(&self, request: ControlRequest) -> Result<Value, ToolError>;
}

/// Stateless client for the control-plane API.
pub struct ControlPlaneClient {
    api_base: String,
    token: Option<String>,
    transport: Arc<dyn ControlTransport>,
}

impl ControlPlaneClient {
    pub fn new(api_base: String, token: Option<String>) -> Self {
        Self::with_transport(api_base, token, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(
        api_base: String,
        token: Option<String>,
        transport: Arc<dyn ControlTransport>,
    ) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
            transport,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Fail fast when no API token is available.
    pub fn check_configured(&self) -> Result<&str, ToolError> {
        self.token.as_deref().ok_or_else(|| {
            ToolError::NotConfigured(
                "control-plane API token is not set (configure control.api_token or KVCLOUD_API_TOKEN)"
                    .to_string(),
            )
        })
    }

    pub async fn get(&self, path: &str) -> Result<Value, ToolError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ToolError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ToolError> {
        self.request(Method::DELETE, path, None).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ToolError> {
        let token = self.check_configured()?.to_string();
        self.transport
            .send(ControlRequest {
                method,
                url: format!("{}{}", self.api_base, path),
                token,
                body,
            })
            .await
    }
}

/// HTTP transport backed by reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ControlTransport for HttpTransport {
    async fn send(&self, request: ControlRequest) -> Result<Value, ToolError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .bearer_auth(&request.token);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ToolError::Connection(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ToolError::Backend(e.to_string()))?;

        if !status.is_success() {
            // Pass the API's own message through verbatim when it sends one.
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .or_else(|| v.get("error"))
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or(text);
            return Err(ToolError::Backend(format!("{}: {}", status.as_u16(), message)));
        }

        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ToolError::Backend(format!("invalid response body: {}", e)))
    }
}
