// API handlers for the MCP server
//
// Request handlers for the server endpoints. Tool invocations answer
// with the call envelope; everything else (discovery, fallbacks) uses
// the wrapper below.

pub mod tools;

/// Response wrapper for non-envelope endpoints
#[derive(serde::Serialize)]
pub struct ApiResponse<T>
where
    T: serde::Serialize,
{
    /// "success" or "error"
    pub status: String,
    /// Payload, present on success
    pub data: Option<T>,
    /// Human-readable message, present on error
    pub message: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            message: Some(message.into()),
        }
    }
}
