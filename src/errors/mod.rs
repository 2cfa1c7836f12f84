// Error handling module for the MCP server
//
// This module defines the error types used throughout the MCP server.

use thiserror::Error;

/// Process-level errors for the MCP server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Dispatch-level failure taxonomy.
///
/// Every variant is caught exactly once, at the dispatcher boundary, and
/// rendered as an `Error: `-prefixed text item in the response envelope.
/// Nothing here crosses the dispatcher as a protocol-level exception.
///
/// Clone lets a resolved connection failure be handed to every caller
/// that waited on the same handshake attempt.
#[derive(Error, Debug, Clone)]
pub enum ToolError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// A required credential or connection string is absent. The message
    /// names the missing setting so a degraded process stays diagnosable.
    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Startup-time configuration bug: two tools claimed the same name.
    #[error("Operation '{0}' is already registered")]
    AlreadyRegistered(String),
}
