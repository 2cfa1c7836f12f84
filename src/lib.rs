// kvcloud-mcp: Model Context Protocol server for the kvcloud platform
//
// This library implements a Model Context Protocol (MCP) server which
// exposes the kvcloud control-plane API and the keys of a managed
// key-value database to AI agents through one uniform tool catalog.

pub mod api;
pub mod backend;
pub mod config;
pub mod errors;
pub mod tools;

/// Version of the MCP specification implemented by this server
pub const MCP_VERSION: &str = "0.1.0";

/// Default server configuration constants
pub mod defaults {
    /// Default port for the MCP server
    pub const SERVER_PORT: u16 = 3010;
    /// Default host address to bind to
    pub const SERVER_HOST: &str = "127.0.0.1";
    /// Default timeout for requests in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
}
