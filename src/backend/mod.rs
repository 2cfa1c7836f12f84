// Backend module for the MCP server
//
// This module owns the two external backends tools delegate to: the
// platform control-plane API (stateless HTTP) and the key-value store
// (one persistent connection managed by StoreManager).

pub mod control;
pub mod scan;
pub mod store;

#[cfg(test)]
pub mod testing;

pub use control::{ControlPlaneClient, ControlTransport};
pub use store::{StoreConn, StoreConnector, StoreManager};
