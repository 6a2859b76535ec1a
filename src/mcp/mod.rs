//! MCP (Model Context Protocol) server over stdio.
//!
//! Exposes the file keyword search as a tool via JSON-RPC, one message per
//! line on stdin/stdout.

pub mod protocol;
pub mod server;

pub use server::McpServer;
