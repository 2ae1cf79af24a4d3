//! Core library for the `weather-mcp` CLI.
//!
//! This crate defines:
//! - Configuration for launching the remote weather MCP server
//! - The MCP session client and the trait seam over it
//! - The query router mapping free-text input to remote tool calls
//!
//! It is used by `weather-mcp-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod model;
pub mod router;

pub use client::{ClientError, ToolClient, stdio::McpSession};
pub use config::{Config, ServerConfig};
pub use model::{ResolvedQuery, ToolDescriptor, ToolOutput};
pub use router::QueryRouter;
