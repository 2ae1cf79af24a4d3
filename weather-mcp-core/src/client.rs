use crate::model::{ToolDescriptor, ToolOutput};
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub mod stdio;

/// Faults a session client can produce.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Precondition violation: a query operation was invoked before connect.
    /// Raised to the caller since it indicates programmer error.
    #[error("Not connected to server. Connect first.")]
    NotConnected,

    #[error("Failed to launch weather server process: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("MCP session handshake failed: {0}")]
    Handshake(String),

    #[error("Remote call failed: {0}")]
    Call(String),
}

impl From<rmcp::service::ServiceError> for ClientError {
    fn from(err: rmcp::service::ServiceError) -> Self {
        ClientError::Call(err.to_string())
    }
}

/// Request/response session with a remote tool-providing service.
///
/// The router talks to the service exclusively through this trait; the
/// production implementation is [`stdio::McpSession`].
#[async_trait]
pub trait ToolClient: Send + Sync {
    /// Fetch the advertised tool descriptors. Never cached by callers.
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ClientError>;

    /// Invoke a named tool with a parameter mapping.
    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<ToolOutput, ClientError>;

    /// Release the session and any nested resources. Best-effort.
    async fn shutdown(self: Box<Self>);
}
