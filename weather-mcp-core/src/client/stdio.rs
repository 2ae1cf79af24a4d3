use async_trait::async_trait;
use rmcp::{
    model::{CallToolRequestParam, Content, Tool},
    service::{RoleClient, RunningService, ServiceExt},
    transport::TokioChildProcess,
};
use serde_json::{Map, Value};
use tokio::process::Command;

use crate::{
    config::ServerConfig,
    model::{ToolDescriptor, ToolOutput},
};

use super::{ClientError, ToolClient};

/// One MCP session over a stdio subprocess transport.
///
/// The transport owns the child process and kills it when dropped, so the
/// subprocess is released on every exit path even if [`ToolClient::shutdown`]
/// is never reached.
pub struct McpSession {
    service: RunningService<RoleClient, ()>,
}

impl McpSession {
    /// Spawn the configured server command and perform the MCP initialize
    /// handshake.
    pub async fn spawn(config: &ServerConfig) -> Result<Self, ClientError> {
        tracing::info!(command = %config.command, "launching weather MCP server");

        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args);

        let transport = TokioChildProcess::new(cmd)?;
        let service = ()
            .serve(transport)
            .await
            .map_err(|e| ClientError::Handshake(e.to_string()))?;

        tracing::info!("MCP session established");

        Ok(Self { service })
    }
}

#[async_trait]
impl ToolClient for McpSession {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ClientError> {
        let result = self.service.list_tools(Default::default()).await?;

        Ok(result.tools.into_iter().map(describe_tool).collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<ToolOutput, ClientError> {
        let result = self
            .service
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments: Some(arguments),
            })
            .await?;

        let output = content_to_output(&result.content);

        // Tool-level failures arrive as a flagged result, not a transport
        // error; surface them through the same error path.
        if result.is_error == Some(true) {
            return Err(ClientError::Call(output.render()));
        }

        Ok(output)
    }

    async fn shutdown(self: Box<Self>) {
        if let Err(e) = self.service.cancel().await {
            tracing::warn!("error while closing MCP session: {e}");
        }
    }
}

fn describe_tool(tool: Tool) -> ToolDescriptor {
    let schema = if tool.input_schema.is_empty() {
        None
    } else {
        Some(Value::Object((*tool.input_schema).clone()))
    };

    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool.description.map(|d| d.to_string()),
        input_schema: schema,
    }
}

/// Normalize the heterogeneous result shape: one content value stands alone,
/// a sequence keeps its order for newline-joining at render time. Non-text
/// content is JSON-encoded rather than dropped.
fn content_to_output(content: &[Content]) -> ToolOutput {
    let mut items: Vec<String> = content
        .iter()
        .map(|c| match c.as_text() {
            Some(text) => text.text.clone(),
            None => serde_json::to_string(c).unwrap_or_else(|_| String::from("<opaque content>")),
        })
        .collect();

    if items.len() == 1 {
        ToolOutput::Single(items.remove(0))
    } else {
        ToolOutput::Many(items)
    }
}
