use anyhow::Result;
use clap::Parser;
use std::future::Future;
use weather_mcp_core::{Config, McpSession, QueryRouter, ToolDescriptor};

use crate::{demo, shell};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-mcp", version, about = "Weather MCP client")]
pub struct Cli {
    /// Run the interactive shell instead of the scripted demo.
    #[arg(long)]
    pub interactive: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load_or_init()?;

        println!("Connecting to weather MCP server...");
        let session = match McpSession::spawn(&config.server).await {
            Ok(session) => session,
            Err(e) => {
                // Failure surfaces as printed text; no loop is entered and
                // there is nothing to release yet.
                println!("Failed to connect to weather server: {e}");
                println!("Please check:");
                println!("1. uvx is installed");
                println!("2. The repository URL is accessible");
                println!("3. Your internet connection");
                return Ok(());
            }
        };

        let mut router = QueryRouter::new();
        router.connect(Box::new(session));

        match router.list_tools().await {
            Ok(tools) => {
                let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
                println!(
                    "Connected successfully! Available tools: {}",
                    names.join(", ")
                );
                for tool in &tools {
                    print_tool(tool);
                }
            }
            Err(e) => println!("Error listing tools: {e}"),
        }

        let result = if self.interactive {
            run_until_interrupted(shell::run(&router), interrupt_signal()).await
        } else {
            run_until_interrupted(demo::run(&router), interrupt_signal()).await
        };

        // Release the session on every path, including a failed loop and an
        // interrupt delivered while a remote call is in flight.
        router.disconnect().await;

        result
    }
}

/// Race the selected mode against an interrupt so a cancel signal ends the
/// loop and control still reaches the session release in the caller.
async fn run_until_interrupted(
    mode: impl Future<Output = Result<()>>,
    interrupt: impl Future<Output = ()>,
) -> Result<()> {
    tokio::select! {
        result = mode => result,
        () = interrupt => {
            println!("\nInterrupted. Goodbye!");
            Ok(())
        }
    }
}

async fn interrupt_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler could be installed; only the prompt-level
        // handling in the shell remains.
        std::future::pending::<()>().await;
    }
}

pub(crate) fn print_tool(tool: &ToolDescriptor) {
    print!("{}", format_tool(tool));
}

fn format_tool(tool: &ToolDescriptor) -> String {
    let mut out = format!("\nTool: {}\n", tool.name);
    if let Some(description) = &tool.description {
        out.push_str(&format!("   Description: {description}\n"));
    }
    if let Some(schema) = &tool.input_schema {
        let rendered =
            serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
        out.push_str(&format!("   Input Schema: {rendered}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn interrupt_ends_a_pending_loop_and_returns_control() {
        let result = run_until_interrupted(
            std::future::pending::<Result<()>>(),
            std::future::ready(()),
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn mode_result_passes_through_when_no_interrupt_arrives() {
        let result = run_until_interrupted(
            async { anyhow::bail!("loop failed") },
            std::future::pending::<()>(),
        )
        .await;

        assert_eq!(result.expect_err("must propagate").to_string(), "loop failed");
    }

    #[test]
    fn tool_schema_is_pretty_printed() {
        let tool = ToolDescriptor {
            name: "get_alerts".to_string(),
            description: Some("Alerts for a US state".to_string()),
            input_schema: Some(serde_json::json!({
                "properties": { "state": { "type": "string" } }
            })),
        };

        let text = format_tool(&tool);
        assert!(text.contains("Tool: get_alerts"));
        assert!(text.contains("Description: Alerts for a US state"));
        // Pretty-printed JSON spans multiple indented lines.
        assert!(text.contains("{\n"));
        assert!(text.contains("\"state\""));
    }

    #[test]
    fn tool_without_schema_omits_the_schema_line() {
        let tool = ToolDescriptor {
            name: "get_forecast".to_string(),
            description: None,
            input_schema: None,
        };

        let text = format_tool(&tool);
        assert!(!text.contains("Input Schema"));
        assert!(!text.contains("Description"));
    }
}
