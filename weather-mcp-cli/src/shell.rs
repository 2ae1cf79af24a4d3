//! Interactive shell: one line in, one remote call, one answer out.

use anyhow::Result;
use inquire::{InquireError, Text};
use weather_mcp_core::QueryRouter;

use crate::cli::print_tool;

const HELP: &str = "\
Available commands:
  - Location names: Beijing, New York, London, Tokyo, etc.
  - US state codes: CA, NY, TX, FL, etc. (for alerts)
  - forecast <lat> <lon>: Get forecast for coordinates
  - alerts <state>: Get weather alerts for US state
  - tools: List available server tools
  - help: Show this help message
  - quit: Exit the client";

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Quit,
    Tools,
    Help,
    Forecast { latitude: f64, longitude: f64 },
    Alerts { state: String },
    Query(String),
    Empty,
    /// Malformed command; the message is printed and the loop continues.
    Invalid(String),
}

/// Flat prefix matching over the five commands; anything else is a free-text
/// query for the classification path.
pub fn parse_line(line: &str) -> ShellCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellCommand::Empty;
    }

    let lowered = trimmed.to_lowercase();
    match lowered.as_str() {
        "quit" => return ShellCommand::Quit,
        "tools" => return ShellCommand::Tools,
        "help" => return ShellCommand::Help,
        _ => {}
    }

    if lowered.starts_with("forecast ") {
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() != 3 {
            return ShellCommand::Invalid("Usage: forecast <latitude> <longitude>".to_string());
        }
        return match (parts[1].parse::<f64>(), parts[2].parse::<f64>()) {
            (Ok(latitude), Ok(longitude)) => ShellCommand::Forecast {
                latitude,
                longitude,
            },
            _ => ShellCommand::Invalid(
                "Invalid coordinates. Use: forecast <latitude> <longitude>".to_string(),
            ),
        };
    }

    if lowered.starts_with("alerts ") {
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() != 2 {
            return ShellCommand::Invalid(
                "Usage: alerts <state_code> (e.g., alerts CA)".to_string(),
            );
        }
        return ShellCommand::Alerts {
            state: parts[1].to_string(),
        };
    }

    ShellCommand::Query(trimmed.to_string())
}

/// Read-eval-print loop. Returns when the user quits or interrupts the
/// prompt; the caller releases the session afterwards.
pub async fn run(router: &QueryRouter) -> Result<()> {
    println!("\nWeather MCP Client Interactive Mode");
    println!("{HELP}");
    println!("{}", "-".repeat(60));

    loop {
        let line = match Text::new("Enter location or command:").prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                println!("Goodbye!");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        match parse_line(&line) {
            ShellCommand::Quit => {
                println!("Goodbye!");
                return Ok(());
            }
            ShellCommand::Tools => {
                let tools = router.list_tools().await?;
                if tools.is_empty() {
                    println!("No tools reported by the server.");
                } else {
                    println!("\nAvailable Tools:");
                    for tool in &tools {
                        print_tool(tool);
                    }
                }
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Forecast {
                latitude,
                longitude,
            } => {
                let result = router.get_forecast(latitude, longitude).await?;
                println!("\nWeather Forecast:\n{result}");
            }
            ShellCommand::Alerts { state } => {
                let result = router.get_alerts(&state).await?;
                println!("\nWeather Alerts:\n{result}");
            }
            ShellCommand::Query(input) => {
                let result = router.query(&input).await?;
                println!("\nWeather Result:\n{result}");
            }
            ShellCommand::Empty => {
                println!("Please enter a location or command. Type 'help' for available commands.");
            }
            ShellCommand::Invalid(message) => println!("{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_with_two_numeric_tokens_bypasses_classification() {
        let parsed = parse_line("forecast 40.7128 -74.006");
        assert_eq!(
            parsed,
            ShellCommand::Forecast {
                latitude: 40.7128,
                longitude: -74.006
            }
        );
    }

    #[test]
    fn forecast_with_malformed_coordinates_is_invalid() {
        let parsed = parse_line("forecast north south");
        assert!(matches!(parsed, ShellCommand::Invalid(msg) if msg.contains("Invalid coordinates")));
    }

    #[test]
    fn forecast_with_wrong_token_count_is_invalid() {
        for line in ["forecast 40.7", "forecast 1 2 3"] {
            let parsed = parse_line(line);
            assert!(
                matches!(parsed, ShellCommand::Invalid(ref msg) if msg.starts_with("Usage:")),
                "line {line:?}"
            );
        }
    }

    #[test]
    fn alerts_takes_exactly_one_token() {
        assert_eq!(
            parse_line("alerts CA"),
            ShellCommand::Alerts {
                state: "CA".to_string()
            }
        );
        assert!(matches!(
            parse_line("alerts CA NY"),
            ShellCommand::Invalid(_)
        ));
    }

    #[test]
    fn bare_alerts_word_is_a_free_text_query() {
        // No trailing space, so the prefix does not match.
        assert_eq!(
            parse_line("alerts"),
            ShellCommand::Query("alerts".to_string())
        );
    }

    #[test]
    fn exact_commands_match_case_insensitively() {
        assert_eq!(parse_line("quit"), ShellCommand::Quit);
        assert_eq!(parse_line("QUIT"), ShellCommand::Quit);
        assert_eq!(parse_line("tools"), ShellCommand::Tools);
        assert_eq!(parse_line("help"), ShellCommand::Help);
    }

    #[test]
    fn blank_lines_are_empty() {
        assert_eq!(parse_line(""), ShellCommand::Empty);
        assert_eq!(parse_line("   "), ShellCommand::Empty);
    }

    #[test]
    fn anything_else_is_a_query_with_original_text() {
        assert_eq!(
            parse_line("  New York "),
            ShellCommand::Query("New York".to_string())
        );
    }
}
