use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata the remote service advertises about one callable tool.
///
/// The input schema is an opaque JSON document supplied by the server; it is
/// displayed to the user but never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Option<Value>,
}

/// The concrete remote-call intent derived from one line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedQuery {
    /// Weather alerts for a US state, two-letter code already uppercased.
    Alerts { state: String },
    /// Forecast for coordinates resolved from the city table.
    Forecast { latitude: f64, longitude: f64 },
    /// Input matched neither rule; carries the original text unchanged plus
    /// the known city names and advertised tool names, surfaced to the user
    /// as guidance.
    Unrecognized {
        input: String,
        known_cities: Vec<String>,
        advertised: Vec<String>,
    },
}

/// The result shape of a remote tool call: a single content value or an
/// ordered sequence of them, each already coerced to text.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Single(String),
    Many(Vec<String>),
}

impl ToolOutput {
    /// Produce the final display string: a single value as-is, a sequence
    /// newline-joined in original order.
    pub fn render(&self) -> String {
        match self {
            ToolOutput::Single(text) => text.clone(),
            ToolOutput::Many(items) => items.join("\n"),
        }
    }
}
