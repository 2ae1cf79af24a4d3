use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{
    client::{ClientError, ToolClient},
    model::{ResolvedQuery, ToolDescriptor, ToolOutput},
};

/// Tool the remote service advertises for US state weather alerts.
pub const ALERTS_TOOL: &str = "get_alerts";
/// Tool the remote service advertises for coordinate forecasts.
pub const FORECAST_TOOL: &str = "get_forecast";

/// Routes free-text queries to the remote weather service.
///
/// Owns the immutable city → coordinate table and at most one session; all
/// query operations require an established session and fail fast with
/// [`ClientError::NotConnected`] otherwise.
pub struct QueryRouter {
    locations: HashMap<String, (f64, f64)>,
    client: Option<Box<dyn ToolClient>>,
}

impl QueryRouter {
    pub fn new() -> Self {
        // Fixed lookup table, not a geocoder. Keys are lowercase.
        let locations = HashMap::from([
            ("beijing".to_string(), (39.9042, 116.4074)),
            ("new york".to_string(), (40.7128, -74.0060)),
            ("london".to_string(), (51.5074, -0.1278)),
            ("tokyo".to_string(), (35.6762, 139.6503)),
            ("san francisco".to_string(), (37.7749, -122.4194)),
            ("paris".to_string(), (48.8566, 2.3522)),
            ("sydney".to_string(), (-33.8688, 151.2093)),
            ("los angeles".to_string(), (34.0522, -118.2437)),
            ("chicago".to_string(), (41.8781, -87.6298)),
            ("miami".to_string(), (25.7617, -80.1918)),
        ]);

        Self {
            locations,
            client: None,
        }
    }

    /// Take ownership of an established session.
    pub fn connect(&mut self, client: Box<dyn ToolClient>) {
        self.client = Some(client);
    }

    /// Release the session. Safe to call in any state; best-effort.
    pub async fn disconnect(&mut self) {
        if let Some(client) = self.client.take() {
            client.shutdown().await;
            tracing::info!("session closed");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    fn session(&self) -> Result<&dyn ToolClient, ClientError> {
        self.client.as_deref().ok_or(ClientError::NotConnected)
    }

    /// Known city names, sorted for stable display.
    pub fn known_cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = self.locations.keys().cloned().collect();
        cities.sort();
        cities
    }

    /// Classify one line of input against the advertised tool set.
    ///
    /// Pure and deterministic. Precedence is state-code > city-lookup >
    /// unrecognized: a two-letter input is tried as a US state code before
    /// the city table is consulted. The table currently has no two-letter
    /// keys; revisit this ordering before ever adding one.
    pub fn classify(&self, input: &str, advertised: &[String]) -> ResolvedQuery {
        let trimmed = input.trim();

        if trimmed.chars().count() == 2
            && trimmed.chars().all(char::is_alphabetic)
            && advertised.iter().any(|t| t == ALERTS_TOOL)
        {
            return ResolvedQuery::Alerts {
                state: trimmed.to_uppercase(),
            };
        }

        if let Some(&(latitude, longitude)) = self.locations.get(&trimmed.to_lowercase()) {
            if advertised.iter().any(|t| t == FORECAST_TOOL) {
                return ResolvedQuery::Forecast {
                    latitude,
                    longitude,
                };
            }
        }

        ResolvedQuery::Unrecognized {
            input: input.to_string(),
            known_cities: self.known_cities(),
            advertised: advertised.to_vec(),
        }
    }

    /// Dispatch a resolved query to the session.
    ///
    /// Remote faults come back as formatted error text, never as a raw
    /// fault; only the missing-session precondition is an `Err`.
    pub async fn invoke(&self, query: &ResolvedQuery) -> Result<String, ClientError> {
        let session = self.session()?;

        match query {
            ResolvedQuery::Alerts { state } => {
                tracing::info!(%state, "using {ALERTS_TOOL}");

                let mut args = Map::new();
                args.insert("state".to_string(), Value::String(state.clone()));

                Ok(render_or_error(
                    session.call_tool(ALERTS_TOOL, args).await,
                    "Error querying weather",
                ))
            }
            ResolvedQuery::Forecast {
                latitude,
                longitude,
            } => {
                tracing::info!(latitude, longitude, "using {FORECAST_TOOL}");

                Ok(render_or_error(
                    session.call_tool(FORECAST_TOOL, coordinate_args(*latitude, *longitude)).await,
                    "Error querying weather",
                ))
            }
            ResolvedQuery::Unrecognized {
                input,
                known_cities,
                advertised,
            } => Ok(unrecognized_help(input, known_cities, advertised)),
        }
    }

    /// Full classification path for one line of input: fresh tool listing,
    /// classify, invoke.
    pub async fn query(&self, input: &str) -> Result<String, ClientError> {
        let session = self.session()?;

        let advertised: Vec<String> = match session.list_tools().await {
            Ok(tools) => tools.into_iter().map(|t| t.name).collect(),
            Err(e) => return Ok(format!("Error querying weather: {e}")),
        };

        if advertised.is_empty() {
            return Ok("No tools available on the server.".to_string());
        }

        let resolved = self.classify(input, &advertised);
        self.invoke(&resolved).await
    }

    /// Forecast for explicit coordinates, bypassing classification.
    pub async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, ClientError> {
        let session = self.session()?;

        tracing::info!(latitude, longitude, "requesting forecast");

        Ok(render_or_error(
            session.call_tool(FORECAST_TOOL, coordinate_args(latitude, longitude)).await,
            "Error getting forecast",
        ))
    }

    /// Alerts for an explicit state code, bypassing classification.
    pub async fn get_alerts(&self, state: &str) -> Result<String, ClientError> {
        let session = self.session()?;

        let state = state.to_uppercase();
        tracing::info!(%state, "requesting alerts");

        let mut args = Map::new();
        args.insert("state".to_string(), Value::String(state));

        Ok(render_or_error(
            session.call_tool(ALERTS_TOOL, args).await,
            "Error getting alerts",
        ))
    }

    /// Re-fetch the advertised tool descriptors. A remote fault is logged
    /// and yields an empty list rather than an error.
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ClientError> {
        let session = self.session()?;

        match session.list_tools().await {
            Ok(tools) => Ok(tools),
            Err(e) => {
                tracing::warn!("error listing tools: {e}");
                Ok(Vec::new())
            }
        }
    }
}

impl Default for QueryRouter {
    fn default() -> Self {
        Self::new()
    }
}

fn coordinate_args(latitude: f64, longitude: f64) -> Map<String, Value> {
    let mut args = Map::new();
    args.insert("latitude".to_string(), Value::from(latitude));
    args.insert("longitude".to_string(), Value::from(longitude));
    args
}

fn render_or_error(result: Result<ToolOutput, ClientError>, prefix: &str) -> String {
    match result {
        Ok(output) => output.render(),
        Err(e) => format!("{prefix}: {e}"),
    }
}

fn unrecognized_help(input: &str, known_cities: &[String], advertised: &[String]) -> String {
    format!(
        "Unable to query weather for '{input}'.\n\
         \n\
         Available options:\n\
         1. For US weather alerts, use a 2-letter state code (e.g., 'CA', 'NY', 'TX')\n\
         2. For weather forecasts, use one of these supported cities:\n   {}\n\
         \n\
         Available tools on server: {}",
        known_cities.join(", "),
        advertised.join(", "),
    )
}
