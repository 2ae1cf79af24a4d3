//! Scripted demonstration mode: a fixed sequence exercising the tool
//! listing, city lookups, state alerts, and direct coordinate forecasts.

use anyhow::Result;
use std::time::Duration;
use weather_mcp_core::QueryRouter;

use crate::cli::print_tool;

const DEMO_CITIES: [&str; 4] = ["Beijing", "New York", "London", "Tokyo"];
const DEMO_STATES: [&str; 4] = ["CA", "NY", "FL", "TX"];
const DEMO_COORDINATES: [(f64, f64, &str); 3] = [
    (37.7749, -122.4194, "San Francisco"),
    (40.7128, -74.0060, "New York City"),
    (51.5074, -0.1278, "London"),
];

// Pacing between remote calls.
const PACING: Duration = Duration::from_secs(1);

pub async fn run(router: &QueryRouter) -> Result<()> {
    println!("\nRunning weather MCP client demo (use --interactive for the shell)");

    println!("\n1. Listing available tools...");
    for tool in &router.list_tools().await? {
        print_tool(tool);
    }

    println!("\n2. Querying weather for example locations...");
    for city in DEMO_CITIES {
        println!("\n--- Weather for {city} ---");
        println!("{}", router.query(city).await?);
        tokio::time::sleep(PACING).await;
    }

    println!("\n3. Weather alerts for US states...");
    for state in DEMO_STATES {
        println!("\n--- Weather Alerts for {state} ---");
        println!("{}", router.get_alerts(state).await?);
        tokio::time::sleep(PACING).await;
    }

    println!("\n4. Direct coordinate forecasts...");
    for (latitude, longitude, name) in DEMO_COORDINATES {
        println!("\n--- Forecast for {name} ({latitude}, {longitude}) ---");
        println!("{}", router.get_forecast(latitude, longitude).await?);
        tokio::time::sleep(PACING).await;
    }

    println!("\nDemo completed.");
    Ok(())
}
