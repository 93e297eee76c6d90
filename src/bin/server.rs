//! Airflow HTTP Server Binary
//!
//! This is the main entry point for the passenger flow REST API server.
//! It initializes the flight store, sets up the HTTP router, and starts
//! serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the built-in in-memory store and sample Dublin schedule
//! cargo run --bin airflow-server
//!
//! # Run against a JSON fixture file
//! FLIGHT_DATA_PATH=data/flights.json cargo run --bin airflow-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `FLIGHT_DATA_PATH`: JSON fixture with airports and flights (optional)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use airflow_rust::config::{ConfigError, EngineConfig};
use airflow_rust::http::{create_router, AppState};
use airflow_rust::services::EstimationEngine;
use airflow_rust::store::MemoryFlightStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting Airflow HTTP Server");

    // Engine tuning from engine.toml when present, defaults otherwise
    let config = match EngineConfig::from_default_location() {
        Ok(config) => {
            info!("Loaded engine configuration from engine.toml");
            config
        }
        Err(ConfigError::Io(_)) => {
            info!("No engine.toml found, using default configuration");
            EngineConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    // Flight store: a JSON fixture when given one, else the built-in
    // Dublin sample schedule seeded for tomorrow (the default query date)
    let store = match env::var("FLIGHT_DATA_PATH") {
        Ok(path) => {
            info!("Loading flight data from {}", path);
            MemoryFlightStore::from_json_file(&path)?
        }
        Err(_) => {
            let date = Utc::now().date_naive() + Duration::days(1);
            info!("Seeding built-in Dublin departures for {}", date);
            MemoryFlightStore::with_sample_data(date)
        }
    };

    let engine = Arc::new(EstimationEngine::new(Arc::new(store), config));
    info!("Estimation engine initialized");

    // Create application state and router
    let state = AppState::new(engine);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Try http://{}/api/predictions/hourly/", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
