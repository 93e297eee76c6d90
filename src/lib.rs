//! # Airflow Estimation Engine
//!
//! Passenger flow forecasting for airport terminals.
//!
//! This crate estimates hourly passenger presence in a terminal from the
//! day's departure schedule, renders the load as a geographic heatmap over
//! terminal zones and derives arrival-time recommendations for individual
//! flights. An optional Axum HTTP server exposes the whole pipeline as a
//! JSON API.
//!
//! ## Features
//!
//! - **Schedule Aggregation**: Spread each flight's expected passengers over
//!   pre-departure arrival slots into 24 hourly buckets
//! - **Confidence Scoring**: Grade every hourly estimate by the flight count
//!   behind it
//! - **Terminal Heatmap**: Distribute hourly loads over weighted terminal
//!   zones, normalized by zone capacity
//! - **Arrival Recommendations**: Rank candidate arrival hours by queue
//!   congestion without ever trading away the security buffer
//! - **Snapshot Cache**: Single-flight computation per (airport, date) with
//!   TTL expiry
//!
//! ## Architecture
//!
//! - [`api`]: Validated identifier and geographic types shared by all layers
//! - [`models`]: Flight, zone and prediction domain types
//! - [`store`]: The [`store::FlightStore`] trait and its adapters
//! - [`services`]: The estimation pipeline and the [`services::EstimationEngine`] facade
//! - [`config`]: TOML-backed engine tuning parameters
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - EngineError carries structured detail payloads
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;

pub mod services;
pub mod store;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{EngineError, EngineResult};
pub use services::EstimationEngine;
