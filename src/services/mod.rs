//! Estimation pipeline services.
//!
//! The pure stages (aggregation, confidence, spatial distribution, arrival
//! guidance) are plain functions over the model types; [`engine`] composes
//! them behind the cached [`EstimationEngine`] facade and [`cache`] provides
//! the single-flight snapshot cache underneath it.

pub mod aggregator;
pub mod cache;
pub mod confidence;
pub mod engine;
pub mod heatmap;
pub mod recommendation;

pub use cache::SnapshotCache;
pub use engine::{EstimationEngine, FlightSearchResult, HeatmapView};
