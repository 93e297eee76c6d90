//! Estimation output models.
//!
//! The estimation pipeline produces one immutable [`PredictionSnapshot`] per
//! (airport, date). Everything a client can ask for (hourly curves, heatmap
//! slices, arrival recommendations) is derived from a shared snapshot
//! without recomputation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::flight::{AirportInfo, FlightRecord};
use crate::models::zones::{AirportZone, LeadBand};

/// One hour of aggregated passenger load.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyBucket {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Estimated passengers present during this hour (fractional; rounding
    /// happens only at the serialization edge)
    pub raw_passengers: f64,
    /// Number of flights contributing to this hour
    pub flight_count: usize,
    /// Load broken down by lead-time band, indexed by [`LeadBand::index`].
    /// The bands sum to `raw_passengers`.
    pub band_passengers: [f64; LeadBand::COUNT],
}

impl HourlyBucket {
    pub fn empty(hour: u8) -> Self {
        Self {
            hour,
            raw_passengers: 0.0,
            flight_count: 0,
            band_passengers: [0.0; LeadBand::COUNT],
        }
    }
}

/// Reliability grade of an hourly estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Numeric confidence with its banded level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    /// 0.0 to 1.0
    pub value: f64,
    pub level: ConfidenceLevel,
}

/// One hour of the prediction curve: the bucket plus its confidence.
#[derive(Debug, Clone)]
pub struct HourlyPrediction {
    pub bucket: HourlyBucket,
    pub confidence: ConfidenceScore,
}

/// Day-level statistics derived from the 24 buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    /// Sum of the per-hour figures after rounding each hour to whole
    /// passengers, so the serialized payload reconciles exactly.
    pub total_passengers: i64,
    /// Hour with the highest load; earliest hour wins ties.
    pub peak_hour: u8,
    pub peak_passengers: i64,
    pub flights_processed: usize,
    /// Records skipped for missing or invalid data.
    pub flights_dropped: usize,
    /// Mean confidence over hours with passengers, rounded to 2 decimals.
    pub avg_confidence: f64,
}

/// Immutable result of one full estimation pass for (airport, date).
#[derive(Debug, Clone)]
pub struct PredictionSnapshot {
    pub airport: AirportInfo,
    pub date: NaiveDate,
    /// Exactly 24 entries, hour 0 through 23.
    pub predictions: Vec<HourlyPrediction>,
    /// The zone set this snapshot was distributed over.
    pub zones: Vec<AirportZone>,
    /// Per-hour per-zone passenger load; `zone_loads[hour][zone_index]`
    /// aligns with `zones`.
    pub zone_loads: Vec<Vec<f64>>,
    /// The day's schedule as read for this pass, kept so flight lookups see
    /// the same data the curve was built from.
    pub flights: Vec<FlightRecord>,
    pub summary: DaySummary,
    pub computed_at: DateTime<Utc>,
}

/// One weighted geo-point of the terminal heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lon: f64,
    /// Normalized density, 0.0 to 1.0
    pub intensity: f64,
}

/// Arrival guidance for one specific flight.
#[derive(Debug, Clone)]
pub struct ArrivalRecommendation {
    /// When to be at the terminal.
    pub optimal_arrival: DateTime<Utc>,
    /// Hour of day containing `optimal_arrival`, 0-23.
    pub optimal_arrival_hour: u8,
    /// Chosen-vs-baseline congestion, human readable.
    pub comparison: String,
    /// Expected queue time saved against the two-hours-before baseline.
    pub time_savings: chrono::Duration,
    /// Route-specific buffer guidance ("International flight: ...").
    pub route_type_note: String,
    /// Busiest hour of the day at the airport, for context.
    pub peak_congestion_time: DateTime<Utc>,
    pub peak_passengers: i64,
    /// Relative congestion (0.0 to 1.0) at the recommended arrival hour.
    pub congestion_at_your_time: f64,
}
