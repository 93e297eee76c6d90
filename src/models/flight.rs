//! Flight schedule domain records.
//!
//! These are the records the store adapters hand to the estimation services.
//! A record is immutable once read; estimation derives everything else from
//! it and never writes back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{AirportCode, FlightNumber};

/// Route classification. Drives load factors, passenger-arrival windows and
/// the minimum security buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    Domestic,
    International,
}

impl RouteType {
    /// Human-readable label used in recommendation notes.
    pub fn label(&self) -> &'static str {
        match self {
            RouteType::Domestic => "Domestic",
            RouteType::International => "International",
        }
    }
}

/// Operational status of a scheduled flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    Scheduled,
    Delayed,
    Departed,
    Arrived,
    Cancelled,
}

/// Airport metadata returned alongside predictions and heatmaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportInfo {
    pub code: AirportCode,
    pub name: String,
    pub city: String,
    pub country: String,
    /// Terminal anchor latitude in decimal degrees
    pub latitude: f64,
    /// Terminal anchor longitude in decimal degrees
    pub longitude: f64,
}

/// One departing flight as read from the schedule source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_number: FlightNumber,
    pub airline: String,
    pub origin: AirportCode,
    pub destination: AirportCode,
    /// Display name of the destination (e.g. "London Heathrow")
    #[serde(default)]
    pub destination_name: String,
    pub scheduled_departure: DateTime<Utc>,
    #[serde(default)]
    pub scheduled_arrival: Option<DateTime<Utc>>,
    /// Aircraft model if known; display only
    #[serde(default)]
    pub aircraft_type: Option<String>,
    /// Seats on the aircraft. Records with a non-positive value are skipped
    /// by the aggregator and counted as dropped.
    pub seat_capacity: i32,
    pub route_type: RouteType,
    #[serde(default = "default_status")]
    pub status: FlightStatus,
}

fn default_status() -> FlightStatus {
    FlightStatus::Scheduled
}

impl FlightRecord {
    /// Whether this record can contribute passengers to an estimate.
    pub fn is_usable(&self) -> bool {
        self.seat_capacity > 0
    }
}
