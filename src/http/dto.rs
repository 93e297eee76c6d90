//! Data Transfer Objects for the HTTP API.
//!
//! Responses carry a `success` flag alongside their payload; error bodies
//! are built in [`super::error`]. Internally passenger figures stay
//! fractional; the DTOs here are where each hour is rounded to whole
//! passengers, and the day summary reconciles with those rounded figures by
//! construction.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// Model types that are already wire-shaped go out as-is.
pub use crate::models::{ConfidenceLevel, HeatmapPoint};

use crate::api::{AirportCode, FlightNumber};
use crate::models::{
    AirportInfo, ArrivalRecommendation, DaySummary, FlightRecord, FlightStatus, HourlyPrediction,
    PredictionSnapshot, RouteType,
};
use crate::services::{FlightSearchResult, HeatmapView};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Query parameters shared by the prediction endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PredictionsQuery {
    /// IATA airport code (default: DUB)
    #[serde(default)]
    pub airport: Option<String>,
    /// Date as YYYY-MM-DD (default: tomorrow)
    #[serde(default)]
    pub date: Option<String>,
}

/// Query parameters for the heatmap endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeatmapQuery {
    #[serde(default)]
    pub airport: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// First hour of the window, inclusive (default: 0)
    #[serde(default)]
    pub from_hour: Option<u8>,
    /// Last hour of the window, inclusive (default: 23)
    #[serde(default)]
    pub to_hour: Option<u8>,
}

/// Query parameters for the flight search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlightSearchQuery {
    /// Flight number to look up (required)
    #[serde(default)]
    pub flight_number: Option<String>,
    #[serde(default)]
    pub airport: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Airport identity as embedded in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportDto {
    pub code: AirportCode,
    pub name: String,
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&AirportInfo> for AirportDto {
    fn from(info: &AirportInfo) -> Self {
        Self {
            code: info.code.clone(),
            name: info.name.clone(),
            city: info.city.clone(),
            country: info.country.clone(),
            lat: info.latitude,
            lon: info.longitude,
        }
    }
}

/// One hour of the prediction curve as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyPredictionDto {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Estimated passengers, rounded to whole people
    pub passengers: i64,
    /// Confidence 0.0-1.0, rounded to 2 decimals
    pub confidence: f64,
    pub level: ConfidenceLevel,
}

impl From<&HourlyPrediction> for HourlyPredictionDto {
    fn from(prediction: &HourlyPrediction) -> Self {
        Self {
            hour: prediction.bucket.hour,
            passengers: prediction.bucket.raw_passengers.round() as i64,
            confidence: round2(prediction.confidence.value),
            level: prediction.confidence.level,
        }
    }
}

/// Day summary as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummaryDto {
    pub total_passengers: i64,
    /// Hour of day with the most passengers, earliest on ties
    pub peak_hour: u8,
    pub peak_passengers: i64,
    pub flights_processed: usize,
    pub flights_dropped: usize,
    pub avg_confidence: f64,
}

impl From<&DaySummary> for DaySummaryDto {
    fn from(summary: &DaySummary) -> Self {
        Self {
            total_passengers: summary.total_passengers,
            peak_hour: summary.peak_hour,
            peak_passengers: summary.peak_passengers,
            flights_processed: summary.flights_processed,
            flights_dropped: summary.flights_dropped,
            avg_confidence: summary.avg_confidence,
        }
    }
}

/// Response for GET /api/predictions/hourly/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyPredictionsResponse {
    pub success: bool,
    pub airport: AirportDto,
    pub date: NaiveDate,
    /// Exactly 24 entries, hour 0 through 23
    pub predictions: Vec<HourlyPredictionDto>,
    pub summary: DaySummaryDto,
}

impl HourlyPredictionsResponse {
    pub fn from_snapshot(snapshot: &PredictionSnapshot) -> Self {
        Self {
            success: true,
            airport: AirportDto::from(&snapshot.airport),
            date: snapshot.date,
            predictions: snapshot.predictions.iter().map(Into::into).collect(),
            summary: DaySummaryDto::from(&snapshot.summary),
        }
    }
}

/// Response for GET /api/heatmap/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapResponse {
    pub success: bool,
    pub airport: AirportDto,
    pub point_count: usize,
    pub points: Vec<HeatmapPoint>,
    pub timestamp: DateTime<Utc>,
}

impl HeatmapResponse {
    pub fn from_view(view: &HeatmapView) -> Self {
        Self {
            success: true,
            airport: AirportDto::from(&view.airport),
            point_count: view.points.len(),
            points: view.points.clone(),
            timestamp: view.computed_at,
        }
    }
}

/// One flight as served by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightDto {
    pub flight_number: FlightNumber,
    pub airline: String,
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub destination_name: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: Option<DateTime<Utc>>,
    /// Aircraft model, "Unknown" when the schedule does not say
    pub aircraft: String,
    pub capacity: i32,
    /// Capacity scaled by the route's load factor
    pub estimated_passengers: i64,
    pub route_type: RouteType,
    pub status: FlightStatus,
}

impl FlightDto {
    pub fn new(flight: &FlightRecord, estimated_passengers: i64) -> Self {
        Self {
            flight_number: flight.flight_number.clone(),
            airline: flight.airline.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            destination_name: flight.destination_name.clone(),
            departure_time: flight.scheduled_departure,
            arrival_time: flight.scheduled_arrival,
            aircraft: flight
                .aircraft_type
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            capacity: flight.seat_capacity,
            estimated_passengers,
            route_type: flight.route_type,
            status: flight.status,
        }
    }
}

/// Arrival guidance as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationDto {
    pub optimal_arrival: DateTime<Utc>,
    pub optimal_arrival_hour: u8,
    pub comparison: String,
    /// Expected queue minutes saved against a two-hours-before arrival
    pub time_savings: i64,
    pub route_type_note: String,
    pub peak_congestion_time: DateTime<Utc>,
    pub peak_passengers: i64,
    /// Relative congestion 0.0-1.0 at the recommended hour
    pub congestion_at_your_time: f64,
}

impl From<&ArrivalRecommendation> for RecommendationDto {
    fn from(rec: &ArrivalRecommendation) -> Self {
        Self {
            optimal_arrival: rec.optimal_arrival,
            optimal_arrival_hour: rec.optimal_arrival_hour,
            comparison: rec.comparison.clone(),
            time_savings: rec.time_savings.num_minutes(),
            route_type_note: rec.route_type_note.clone(),
            peak_congestion_time: rec.peak_congestion_time,
            peak_passengers: rec.peak_passengers,
            congestion_at_your_time: round2(rec.congestion_at_your_time),
        }
    }
}

/// Response for GET /api/flights/search/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSearchResponse {
    pub success: bool,
    pub flight: FlightDto,
    pub recommendation: RecommendationDto,
    pub date: NaiveDate,
}

impl FlightSearchResponse {
    pub fn from_result(result: &FlightSearchResult, date: NaiveDate) -> Self {
        Self {
            success: true,
            flight: FlightDto::new(&result.flight, result.estimated_passengers),
            recommendation: RecommendationDto::from(&result.recommendation),
            date,
        }
    }
}

/// Response for GET /api/airports/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportListResponse {
    pub success: bool,
    pub airports: Vec<AirportDto>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Flight store status
    pub store: String,
}
