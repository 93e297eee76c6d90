//! HTTP handlers for the REST API.
//!
//! Each handler parses and validates its query parameters, delegates to the
//! estimation engine and wraps the result in a response envelope. Validation
//! failures never reach the engine.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};

use super::dto::{
    AirportDto, AirportListResponse, FlightSearchQuery, FlightSearchResponse, HealthResponse,
    HeatmapQuery, HeatmapResponse, HourlyPredictionsResponse, PredictionsQuery,
};
use super::state::AppState;
use crate::api::{AirportCode, FlightNumber, HourWindow};
use crate::error::{EngineError, EngineResult};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, EngineError>;

/// Airport assumed when a query names none.
const DEFAULT_AIRPORT: &str = "DUB";

fn parse_airport(raw: Option<&str>) -> EngineResult<AirportCode> {
    AirportCode::parse(raw.unwrap_or(DEFAULT_AIRPORT))
        .map_err(|e| EngineError::invalid_input(e))
}

/// Parse a YYYY-MM-DD date, defaulting to tomorrow.
fn parse_date(raw: Option<&str>) -> EngineResult<NaiveDate> {
    match raw {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            EngineError::invalid_input(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
        None => Ok(Utc::now().date_naive() + Duration::days(1)),
    }
}

fn parse_window(from_hour: Option<u8>, to_hour: Option<u8>) -> EngineResult<HourWindow> {
    HourWindow::new(from_hour.unwrap_or(0), to_hour.unwrap_or(23))
        .map_err(|e| EngineError::invalid_input(e))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the flight
/// store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store_status = match state.engine.health().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store_status,
    }))
}

// =============================================================================
// Predictions
// =============================================================================

/// GET /api/predictions/hourly/
///
/// The 24-hour passenger curve for one airport and date, with per-hour
/// confidence and a day summary.
pub async fn hourly_predictions(
    State(state): State<AppState>,
    Query(query): Query<PredictionsQuery>,
) -> HandlerResult<HourlyPredictionsResponse> {
    let airport = parse_airport(query.airport.as_deref())?;
    let date = parse_date(query.date.as_deref())?;

    let snapshot = state.engine.snapshot(&airport, date).await?;
    Ok(Json(HourlyPredictionsResponse::from_snapshot(&snapshot)))
}

/// GET /api/heatmap/
///
/// Terminal heatmap points, optionally restricted to an hour window of the
/// day.
pub async fn heatmap(
    State(state): State<AppState>,
    Query(query): Query<HeatmapQuery>,
) -> HandlerResult<HeatmapResponse> {
    let airport = parse_airport(query.airport.as_deref())?;
    let date = parse_date(query.date.as_deref())?;
    let window = parse_window(query.from_hour, query.to_hour)?;

    let view = state.engine.heatmap(&airport, date, Some(window)).await?;
    Ok(Json(HeatmapResponse::from_view(&view)))
}

// =============================================================================
// Flights
// =============================================================================

/// GET /api/flights/search/
///
/// Look up one flight of the day and compute arrival guidance for it.
pub async fn flight_search(
    State(state): State<AppState>,
    Query(query): Query<FlightSearchQuery>,
) -> HandlerResult<FlightSearchResponse> {
    let raw_number = query
        .flight_number
        .as_deref()
        .ok_or_else(|| EngineError::invalid_input("flight_number query parameter is required"))?;
    let flight_number =
        FlightNumber::parse(raw_number).map_err(|e| EngineError::invalid_input(e))?;
    let airport = parse_airport(query.airport.as_deref())?;
    let date = parse_date(query.date.as_deref())?;

    let result = state
        .engine
        .flight_search(&airport, date, &flight_number)
        .await?;
    Ok(Json(FlightSearchResponse::from_result(&result, date)))
}

// =============================================================================
// Airports
// =============================================================================

/// GET /api/airports/
///
/// All airports known to the flight store, sorted by code.
pub async fn list_airports(State(state): State<AppState>) -> HandlerResult<AirportListResponse> {
    let airports = state.engine.list_airports().await?;
    let airports: Vec<AirportDto> = airports.iter().map(AirportDto::from).collect();

    Ok(Json(AirportListResponse {
        success: true,
        total: airports.len(),
        airports,
    }))
}

#[cfg(test)]
mod tests {
    use super::{parse_airport, parse_date, parse_window};

    #[test]
    fn test_parse_airport_defaults_to_dublin() {
        assert_eq!(parse_airport(None).unwrap().as_str(), "DUB");
        assert_eq!(parse_airport(Some("lhr")).unwrap().as_str(), "LHR");
        assert!(parse_airport(Some("DUBX")).is_err());
    }

    #[test]
    fn test_parse_date_accepts_iso_and_rejects_garbage() {
        let date = parse_date(Some("2025-06-15")).unwrap();
        assert_eq!(date.to_string(), "2025-06-15");
        assert!(parse_date(Some("15/06/2025")).is_err());
        assert!(parse_date(Some("not-a-date")).is_err());
    }

    #[test]
    fn test_parse_date_defaults_to_tomorrow() {
        let date = parse_date(None).unwrap();
        let today = chrono::Utc::now().date_naive();
        assert_eq!(date, today + chrono::Duration::days(1));
    }

    #[test]
    fn test_parse_window_defaults_and_bounds() {
        let window = parse_window(None, None).unwrap();
        assert_eq!((window.from_hour, window.to_hour), (0, 23));

        let window = parse_window(Some(6), Some(9)).unwrap();
        assert_eq!((window.from_hour, window.to_hour), (6, 9));

        assert!(parse_window(Some(12), Some(9)).is_err());
        assert!(parse_window(Some(24), None).is_err());
    }
}
