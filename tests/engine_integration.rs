//! End-to-end estimation runs through the engine facade.
//!
//! These tests drive `EstimationEngine` over a seeded `MemoryFlightStore`
//! and assert the semantics of a full pass: curve shape, drop accounting,
//! confidence grading, zone mass conservation and heatmap slicing.

use airflow_rust::api::{AirportCode, FlightNumber, HourWindow};
use airflow_rust::config::EngineConfig;
use airflow_rust::models::{AirportInfo, ConfidenceLevel, FlightRecord, FlightStatus, RouteType};
use airflow_rust::services::EstimationEngine;
use airflow_rust::store::MemoryFlightStore;
use chrono::NaiveDate;
use std::sync::Arc;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn dub() -> AirportCode {
    AirportCode::parse("DUB").unwrap()
}

fn create_dublin() -> AirportInfo {
    AirportInfo {
        code: dub(),
        name: "Dublin Airport".to_string(),
        city: "Dublin".to_string(),
        country: "Ireland".to_string(),
        latitude: 53.4213,
        longitude: -6.2701,
    }
}

fn create_flight(
    number: &str,
    hour: u32,
    minute: u32,
    capacity: i32,
    route_type: RouteType,
) -> FlightRecord {
    FlightRecord {
        flight_number: FlightNumber::parse(number).unwrap(),
        airline: "Test Air".to_string(),
        origin: dub(),
        destination: AirportCode::parse("LHR").unwrap(),
        destination_name: "London Heathrow".to_string(),
        scheduled_departure: test_date().and_hms_opt(hour, minute, 0).unwrap().and_utc(),
        scheduled_arrival: None,
        aircraft_type: None,
        seat_capacity: capacity,
        route_type,
        status: FlightStatus::Scheduled,
    }
}

/// Engine over a store holding exactly the given Dublin departures.
fn engine_for(flights: Vec<FlightRecord>) -> EstimationEngine {
    let store = MemoryFlightStore::new();
    store.insert_airport(create_dublin());
    for flight in flights {
        store.insert_flight(flight);
    }
    EstimationEngine::new(Arc::new(store), EngineConfig::default())
}

/// Engine over the built-in sample schedule.
fn sample_engine() -> EstimationEngine {
    let store = MemoryFlightStore::with_sample_data(test_date());
    EstimationEngine::new(Arc::new(store), EngineConfig::default())
}

// =========================================================
// Curve shape
// =========================================================

#[tokio::test]
async fn test_empty_day_yields_a_zeroed_curve() {
    let engine = engine_for(vec![]);
    let snapshot = engine.snapshot(&dub(), test_date()).await.unwrap();

    assert_eq!(snapshot.predictions.len(), 24);
    for (hour, prediction) in snapshot.predictions.iter().enumerate() {
        assert_eq!(usize::from(prediction.bucket.hour), hour);
        assert_eq!(prediction.bucket.raw_passengers, 0.0);
        assert_eq!(prediction.bucket.flight_count, 0);
        assert_eq!(prediction.confidence.level, ConfidenceLevel::Low);
    }

    assert_eq!(snapshot.summary.total_passengers, 0);
    assert_eq!(snapshot.summary.flights_processed, 0);
    assert_eq!(snapshot.summary.flights_dropped, 0);
    assert_eq!(snapshot.summary.avg_confidence, 0.0);
}

#[tokio::test]
async fn test_domestic_flight_fills_the_three_hours_before_departure() {
    let engine = engine_for(vec![create_flight("EI800", 14, 0, 180, RouteType::Domestic)]);
    let snapshot = engine.snapshot(&dub(), test_date()).await.unwrap();

    let loads: Vec<f64> = snapshot
        .predictions
        .iter()
        .map(|p| p.bucket.raw_passengers)
        .collect();

    // A 180-minute window before a 14:00 departure covers 11:00-13:45.
    for hour in [11, 12, 13] {
        assert!(loads[hour] > 0.0, "hour {} should carry load", hour);
    }
    assert_eq!(loads[10], 0.0);
    assert_eq!(loads[14], 0.0);

    // All estimated passengers land somewhere in the curve.
    let total: f64 = loads.iter().sum();
    assert!((total - 180.0 * 0.84).abs() < 1e-9);
    assert_eq!(snapshot.summary.flights_processed, 1);
}

#[tokio::test]
async fn test_day_total_reconciles_with_rounded_hours() {
    let engine = sample_engine();
    let snapshot = engine.snapshot(&dub(), test_date()).await.unwrap();

    let rounded: Vec<i64> = snapshot
        .predictions
        .iter()
        .map(|p| p.bucket.raw_passengers.round() as i64)
        .collect();

    let total: i64 = rounded.iter().sum();
    assert!(total > 0);
    assert_eq!(snapshot.summary.total_passengers, total);

    let peak = *rounded.iter().max().unwrap();
    assert_eq!(snapshot.summary.peak_passengers, peak);
    assert_eq!(rounded[usize::from(snapshot.summary.peak_hour)], peak);
}

// =========================================================
// Drop accounting
// =========================================================

#[tokio::test]
async fn test_cancelled_flights_stay_on_the_board_but_add_nothing() {
    let mut cancelled = create_flight("EI801", 18, 0, 180, RouteType::International);
    cancelled.status = FlightStatus::Cancelled;

    let engine = engine_for(vec![
        create_flight("EI800", 9, 0, 120, RouteType::Domestic),
        cancelled,
    ]);
    let snapshot = engine.snapshot(&dub(), test_date()).await.unwrap();

    // A cancellation is not a data problem, so it is neither processed
    // nor counted as dropped.
    assert_eq!(snapshot.summary.flights_processed, 1);
    assert_eq!(snapshot.summary.flights_dropped, 0);

    // The record is still part of the day's schedule for lookups.
    assert_eq!(snapshot.flights.len(), 2);

    // Its would-be arrival window (14:00-17:45) stays empty.
    for hour in 14..=17 {
        assert_eq!(snapshot.predictions[hour].bucket.raw_passengers, 0.0);
    }
}

#[tokio::test]
async fn test_zero_capacity_flight_is_dropped() {
    let engine = engine_for(vec![create_flight("EI802", 10, 0, 0, RouteType::Domestic)]);
    let snapshot = engine.snapshot(&dub(), test_date()).await.unwrap();

    assert_eq!(snapshot.summary.flights_processed, 0);
    assert_eq!(snapshot.summary.flights_dropped, 1);
    assert_eq!(snapshot.summary.total_passengers, 0);
}

// =========================================================
// Confidence grading
// =========================================================

#[tokio::test]
async fn test_dense_hours_reach_high_confidence() {
    let mut flights: Vec<FlightRecord> = (0..10)
        .map(|i| create_flight(&format!("TT{}", 100 + i), 12, 0, 150, RouteType::Domestic))
        .collect();
    flights.push(create_flight("TT900", 23, 0, 150, RouteType::Domestic));

    let engine = engine_for(flights);
    let snapshot = engine.snapshot(&dub(), test_date()).await.unwrap();

    // Ten overlapping rotations saturate the confidence score.
    for hour in [9, 10, 11] {
        let prediction = &snapshot.predictions[hour];
        assert_eq!(prediction.bucket.flight_count, 10);
        assert_eq!(prediction.confidence.value, 1.0);
        assert_eq!(prediction.confidence.level, ConfidenceLevel::High);
    }

    // The lone evening rotation stays low-confidence.
    let evening = &snapshot.predictions[20];
    assert_eq!(evening.bucket.flight_count, 1);
    assert_eq!(evening.confidence.level, ConfidenceLevel::Low);
}

// =========================================================
// Zone distribution and heatmap
// =========================================================

#[tokio::test]
async fn test_zone_loads_conserve_each_hours_mass() {
    let engine = sample_engine();
    let snapshot = engine.snapshot(&dub(), test_date()).await.unwrap();

    assert_eq!(snapshot.zone_loads.len(), 24);
    for (hour, loads) in snapshot.zone_loads.iter().enumerate() {
        assert_eq!(loads.len(), snapshot.zones.len());
        let distributed: f64 = loads.iter().sum();
        let raw = snapshot.predictions[hour].bucket.raw_passengers;
        assert!(
            (distributed - raw).abs() < 1e-6,
            "hour {}: distributed {} vs aggregated {}",
            hour,
            distributed,
            raw
        );
    }
}

#[tokio::test]
async fn test_quiet_window_produces_no_heatmap_points() {
    let engine = sample_engine();

    // No sample departure has an arrival window reaching back past 02:30.
    let quiet = engine
        .heatmap(&dub(), test_date(), Some(HourWindow::new(0, 1).unwrap()))
        .await
        .unwrap();
    assert!(quiet.points.is_empty());

    let busy = engine
        .heatmap(&dub(), test_date(), Some(HourWindow::new(6, 10).unwrap()))
        .await
        .unwrap();
    assert!(!busy.points.is_empty());
    for point in &busy.points {
        assert!((0.0..=1.0).contains(&point.intensity));
    }
}

// =========================================================
// Schedule lookups
// =========================================================

#[tokio::test]
async fn test_snapshot_keeps_the_whole_board() {
    let engine = sample_engine();
    let snapshot = engine.snapshot(&dub(), test_date()).await.unwrap();

    assert_eq!(snapshot.flights.len(), 35);
    assert!(snapshot
        .flights
        .iter()
        .any(|f| f.status == FlightStatus::Cancelled));
}

#[tokio::test]
async fn test_cancelled_flight_is_still_searchable() {
    let engine = sample_engine();
    let number = FlightNumber::parse("EI131").unwrap();

    let result = engine
        .flight_search(&dub(), test_date(), &number)
        .await
        .unwrap();
    assert_eq!(result.flight.status, FlightStatus::Cancelled);
    assert!(result.estimated_passengers > 0);
}
