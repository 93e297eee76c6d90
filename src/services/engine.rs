//! The estimation engine facade.
//!
//! [`EstimationEngine`] wires the pipeline together: read the day's schedule
//! once, aggregate it into hourly buckets, score each bucket's confidence,
//! distribute the load over the airport's zones and summarize the day. The
//! whole pass produces one immutable [`PredictionSnapshot`] per (airport,
//! date), computed at most once concurrently and cached; every read
//! operation is a cheap view over that snapshot.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::api::{AirportCode, FlightNumber, HourWindow};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AirportInfo, ArrivalRecommendation, DaySummary, FlightRecord, HeatmapPoint, HourlyPrediction,
    PredictionSnapshot, ZoneCatalog,
};
use crate::services::cache::SnapshotCache;
use crate::services::{aggregator, confidence, heatmap, recommendation};
use crate::store::{FlightStore, StoreError};

/// One heatmap read: the points of an hour window plus its provenance.
#[derive(Debug, Clone)]
pub struct HeatmapView {
    pub airport: AirportInfo,
    pub date: NaiveDate,
    pub window: HourWindow,
    pub points: Vec<HeatmapPoint>,
    pub computed_at: DateTime<Utc>,
}

/// Result of a flight lookup: the record plus arrival guidance.
#[derive(Debug, Clone)]
pub struct FlightSearchResult {
    pub flight: FlightRecord,
    /// Expected passengers on board after applying the route's load factor.
    pub estimated_passengers: i64,
    pub recommendation: ArrivalRecommendation,
}

/// Passenger flow estimation over a pluggable flight store.
pub struct EstimationEngine {
    store: Arc<dyn FlightStore>,
    config: EngineConfig,
    zones: ZoneCatalog,
    cache: SnapshotCache,
}

impl EstimationEngine {
    /// Engine with the built-in zone layouts.
    pub fn new(store: Arc<dyn FlightStore>, config: EngineConfig) -> Self {
        Self::with_zone_catalog(store, config, ZoneCatalog::with_builtin_layouts())
    }

    pub fn with_zone_catalog(
        store: Arc<dyn FlightStore>,
        config: EngineConfig,
        zones: ZoneCatalog,
    ) -> Self {
        let cache = SnapshotCache::new(config.cache.clone());
        Self {
            store,
            config,
            zones,
            cache,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Full estimation result for (airport, date).
    ///
    /// Served from cache while fresh; otherwise computed exactly once no
    /// matter how many requests arrive at the same time. Failures are
    /// returned to every current waiter and never cached.
    pub async fn snapshot(
        &self,
        airport: &AirportCode,
        date: NaiveDate,
    ) -> EngineResult<Arc<PredictionSnapshot>> {
        let key = (airport.clone(), date);
        let store = Arc::clone(&self.store);
        let config = self.config.clone();
        let zones = self.zones.clone();
        let airport = airport.clone();
        self.cache
            .get_or_compute(key, move || {
                compute_snapshot(store, config, zones, airport, date)
            })
            .await
    }

    /// Heatmap points for an optional hour window (defaults to the whole
    /// day). Window slicing happens at read time on the cached snapshot.
    pub async fn heatmap(
        &self,
        airport: &AirportCode,
        date: NaiveDate,
        window: Option<HourWindow>,
    ) -> EngineResult<HeatmapView> {
        let snapshot = self.snapshot(airport, date).await?;
        let window = window.unwrap_or_else(HourWindow::full_day);
        let points = heatmap::slice_window(&snapshot, window);
        Ok(HeatmapView {
            airport: snapshot.airport.clone(),
            date,
            window,
            points,
            computed_at: snapshot.computed_at,
        })
    }

    /// Look up one flight of the day and derive arrival guidance for it.
    pub async fn flight_search(
        &self,
        airport: &AirportCode,
        date: NaiveDate,
        flight_number: &FlightNumber,
    ) -> EngineResult<FlightSearchResult> {
        let snapshot = self.snapshot(airport, date).await?;
        let flight = snapshot
            .flights
            .iter()
            .find(|f| &f.flight_number == flight_number)
            .cloned()
            .ok_or_else(|| {
                EngineError::not_found(format!(
                    "Flight {} not found departing {} on {}",
                    flight_number, airport, date
                ))
            })?;

        let estimated_passengers = (f64::from(flight.seat_capacity)
            * self.config.estimation.load_factor(flight.route_type))
        .round() as i64;
        let recommendation =
            recommendation::recommend(&flight, &snapshot, &self.config.recommendation);

        Ok(FlightSearchResult {
            flight,
            estimated_passengers,
            recommendation,
        })
    }

    pub async fn list_airports(&self) -> EngineResult<Vec<AirportInfo>> {
        Ok(self.store.list_airports().await?)
    }

    /// Readiness of the engine's data source.
    pub async fn health(&self) -> EngineResult<bool> {
        Ok(self.store.health_check().await?)
    }

    /// Drop all cached snapshots; the next request recomputes.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// One full estimation pass. Runs detached under the cache, so it owns its
/// inputs.
async fn compute_snapshot(
    store: Arc<dyn FlightStore>,
    config: EngineConfig,
    zones: ZoneCatalog,
    airport: AirportCode,
    date: NaiveDate,
) -> EngineResult<PredictionSnapshot> {
    let airport_info = match store.get_airport(&airport).await {
        Ok(info) => info,
        Err(StoreError::NotFound { .. }) => {
            return Err(unknown_airport(&store, &airport).await);
        }
        Err(other) => return Err(other.into()),
    };

    let flights = store.list_flights(&airport, date).await?;
    let aggregation = aggregator::aggregate(&flights, date, &config.estimation);

    let predictions: Vec<HourlyPrediction> = aggregation
        .buckets
        .iter()
        .map(|bucket| HourlyPrediction {
            bucket: bucket.clone(),
            confidence: confidence::score(bucket.flight_count, &config.estimation),
        })
        .collect();

    let layout = zones.layout_for(&airport_info);
    let zone_loads: Vec<Vec<f64>> = aggregation
        .buckets
        .iter()
        .map(|bucket| heatmap::distribute_hour(bucket, &layout, &config.zones))
        .collect();

    let summary = summarize(
        &predictions,
        aggregation.flights_processed,
        aggregation.flights_dropped,
    );

    Ok(PredictionSnapshot {
        airport: airport_info,
        date,
        predictions,
        zones: layout.zones,
        zone_loads,
        flights,
        summary,
        computed_at: Utc::now(),
    })
}

/// Not-found error for an airport, decorated with the known codes when the
/// store can still list them.
async fn unknown_airport(store: &Arc<dyn FlightStore>, airport: &AirportCode) -> EngineError {
    let message = format!("Unknown airport {}", airport);
    match store.list_airports().await {
        Ok(airports) => {
            let codes: Vec<String> = airports
                .iter()
                .map(|a| a.code.as_str().to_string())
                .collect();
            EngineError::not_found_with_details(
                message,
                serde_json::json!({ "available_airports": codes }),
            )
        }
        Err(_) => EngineError::not_found(message),
    }
}

/// Day statistics over the scored hours.
///
/// The total sums the per-hour figures after rounding each hour to whole
/// passengers, so it reconciles exactly with the serialized payload. Average
/// confidence covers only hours that carry passengers.
fn summarize(
    predictions: &[HourlyPrediction],
    flights_processed: usize,
    flights_dropped: usize,
) -> DaySummary {
    let mut total_passengers = 0i64;
    let mut peak_hour = 0u8;
    let mut peak_passengers = 0i64;
    let mut confidence_sum = 0.0;
    let mut busy_hours = 0usize;

    for prediction in predictions {
        let rounded = prediction.bucket.raw_passengers.round() as i64;
        total_passengers += rounded;
        if rounded > peak_passengers {
            peak_passengers = rounded;
            peak_hour = prediction.bucket.hour;
        }
        if prediction.bucket.raw_passengers > 0.0 {
            confidence_sum += prediction.confidence.value;
            busy_hours += 1;
        }
    }

    let avg_confidence = if busy_hours == 0 {
        0.0
    } else {
        (confidence_sum / busy_hours as f64 * 100.0).round() / 100.0
    };

    DaySummary {
        total_passengers,
        peak_hour,
        peak_passengers,
        flights_processed,
        flights_dropped,
        avg_confidence,
    }
}


#[cfg(all(test, feature = "memory-store"))]
mod engine_tests {
    use super::EstimationEngine;
    use crate::api::{AirportCode, FlightNumber};
    use crate::config::EngineConfig;
    use crate::error::EngineError;
    use crate::store::MemoryFlightStore;
    use chrono::{Duration, NaiveDate};
    use std::sync::Arc;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn sample_engine() -> EstimationEngine {
        let store = MemoryFlightStore::with_sample_data(test_date());
        EstimationEngine::new(Arc::new(store), EngineConfig::default())
    }

    #[tokio::test]
    async fn test_snapshot_is_shared_between_calls() {
        let engine = sample_engine();
        let dub = AirportCode::parse("DUB").unwrap();

        let first = engine.snapshot(&dub, test_date()).await.unwrap();
        let second = engine.snapshot(&dub, test_date()).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_unknown_airport_lists_alternatives() {
        let engine = sample_engine();
        let missing = AirportCode::parse("ZZZ").unwrap();

        let err = engine.snapshot(&missing, test_date()).await.unwrap_err();
        match err {
            EngineError::NotFound {
                details: Some(details),
                ..
            } => {
                let codes = details["available_airports"].as_array().unwrap();
                assert!(codes.iter().any(|c| c.as_str() == Some("DUB")));
            }
            other => panic!("expected decorated not-found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_flight_search_returns_guidance() {
        let engine = sample_engine();
        let dub = AirportCode::parse("DUB").unwrap();
        let number = FlightNumber::parse("EI101").unwrap();

        let result = engine
            .flight_search(&dub, test_date(), &number)
            .await
            .unwrap();
        assert_eq!(result.flight.flight_number, number);
        assert!(result.estimated_passengers > 0);

        // The recommendation always leaves the route's security buffer.
        let buffer = Duration::minutes(i64::from(
            engine
                .config()
                .recommendation
                .buffer_minutes(result.flight.route_type),
        ));
        assert!(
            result.recommendation.optimal_arrival + buffer
                <= result.flight.scheduled_departure
        );
    }

    #[tokio::test]
    async fn test_flight_search_unknown_number_is_not_found() {
        let engine = sample_engine();
        let dub = AirportCode::parse("DUB").unwrap();
        let number = FlightNumber::parse("ZZ999").unwrap();

        let err = engine
            .flight_search(&dub, test_date(), &number)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_heatmap_defaults_to_full_day() {
        let engine = sample_engine();
        let dub = AirportCode::parse("DUB").unwrap();

        let view = engine.heatmap(&dub, test_date(), None).await.unwrap();
        assert_eq!(view.window.len(), 24);
        assert!(!view.points.is_empty());
        for point in &view.points {
            assert!((0.0..=1.0).contains(&point.intensity));
        }
    }

    #[tokio::test]
    async fn test_health_reflects_store() {
        let engine = sample_engine();
        assert!(engine.health().await.unwrap());
    }
}
