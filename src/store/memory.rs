//! In-memory flight store implementation.
//!
//! Suitable for demos, local development and tests. All data lives in
//! HashMaps behind a `parking_lot::RwLock`, giving fast, deterministic and
//! isolated execution. The store can start empty, be seeded with the built-in
//! Dublin schedule, or be loaded from a JSON fixture file.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::error::{ErrorContext, StoreError, StoreResult};
use super::FlightStore;
use crate::api::AirportCode;
use crate::models::{AirportInfo, FlightRecord};

/// In-memory flight store.
///
/// Cloning is cheap and clones share the same underlying data.
#[derive(Clone)]
pub struct MemoryFlightStore {
    data: Arc<RwLock<StoreData>>,
}

struct StoreData {
    airports: HashMap<AirportCode, AirportInfo>,
    /// Departures keyed by (origin airport, local departure date).
    flights: HashMap<(AirportCode, NaiveDate), Vec<FlightRecord>>,
    /// Connection health, toggled by tests to simulate outages.
    is_healthy: bool,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            airports: HashMap::new(),
            flights: HashMap::new(),
            is_healthy: true,
        }
    }
}

/// On-disk fixture layout for [`MemoryFlightStore::from_json_file`].
#[derive(Debug, Deserialize)]
struct FixtureFile {
    airports: Vec<AirportInfo>,
    flights: Vec<FlightRecord>,
}

impl MemoryFlightStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(StoreData::default())),
        }
    }

    /// Create a store pre-loaded with the built-in Dublin schedule for
    /// `date` (plus the destination airports it references).
    pub fn with_sample_data(date: NaiveDate) -> Self {
        let store = Self::new();
        for airport in super::seed::sample_airports() {
            store.insert_airport(airport);
        }
        for record in super::seed::dublin_departures(date) {
            store.insert_flight(record);
        }
        store
    }

    /// Load airports and flights from a JSON fixture file.
    ///
    /// The file holds one object with `airports` and `flights` arrays using
    /// the serde layouts of [`AirportInfo`] and [`FlightRecord`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            StoreError::unavailable_with_context(
                format!("Failed to read fixture file: {}", e),
                ErrorContext::new("from_json_file")
                    .with_details(path.as_ref().display().to_string()),
            )
        })?;

        let fixture: FixtureFile = serde_json::from_str(&content).map_err(|e| {
            StoreError::malformed_with_context(
                format!("Failed to parse fixture file: {}", e),
                ErrorContext::new("from_json_file")
                    .with_details(path.as_ref().display().to_string()),
            )
        })?;

        let store = Self::new();
        for airport in fixture.airports {
            store.insert_airport(airport);
        }
        for record in fixture.flights {
            store.insert_flight(record);
        }
        Ok(store)
    }

    /// Register an airport, replacing any previous entry with the same code.
    pub fn insert_airport(&self, airport: AirportInfo) {
        let mut data = self.data.write();
        data.airports.insert(airport.code.clone(), airport);
    }

    /// Add a departure. The record is indexed under its origin airport and
    /// the date of its scheduled departure.
    pub fn insert_flight(&self, record: FlightRecord) {
        let key = (
            record.origin.clone(),
            record.scheduled_departure.date_naive(),
        );
        let mut data = self.data.write();
        data.flights.entry(key).or_default().push(record);
    }

    /// Simulate the backing source going down (or coming back).
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Remove all airports and flights.
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.airports.clear();
        data.flights.clear();
    }

    fn ensure_healthy(&self, operation: &str) -> StoreResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(StoreError::unavailable_with_context(
                "flight store is offline",
                ErrorContext::new(operation),
            ))
        }
    }
}

impl Default for MemoryFlightStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlightStore for MemoryFlightStore {
    async fn list_flights(
        &self,
        airport: &AirportCode,
        date: NaiveDate,
    ) -> StoreResult<Vec<FlightRecord>> {
        self.ensure_healthy("list_flights")?;
        let data = self.data.read();

        if !data.airports.contains_key(airport) {
            return Err(StoreError::not_found_with_context(
                format!("Airport '{}' not found", airport),
                ErrorContext::new("list_flights")
                    .with_entity("airport")
                    .with_entity_id(airport),
            ));
        }

        Ok(data
            .flights
            .get(&(airport.clone(), date))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_airport(&self, airport: &AirportCode) -> StoreResult<AirportInfo> {
        self.ensure_healthy("get_airport")?;
        let data = self.data.read();

        data.airports.get(airport).cloned().ok_or_else(|| {
            StoreError::not_found_with_context(
                format!("Airport '{}' not found", airport),
                ErrorContext::new("get_airport")
                    .with_entity("airport")
                    .with_entity_id(airport),
            )
        })
    }

    async fn list_airports(&self) -> StoreResult<Vec<AirportInfo>> {
        self.ensure_healthy("list_airports")?;
        let data = self.data.read();

        let mut airports: Vec<AirportInfo> = data.airports.values().cloned().collect();
        airports.sort_by(|a, b| a.code.as_str().cmp(b.code.as_str()));
        Ok(airports)
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryFlightStore;
    use crate::api::{AirportCode, FlightNumber};
    use crate::models::{AirportInfo, FlightRecord, FlightStatus, RouteType};
    use crate::store::{FlightStore, StoreError};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn dub() -> AirportCode {
        AirportCode::parse("DUB").unwrap()
    }

    fn create_test_airport() -> AirportInfo {
        AirportInfo {
            code: dub(),
            name: "Dublin Airport".to_string(),
            city: "Dublin".to_string(),
            country: "Ireland".to_string(),
            latitude: 53.4213,
            longitude: -6.2701,
        }
    }

    fn create_test_flight(number: &str, hour: u32) -> FlightRecord {
        FlightRecord {
            flight_number: FlightNumber::parse(number).unwrap(),
            airline: "Aer Lingus".to_string(),
            origin: dub(),
            destination: AirportCode::parse("LHR").unwrap(),
            destination_name: "London Heathrow".to_string(),
            scheduled_departure: Utc.with_ymd_and_hms(2025, 6, 15, hour, 0, 0).unwrap(),
            scheduled_arrival: None,
            aircraft_type: Some("A320".to_string()),
            seat_capacity: 180,
            route_type: RouteType::International,
            status: FlightStatus::Scheduled,
        }
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_airport_is_not_found() {
        let store = MemoryFlightStore::new();
        let err = store.list_flights(&dub(), test_date()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_known_airport_without_flights_returns_empty() {
        let store = MemoryFlightStore::new();
        store.insert_airport(create_test_airport());
        let flights = store.list_flights(&dub(), test_date()).await.unwrap();
        assert!(flights.is_empty());
    }

    #[tokio::test]
    async fn test_flights_are_indexed_by_departure_date() {
        let store = MemoryFlightStore::new();
        store.insert_airport(create_test_airport());
        store.insert_flight(create_test_flight("EI101", 6));
        store.insert_flight(create_test_flight("EI103", 9));

        let flights = store.list_flights(&dub(), test_date()).await.unwrap();
        assert_eq!(flights.len(), 2);

        let other_day = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        let flights = store.list_flights(&dub(), other_day).await.unwrap();
        assert!(flights.is_empty());
    }

    #[tokio::test]
    async fn test_unhealthy_store_reports_unavailable() {
        let store = MemoryFlightStore::new();
        store.insert_airport(create_test_airport());
        store.set_healthy(false);

        let err = store.list_flights(&dub(), test_date()).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
        assert!(err.is_retryable());

        store.set_healthy(true);
        assert!(store.list_flights(&dub(), test_date()).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_airports_sorted_by_code() {
        let store = MemoryFlightStore::new();
        let mut lhr = create_test_airport();
        lhr.code = AirportCode::parse("LHR").unwrap();
        store.insert_airport(lhr);
        store.insert_airport(create_test_airport());

        let airports = store.list_airports().await.unwrap();
        let codes: Vec<&str> = airports.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["DUB", "LHR"]);
    }

    #[tokio::test]
    async fn test_sample_data_has_dublin_schedule() {
        let store = MemoryFlightStore::with_sample_data(test_date());
        let airport = store.get_airport(&dub()).await.unwrap();
        assert_eq!(airport.city, "Dublin");

        let flights = store.list_flights(&dub(), test_date()).await.unwrap();
        assert!(flights.len() > 20);
        // Deterministic: seeding twice yields the same schedule.
        let again = MemoryFlightStore::with_sample_data(test_date());
        let flights_again = again.list_flights(&dub(), test_date()).await.unwrap();
        assert_eq!(flights.len(), flights_again.len());
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = MemoryFlightStore::with_sample_data(test_date());
        store.clear();
        assert!(store.list_airports().await.unwrap().is_empty());
    }
}
