//! Snapshot cache behavior observed from outside the engine.
//!
//! The store is wrapped in a call-counting adapter so the tests can prove
//! how many times a schedule was actually read: concurrent requests for one
//! (airport, date) share a single estimation pass, fresh results come from
//! cache, and failures are returned but never cached.

use airflow_rust::api::AirportCode;
use airflow_rust::config::EngineConfig;
use airflow_rust::models::{AirportInfo, FlightRecord};
use airflow_rust::services::EstimationEngine;
use airflow_rust::store::{FlightStore, MemoryFlightStore, StoreResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Memory store wrapper that counts schedule reads.
struct CountingStore {
    inner: MemoryFlightStore,
    schedule_reads: AtomicUsize,
}

impl CountingStore {
    fn with_sample_data(date: NaiveDate) -> Self {
        Self {
            inner: MemoryFlightStore::with_sample_data(date),
            schedule_reads: AtomicUsize::new(0),
        }
    }

    fn reads(&self) -> usize {
        self.schedule_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FlightStore for CountingStore {
    async fn list_flights(
        &self,
        airport: &AirportCode,
        date: NaiveDate,
    ) -> StoreResult<Vec<FlightRecord>> {
        self.schedule_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_flights(airport, date).await
    }

    async fn get_airport(&self, airport: &AirportCode) -> StoreResult<AirportInfo> {
        self.inner.get_airport(airport).await
    }

    async fn list_airports(&self) -> StoreResult<Vec<AirportInfo>> {
        self.inner.list_airports().await
    }

    async fn health_check(&self) -> StoreResult<bool> {
        self.inner.health_check().await
    }
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn dub() -> AirportCode {
    AirportCode::parse("DUB").unwrap()
}

fn engine_over(store: &Arc<CountingStore>, config: EngineConfig) -> Arc<EstimationEngine> {
    Arc::new(EstimationEngine::new(
        Arc::clone(store) as Arc<dyn FlightStore>,
        config,
    ))
}

#[tokio::test]
async fn test_concurrent_requests_share_one_computation() {
    let store = Arc::new(CountingStore::with_sample_data(test_date()));
    let engine = engine_over(&store, EngineConfig::default());

    let mut handles = Vec::new();
    for _ in 0..16 {
        let engine = Arc::clone(&engine);
        let airport = dub();
        handles.push(tokio::spawn(async move {
            engine.snapshot(&airport, test_date()).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(store.reads(), 1);
}

#[tokio::test]
async fn test_fresh_snapshot_is_served_from_cache() {
    let store = Arc::new(CountingStore::with_sample_data(test_date()));
    let engine = engine_over(&store, EngineConfig::default());

    let first = engine.snapshot(&dub(), test_date()).await.unwrap();
    let second = engine.snapshot(&dub(), test_date()).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(store.reads(), 1);
}

#[tokio::test]
async fn test_clear_cache_forces_a_new_pass() {
    let store = Arc::new(CountingStore::with_sample_data(test_date()));
    let engine = engine_over(&store, EngineConfig::default());

    let first = engine.snapshot(&dub(), test_date()).await.unwrap();
    engine.clear_cache();
    let second = engine.snapshot(&dub(), test_date()).await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(store.reads(), 2);
}

#[tokio::test]
async fn test_expired_entries_recompute() {
    let store = Arc::new(CountingStore::with_sample_data(test_date()));
    let mut config = EngineConfig::default();
    config.cache.ttl_seconds = 0;
    let engine = engine_over(&store, config);

    engine.snapshot(&dub(), test_date()).await.unwrap();
    engine.snapshot(&dub(), test_date()).await.unwrap();

    assert_eq!(store.reads(), 2);
}

#[tokio::test]
async fn test_store_failure_is_returned_but_not_cached() {
    let store = Arc::new(CountingStore::with_sample_data(test_date()));
    store.inner.set_healthy(false);
    let engine = engine_over(&store, EngineConfig::default());

    let err = engine.snapshot(&dub(), test_date()).await.unwrap_err();
    assert_eq!(err.code(), "DATA_SOURCE");
    assert!(err.is_retryable());

    // Recovery works immediately: the failure was not cached.
    store.inner.set_healthy(true);
    assert!(engine.snapshot(&dub(), test_date()).await.is_ok());

    // The failed pass died at the airport lookup, before any schedule read.
    assert_eq!(store.reads(), 1);
}

#[tokio::test]
async fn test_different_dates_are_separate_entries() {
    let store = Arc::new(CountingStore::with_sample_data(test_date()));
    let engine = engine_over(&store, EngineConfig::default());
    let other_day = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();

    engine.snapshot(&dub(), test_date()).await.unwrap();
    engine.snapshot(&dub(), other_day).await.unwrap();
    assert_eq!(store.reads(), 2);

    // Both stay cached independently.
    engine.snapshot(&dub(), test_date()).await.unwrap();
    engine.snapshot(&dub(), other_day).await.unwrap();
    assert_eq!(store.reads(), 2);
}
