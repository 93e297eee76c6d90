//! Flight data access via the store adapter pattern.
//!
//! The estimation services never talk to a concrete data source; they see the
//! [`FlightStore`] trait and nothing else, so storage backends can be swapped
//! without touching the pipeline.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Services (aggregation, heatmap, cache)     │
//! └──────────────────┬──────────────────────────┘
//!                    │
//! ┌──────────────────▼──────────────────────────┐
//! │  FlightStore trait - read-only interface    │
//! └──────────────────┬──────────────────────────┘
//!                    │
//!     ┌──────────────▼──────────────┐
//!     │     MemoryFlightStore       │
//!     │  (in-memory, seedable)      │
//!     └─────────────────────────────┘
//! ```
//!
//! The store is strictly read-only from the engine's point of view: records
//! are snapshots of a schedule source, and estimation never writes back.

pub mod error;
#[cfg(feature = "memory-store")]
pub mod memory;
#[cfg(feature = "memory-store")]
pub mod seed;

pub use error::{ErrorContext, StoreError, StoreResult};
#[cfg(feature = "memory-store")]
pub use memory::MemoryFlightStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::AirportCode;
use crate::models::{AirportInfo, FlightRecord};

/// Read-only access to airports and flight schedules.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
///
/// # Error contract
/// * An unknown airport is `StoreError::NotFound`.
/// * A known airport with no flights on the requested date is `Ok(vec![])`,
///   never an error.
#[async_trait]
pub trait FlightStore: Send + Sync {
    /// Fetch all departures scheduled at `airport` on `date`.
    async fn list_flights(
        &self,
        airport: &AirportCode,
        date: NaiveDate,
    ) -> StoreResult<Vec<FlightRecord>>;

    /// Fetch metadata for one airport.
    async fn get_airport(&self, airport: &AirportCode) -> StoreResult<AirportInfo>;

    /// List every airport known to the source, sorted by code.
    async fn list_airports(&self) -> StoreResult<Vec<AirportInfo>>;

    /// Check whether the backing source is reachable.
    async fn health_check(&self) -> StoreResult<bool>;
}
