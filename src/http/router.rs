//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, compression,
//! tracing) and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Trailing slashes are part of the published paths.
    let api = Router::new()
        .route("/predictions/hourly/", get(handlers::hourly_predictions))
        .route("/heatmap/", get(handlers::heatmap))
        .route("/flights/search/", get(handlers::flight_search))
        .route("/airports/", get(handlers::list_airports));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(all(test, feature = "memory-store"))]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::services::EstimationEngine;
    use crate::store::MemoryFlightStore;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let store = Arc::new(MemoryFlightStore::new());
        let engine = Arc::new(EstimationEngine::new(store, EngineConfig::default()));
        let state = AppState::new(engine);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
