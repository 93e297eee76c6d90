//! Application state for the HTTP server.

use crate::services::EstimationEngine;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The estimation engine, shared across requests
    pub engine: Arc<EstimationEngine>,
}

impl AppState {
    /// Create a new application state around an engine.
    pub fn new(engine: Arc<EstimationEngine>) -> Self {
        Self { engine }
    }
}
