//! Confidence scoring for hourly estimates.
//!
//! Confidence grows linearly with the number of flights behind a bucket and
//! saturates at 1.0. The score is descriptive only; it never gates or
//! rescales the passenger estimate itself.

use crate::config::EstimationSettings;
use crate::models::{ConfidenceLevel, ConfidenceScore};

/// Scores at or above this are reported as high confidence.
pub const HIGH_THRESHOLD: f64 = 0.8;
/// Scores at or above this (and below [`HIGH_THRESHOLD`]) are medium.
pub const MEDIUM_THRESHOLD: f64 = 0.5;

/// Score one bucket from the number of flights contributing to it.
pub fn score(flight_count: usize, settings: &EstimationSettings) -> ConfidenceScore {
    let saturation = settings.confidence_saturation_flights as f64;
    let value = (flight_count as f64 / saturation).min(1.0);
    ConfidenceScore {
        value,
        level: level_for(value),
    }
}

/// Map a numeric score onto its reporting level.
pub fn level_for(value: f64) -> ConfidenceLevel {
    if value >= HIGH_THRESHOLD {
        ConfidenceLevel::High
    } else if value >= MEDIUM_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}
