//! Engine configuration file support.
//!
//! All business parameters of the estimation pipeline live here with
//! documented defaults: load factors, arrival-window shape, confidence
//! saturation, recommendation buffers and cache timing. Deployments can tune
//! them from a TOML file and tests can pin exact values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{LeadBand, RouteType, ZoneKind};

/// Error raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(String),
    #[error("Failed to parse config file: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub estimation: EstimationSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub zones: ZoneSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Schedule aggregation and confidence parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationSettings {
    /// Seat occupancy applied to domestic flights (IATA 2024 average).
    #[serde(default = "default_domestic_load_factor")]
    pub domestic_load_factor: f64,
    /// Seat occupancy applied to international flights.
    #[serde(default = "default_international_load_factor")]
    pub international_load_factor: f64,
    /// Passengers for a domestic flight arrive within this many minutes
    /// before departure.
    #[serde(default = "default_domestic_window_minutes")]
    pub domestic_window_minutes: u32,
    /// Passengers for an international flight arrive within this many
    /// minutes before departure (longer for extra screening).
    #[serde(default = "default_international_window_minutes")]
    pub international_window_minutes: u32,
    /// Width of the discretization slots inside an arrival window. Must
    /// divide 60 and every window length.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// Where the arrival bulge sits along the window, 0.0 = at its earliest
    /// edge, 1.0 = at the boarding cutoff.
    #[serde(default = "default_arrival_peak_position")]
    pub arrival_peak_position: f64,
    /// Flight count at which an hourly estimate reaches full confidence.
    #[serde(default = "default_confidence_saturation")]
    pub confidence_saturation_flights: u32,
}

/// Arrival recommendation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSettings {
    /// Minimum minutes between arrival and a domestic departure.
    #[serde(default = "default_domestic_buffer_minutes")]
    pub domestic_buffer_minutes: u32,
    /// Minimum minutes between arrival and an international departure.
    #[serde(default = "default_international_buffer_minutes")]
    pub international_buffer_minutes: u32,
    /// Earliest arrival considered, in minutes before departure.
    #[serde(default = "default_search_window_minutes")]
    pub search_window_minutes: u32,
    /// The "usual" arrival the recommendation is compared against, in
    /// minutes before departure.
    #[serde(default = "default_baseline_lead_minutes")]
    pub baseline_lead_minutes: u32,
    /// Queue time at full congestion; scales congestion deltas into saved
    /// minutes.
    #[serde(default = "default_max_security_wait_minutes")]
    pub max_security_wait_minutes: u32,
}

/// How each lead band's passengers split across the terminal zone kinds.
///
/// Each array holds the `[early, mid, late]` shares for one zone kind; the
/// shares of any single band must sum to 1.0 across the five kinds.
/// Passengers far from departure sit at check-in and landside retail, those
/// close to it have moved through security to the gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSettings {
    #[serde(default = "default_check_in_shares")]
    pub check_in_shares: [f64; LeadBand::COUNT],
    #[serde(default = "default_security_shares")]
    pub security_shares: [f64; LeadBand::COUNT],
    #[serde(default = "default_gates_shares")]
    pub gates_shares: [f64; LeadBand::COUNT],
    #[serde(default = "default_retail_shares")]
    pub retail_shares: [f64; LeadBand::COUNT],
    #[serde(default = "default_food_shares")]
    pub food_shares: [f64; LeadBand::COUNT],
}

/// Result cache timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// How long a computed snapshot stays fresh.
    #[serde(default = "default_cache_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Per-waiter deadline for an in-flight computation.
    #[serde(default = "default_compute_timeout_seconds")]
    pub compute_timeout_seconds: u64,
}

fn default_domestic_load_factor() -> f64 {
    0.84
}

fn default_international_load_factor() -> f64 {
    0.82
}

fn default_domestic_window_minutes() -> u32 {
    180
}

fn default_international_window_minutes() -> u32 {
    240
}

fn default_slot_minutes() -> u32 {
    15
}

fn default_arrival_peak_position() -> f64 {
    0.6
}

fn default_confidence_saturation() -> u32 {
    10
}

fn default_domestic_buffer_minutes() -> u32 {
    60
}

fn default_international_buffer_minutes() -> u32 {
    120
}

fn default_search_window_minutes() -> u32 {
    240
}

fn default_baseline_lead_minutes() -> u32 {
    120
}

fn default_max_security_wait_minutes() -> u32 {
    45
}

fn default_check_in_shares() -> [f64; LeadBand::COUNT] {
    [0.45, 0.20, 0.05]
}

fn default_security_shares() -> [f64; LeadBand::COUNT] {
    [0.20, 0.35, 0.15]
}

fn default_gates_shares() -> [f64; LeadBand::COUNT] {
    [0.10, 0.20, 0.70]
}

fn default_retail_shares() -> [f64; LeadBand::COUNT] {
    [0.10, 0.15, 0.05]
}

fn default_food_shares() -> [f64; LeadBand::COUNT] {
    [0.15, 0.10, 0.05]
}

fn default_cache_ttl_seconds() -> u64 {
    300
}

fn default_compute_timeout_seconds() -> u64 {
    10
}

impl Default for EstimationSettings {
    fn default() -> Self {
        Self {
            domestic_load_factor: default_domestic_load_factor(),
            international_load_factor: default_international_load_factor(),
            domestic_window_minutes: default_domestic_window_minutes(),
            international_window_minutes: default_international_window_minutes(),
            slot_minutes: default_slot_minutes(),
            arrival_peak_position: default_arrival_peak_position(),
            confidence_saturation_flights: default_confidence_saturation(),
        }
    }
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            domestic_buffer_minutes: default_domestic_buffer_minutes(),
            international_buffer_minutes: default_international_buffer_minutes(),
            search_window_minutes: default_search_window_minutes(),
            baseline_lead_minutes: default_baseline_lead_minutes(),
            max_security_wait_minutes: default_max_security_wait_minutes(),
        }
    }
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            check_in_shares: default_check_in_shares(),
            security_shares: default_security_shares(),
            gates_shares: default_gates_shares(),
            retail_shares: default_retail_shares(),
            food_shares: default_food_shares(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl_seconds(),
            compute_timeout_seconds: default_compute_timeout_seconds(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            estimation: EstimationSettings::default(),
            recommendation: RecommendationSettings::default(),
            zones: ZoneSettings::default(),
            cache: CacheSettings::default(),
        }
    }
}

impl EstimationSettings {
    pub fn load_factor(&self, route_type: RouteType) -> f64 {
        match route_type {
            RouteType::Domestic => self.domestic_load_factor,
            RouteType::International => self.international_load_factor,
        }
    }

    pub fn window_minutes(&self, route_type: RouteType) -> u32 {
        match route_type {
            RouteType::Domestic => self.domestic_window_minutes,
            RouteType::International => self.international_window_minutes,
        }
    }
}

impl RecommendationSettings {
    pub fn buffer_minutes(&self, route_type: RouteType) -> u32 {
        match route_type {
            RouteType::Domestic => self.domestic_buffer_minutes,
            RouteType::International => self.international_buffer_minutes,
        }
    }
}

impl ZoneSettings {
    /// Share of `band`'s passengers sitting in zones of `kind`.
    pub fn share(&self, kind: ZoneKind, band: LeadBand) -> f64 {
        let shares = match kind {
            ZoneKind::CheckIn => &self.check_in_shares,
            ZoneKind::Security => &self.security_shares,
            ZoneKind::Gates => &self.gates_shares,
            ZoneKind::Retail => &self.retail_shares,
            ZoneKind::Food => &self.food_shares,
        };
        shares[band.index()]
    }

    /// Total share assigned for one band across all zone kinds.
    pub fn band_total(&self, band: LeadBand) -> f64 {
        ZoneKind::ALL
            .iter()
            .map(|kind| self.share(*kind, band))
            .sum()
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn compute_timeout(&self) -> Duration {
        Duration::from_secs(self.compute_timeout_seconds)
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;

        let config: EngineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load engine configuration from the default location.
    ///
    /// Searches for `engine.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = vec![
            PathBuf::from("engine.toml"),
            PathBuf::from("config/engine.toml"),
            PathBuf::from("../engine.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::Io(
            "No engine.toml found in standard locations".to_string(),
        ))
    }

    /// Reject parameter combinations the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let est = &self.estimation;

        for (label, factor) in [
            ("domestic_load_factor", est.domestic_load_factor),
            ("international_load_factor", est.international_load_factor),
        ] {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be in (0, 1], got {}",
                    label, factor
                )));
            }
        }

        if est.slot_minutes == 0 || 60 % est.slot_minutes != 0 {
            return Err(ConfigError::Invalid(format!(
                "slot_minutes must divide 60, got {}",
                est.slot_minutes
            )));
        }
        for (label, window) in [
            ("domestic_window_minutes", est.domestic_window_minutes),
            (
                "international_window_minutes",
                est.international_window_minutes,
            ),
        ] {
            if window == 0 || window % est.slot_minutes != 0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive multiple of slot_minutes, got {}",
                    label, window
                )));
            }
        }

        if !(0.0..=1.0).contains(&est.arrival_peak_position) {
            return Err(ConfigError::Invalid(format!(
                "arrival_peak_position must be in [0, 1], got {}",
                est.arrival_peak_position
            )));
        }

        if est.confidence_saturation_flights == 0 {
            return Err(ConfigError::Invalid(
                "confidence_saturation_flights must be positive".to_string(),
            ));
        }

        let rec = &self.recommendation;
        if rec.search_window_minutes < rec.domestic_buffer_minutes
            || rec.search_window_minutes < rec.international_buffer_minutes
        {
            return Err(ConfigError::Invalid(
                "search_window_minutes must cover the security buffers".to_string(),
            ));
        }

        for band in LeadBand::ALL {
            for kind in ZoneKind::ALL {
                let share = self.zones.share(kind, band);
                if !(0.0..=1.0).contains(&share) {
                    return Err(ConfigError::Invalid(format!(
                        "zone share for {:?}/{:?} must be in [0, 1], got {}",
                        kind, band, share
                    )));
                }
            }
            let total = self.zones.band_total(band);
            if (total - 1.0).abs() > 1e-6 {
                return Err(ConfigError::Invalid(format!(
                    "zone shares for the {:?} band must sum to 1.0, got {}",
                    band, total
                )));
            }
        }

        if self.cache.compute_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "compute_timeout_seconds must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
