//! Public API surface for the estimation engine.
//!
//! This file consolidates the validated identifier and geographic types shared
//! by the store adapters, the services and the HTTP layer. All types derive
//! Serialize/Deserialize for JSON serialization; the parse constructors
//! normalize user input (trim, uppercase) and reject malformed values before
//! any data access happens.

use serde::{Deserialize, Serialize};

/// IATA airport code (exactly three ASCII letters, stored uppercase).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirportCode(String);

impl AirportCode {
    /// Parse and normalize a user-supplied airport code.
    ///
    /// Lowercase input is accepted and uppercased; anything that is not
    /// exactly three ASCII letters is rejected.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let code = raw.trim().to_ascii_uppercase();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(AirportCode(code))
        } else {
            Err(format!(
                "Invalid airport code '{}': expected three letters, e.g. DUB",
                raw.trim()
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AirportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Commercial flight number: airline designator followed by digits
/// (e.g. `FR1234`, `EI172`). Stored uppercase without spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightNumber(String);

impl FlightNumber {
    /// Parse and normalize a user-supplied flight number.
    ///
    /// Spaces are stripped (`"FR 1234"` -> `"FR1234"`). The result must be
    /// 3 to 7 alphanumeric characters, start with a letter and end with a
    /// digit.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let number: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let valid = (3..=7).contains(&number.len())
            && number.bytes().all(|b| b.is_ascii_alphanumeric())
            && number.as_bytes().first().is_some_and(|b| b.is_ascii_uppercase())
            && number.as_bytes().last().is_some_and(|b| b.is_ascii_digit());

        if valid {
            Ok(FlightNumber(number))
        } else {
            Err(format!(
                "Invalid flight number '{}': expected airline code plus digits, e.g. FR1234",
                raw.trim()
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic point (latitude, longitude) in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err("Latitude must be between -90 and 90 degrees".to_string());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err("Longitude must be between -180 and 180 degrees".to_string());
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Inclusive range of hours of day used to slice heatmap snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    /// First hour of the window (0-23)
    pub from_hour: u8,
    /// Last hour of the window, inclusive (0-23)
    pub to_hour: u8,
}

impl HourWindow {
    pub fn new(from_hour: u8, to_hour: u8) -> Result<Self, String> {
        if from_hour > 23 || to_hour > 23 {
            return Err("Hours must be between 0 and 23".to_string());
        }
        if from_hour > to_hour {
            return Err("Window start hour must not be after its end hour".to_string());
        }
        Ok(Self { from_hour, to_hour })
    }

    /// The whole day, hour 0 through 23.
    pub fn full_day() -> Self {
        Self {
            from_hour: 0,
            to_hour: 23,
        }
    }

    /// Iterate the hours covered by the window.
    pub fn hours(&self) -> impl Iterator<Item = usize> {
        (self.from_hour as usize)..=(self.to_hour as usize)
    }

    /// Number of hours in the window (always >= 1).
    pub fn len(&self) -> usize {
        (self.to_hour - self.from_hour) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
