//! Deterministic sample data: Dublin Airport and a full day of departures.
//!
//! The schedule mirrors a realistic Dublin departure board (short-haul
//! European rotations, two transatlantic wide-bodies, a Gulf departure and a
//! pair of regional domestic hops) spread across the day so the temporal
//! distribution has real structure to work with. Seeding the same date twice
//! produces identical records.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use crate::api::{AirportCode, FlightNumber};
use crate::models::{AirportInfo, FlightRecord, FlightStatus, RouteType};

struct AirportSeed {
    code: &'static str,
    name: &'static str,
    city: &'static str,
    country: &'static str,
    latitude: f64,
    longitude: f64,
}

const AIRPORTS: &[AirportSeed] = &[
    AirportSeed { code: "DUB", name: "Dublin Airport", city: "Dublin", country: "Ireland", latitude: 53.4213, longitude: -6.2701 },
    AirportSeed { code: "LHR", name: "London Heathrow", city: "London", country: "United Kingdom", latitude: 51.4700, longitude: -0.4543 },
    AirportSeed { code: "LGW", name: "London Gatwick", city: "London", country: "United Kingdom", latitude: 51.1537, longitude: -0.1821 },
    AirportSeed { code: "MAN", name: "Manchester Airport", city: "Manchester", country: "United Kingdom", latitude: 53.3537, longitude: -2.2750 },
    AirportSeed { code: "AGP", name: "Málaga Airport", city: "Málaga", country: "Spain", latitude: 36.6749, longitude: -4.4991 },
    AirportSeed { code: "BCN", name: "Barcelona Airport", city: "Barcelona", country: "Spain", latitude: 41.2974, longitude: 2.0833 },
    AirportSeed { code: "PMI", name: "Palma Airport", city: "Palma", country: "Spain", latitude: 39.5517, longitude: 2.7388 },
    AirportSeed { code: "CDG", name: "Paris Charles de Gaulle", city: "Paris", country: "France", latitude: 49.0097, longitude: 2.5479 },
    AirportSeed { code: "FRA", name: "Frankfurt Airport", city: "Frankfurt", country: "Germany", latitude: 50.0379, longitude: 8.5622 },
    AirportSeed { code: "AMS", name: "Amsterdam Schiphol", city: "Amsterdam", country: "Netherlands", latitude: 52.3105, longitude: 4.7683 },
    AirportSeed { code: "JFK", name: "John F. Kennedy International", city: "New York", country: "United States", latitude: 40.6413, longitude: -73.7781 },
    AirportSeed { code: "BOS", name: "Boston Logan International", city: "Boston", country: "United States", latitude: 42.3656, longitude: -71.0096 },
    AirportSeed { code: "DXB", name: "Dubai International", city: "Dubai", country: "United Arab Emirates", latitude: 25.2532, longitude: 55.3657 },
    AirportSeed { code: "KIR", name: "Kerry Airport", city: "Killarney", country: "Ireland", latitude: 52.1809, longitude: -9.5238 },
    AirportSeed { code: "CFN", name: "Donegal Airport", city: "Carrickfinn", country: "Ireland", latitude: 55.0442, longitude: -8.3410 },
];

struct FlightSeed {
    number: &'static str,
    airline: &'static str,
    destination: &'static str,
    departure: (u32, u32),
    duration_minutes: i64,
    aircraft: Option<&'static str>,
    capacity: i32,
    status: FlightStatus,
}

const DEPARTURES: &[FlightSeed] = &[
    // Early morning
    FlightSeed { number: "EI101", airline: "Aer Lingus", destination: "LHR", departure: (6, 30), duration_minutes: 75, aircraft: Some("A320"), capacity: 180, status: FlightStatus::Scheduled },
    FlightSeed { number: "FR201", airline: "Ryanair", destination: "AGP", departure: (6, 45), duration_minutes: 180, aircraft: Some("B737-800"), capacity: 189, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI105", airline: "Aer Lingus", destination: "CDG", departure: (7, 15), duration_minutes: 105, aircraft: Some("A320"), capacity: 180, status: FlightStatus::Scheduled },
    FlightSeed { number: "BA831", airline: "British Airways", destination: "LGW", departure: (7, 40), duration_minutes: 75, aircraft: Some("A319"), capacity: 156, status: FlightStatus::Scheduled },
    // Morning rush
    FlightSeed { number: "EI109", airline: "Aer Lingus", destination: "AMS", departure: (8, 10), duration_minutes: 90, aircraft: Some("A321"), capacity: 220, status: FlightStatus::Scheduled },
    FlightSeed { number: "FR305", airline: "Ryanair", destination: "BCN", departure: (8, 30), duration_minutes: 150, aircraft: Some("B737-800"), capacity: 189, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI103", airline: "Aer Lingus", destination: "LHR", departure: (8, 50), duration_minutes: 75, aircraft: Some("A320"), capacity: 180, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI3406", airline: "Aer Lingus Regional", destination: "KIR", departure: (9, 5), duration_minutes: 55, aircraft: None, capacity: 72, status: FlightStatus::Scheduled },
    FlightSeed { number: "LH977", airline: "Lufthansa", destination: "FRA", departure: (9, 15), duration_minutes: 120, aircraft: Some("A321"), capacity: 220, status: FlightStatus::Scheduled },
    FlightSeed { number: "FR401", airline: "Ryanair", destination: "PMI", departure: (9, 45), duration_minutes: 165, aircraft: Some("B737-800"), capacity: 189, status: FlightStatus::Scheduled },
    // Mid-morning
    FlightSeed { number: "EI107", airline: "Aer Lingus", destination: "MAN", departure: (10, 20), duration_minutes: 60, aircraft: Some("ATR-72"), capacity: 72, status: FlightStatus::Scheduled },
    FlightSeed { number: "BA835", airline: "British Airways", destination: "LHR", departure: (10, 45), duration_minutes: 75, aircraft: Some("A320"), capacity: 180, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI111", airline: "Aer Lingus", destination: "JFK", departure: (11, 0), duration_minutes: 480, aircraft: Some("A330-300"), capacity: 330, status: FlightStatus::Scheduled },
    FlightSeed { number: "FR501", airline: "Ryanair", destination: "AGP", departure: (11, 30), duration_minutes: 180, aircraft: Some("B737-800"), capacity: 189, status: FlightStatus::Scheduled },
    // Midday
    FlightSeed { number: "EI113", airline: "Aer Lingus", destination: "CDG", departure: (12, 15), duration_minutes: 105, aircraft: Some("A320"), capacity: 180, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI115", airline: "Aer Lingus", destination: "BOS", departure: (12, 45), duration_minutes: 450, aircraft: Some("A330-300"), capacity: 330, status: FlightStatus::Scheduled },
    FlightSeed { number: "FR601", airline: "Ryanair", destination: "BCN", departure: (13, 10), duration_minutes: 150, aircraft: Some("B737-800"), capacity: 189, status: FlightStatus::Scheduled },
    FlightSeed { number: "BA839", airline: "British Airways", destination: "LGW", departure: (13, 35), duration_minutes: 75, aircraft: Some("A319"), capacity: 156, status: FlightStatus::Scheduled },
    // Afternoon
    FlightSeed { number: "EI117", airline: "Aer Lingus", destination: "AMS", departure: (14, 0), duration_minutes: 90, aircraft: Some("A321"), capacity: 220, status: FlightStatus::Scheduled },
    FlightSeed { number: "FR701", airline: "Ryanair", destination: "PMI", departure: (14, 30), duration_minutes: 165, aircraft: Some("B737-800"), capacity: 189, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI119", airline: "Aer Lingus", destination: "LHR", departure: (15, 0), duration_minutes: 75, aircraft: Some("A320"), capacity: 180, status: FlightStatus::Scheduled },
    FlightSeed { number: "EK161", airline: "Emirates", destination: "DXB", departure: (15, 30), duration_minutes: 420, aircraft: Some("B777-300ER"), capacity: 350, status: FlightStatus::Scheduled },
    // Evening
    FlightSeed { number: "FR801", airline: "Ryanair", destination: "AGP", departure: (16, 15), duration_minutes: 180, aircraft: Some("B737-800"), capacity: 189, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI121", airline: "Aer Lingus", destination: "FRA", departure: (16, 45), duration_minutes: 120, aircraft: Some("A321"), capacity: 220, status: FlightStatus::Scheduled },
    FlightSeed { number: "BA843", airline: "British Airways", destination: "LHR", departure: (17, 10), duration_minutes: 75, aircraft: Some("A320"), capacity: 180, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI3436", airline: "Aer Lingus Regional", destination: "CFN", departure: (17, 25), duration_minutes: 50, aircraft: Some("ATR-42"), capacity: 48, status: FlightStatus::Scheduled },
    FlightSeed { number: "FR901", airline: "Ryanair", destination: "BCN", departure: (17, 40), duration_minutes: 150, aircraft: Some("B737-800"), capacity: 189, status: FlightStatus::Scheduled },
    // Late evening
    FlightSeed { number: "EI123", airline: "Aer Lingus", destination: "CDG", departure: (18, 15), duration_minutes: 105, aircraft: Some("A320"), capacity: 180, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI125", airline: "Aer Lingus", destination: "MAN", departure: (18, 45), duration_minutes: 60, aircraft: Some("ATR-72"), capacity: 72, status: FlightStatus::Scheduled },
    FlightSeed { number: "FR1001", airline: "Ryanair", destination: "PMI", departure: (19, 10), duration_minutes: 165, aircraft: Some("B737-800"), capacity: 189, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI127", airline: "Aer Lingus", destination: "LHR", departure: (19, 45), duration_minutes: 75, aircraft: Some("A320"), capacity: 180, status: FlightStatus::Scheduled },
    // Night
    FlightSeed { number: "BA847", airline: "British Airways", destination: "LGW", departure: (20, 15), duration_minutes: 75, aircraft: Some("A319"), capacity: 156, status: FlightStatus::Scheduled },
    FlightSeed { number: "FR1101", airline: "Ryanair", destination: "AGP", departure: (20, 45), duration_minutes: 180, aircraft: Some("B737-800"), capacity: 189, status: FlightStatus::Scheduled },
    FlightSeed { number: "EI129", airline: "Aer Lingus", destination: "AMS", departure: (21, 10), duration_minutes: 90, aircraft: Some("A321"), capacity: 220, status: FlightStatus::Scheduled },
    // One cancelled rotation stays on the board but contributes nothing.
    FlightSeed { number: "EI131", airline: "Aer Lingus", destination: "LHR", departure: (22, 5), duration_minutes: 75, aircraft: Some("A320"), capacity: 180, status: FlightStatus::Cancelled },
];

/// Dublin plus every destination the sample schedule references.
pub fn sample_airports() -> Vec<AirportInfo> {
    AIRPORTS
        .iter()
        .filter_map(|seed| {
            Some(AirportInfo {
                code: AirportCode::parse(seed.code).ok()?,
                name: seed.name.to_string(),
                city: seed.city.to_string(),
                country: seed.country.to_string(),
                latitude: seed.latitude,
                longitude: seed.longitude,
            })
        })
        .collect()
}

/// The sample departure board out of Dublin for one date.
pub fn dublin_departures(date: NaiveDate) -> Vec<FlightRecord> {
    let names: HashMap<&str, &str> = AIRPORTS.iter().map(|a| (a.code, a.name)).collect();
    let countries: HashMap<&str, &str> = AIRPORTS.iter().map(|a| (a.code, a.country)).collect();

    DEPARTURES
        .iter()
        .filter_map(|seed| {
            let (hour, minute) = seed.departure;
            let departure = date.and_hms_opt(hour, minute, 0)?.and_utc();
            let route_type = if countries.get(seed.destination) == Some(&"Ireland") {
                RouteType::Domestic
            } else {
                RouteType::International
            };
            Some(FlightRecord {
                flight_number: FlightNumber::parse(seed.number).ok()?,
                airline: seed.airline.to_string(),
                origin: AirportCode::parse("DUB").ok()?,
                destination: AirportCode::parse(seed.destination).ok()?,
                destination_name: names
                    .get(seed.destination)
                    .copied()
                    .unwrap_or(seed.destination)
                    .to_string(),
                scheduled_departure: departure,
                scheduled_arrival: Some(departure + Duration::minutes(seed.duration_minutes)),
                aircraft_type: seed.aircraft.map(str::to_string),
                seat_capacity: seed.capacity,
                route_type,
                status: seed.status,
            })
        })
        .collect()
}
