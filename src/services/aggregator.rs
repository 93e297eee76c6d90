//! Schedule aggregation: a day's flights to 24 hourly passenger buckets.
//!
//! Each usable flight contributes `seat_capacity x load_factor` passengers,
//! spread over the minutes before its departure in fixed-width slots whose
//! weights follow a normal curve. Slots never land on the departure instant
//! itself, so a flight's own departure hour receives nothing unless another
//! slot of its window falls there.

use chrono::{Duration, NaiveDate, Timelike};

use crate::config::EstimationSettings;
use crate::models::{FlightRecord, FlightStatus, HourlyBucket, LeadBand};

/// Outcome of one aggregation pass.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Exactly 24 buckets, hour 0 through 23, zero-filled where nothing
    /// contributes.
    pub buckets: Vec<HourlyBucket>,
    /// Flights that contributed passengers.
    pub flights_processed: usize,
    /// Records skipped for unusable data (wrong date, non-positive
    /// capacity). Cancelled flights are ignored without counting here.
    pub flights_dropped: usize,
}

impl AggregationResult {
    /// Sum of the raw (fractional) hourly estimates.
    pub fn total_raw_passengers(&self) -> f64 {
        self.buckets.iter().map(|b| b.raw_passengers).sum()
    }
}

/// Aggregate a day's schedule into hourly buckets.
///
/// One malformed record never aborts the pass; it is counted in
/// `flights_dropped` and skipped. Buckets are keyed by hour of day, so the
/// pre-midnight part of an early departure's window wraps onto the late
/// evening hours.
pub fn aggregate(
    flights: &[FlightRecord],
    date: NaiveDate,
    settings: &EstimationSettings,
) -> AggregationResult {
    let mut buckets: Vec<HourlyBucket> = (0..24).map(|h| HourlyBucket::empty(h as u8)).collect();
    let mut flights_processed = 0usize;
    let mut flights_dropped = 0usize;

    for flight in flights {
        if flight.status != FlightStatus::Scheduled {
            continue;
        }
        if !flight.is_usable() || flight.scheduled_departure.date_naive() != date {
            flights_dropped += 1;
            continue;
        }

        let passengers =
            f64::from(flight.seat_capacity) * settings.load_factor(flight.route_type);
        let window = settings.window_minutes(flight.route_type);
        let slot = settings.slot_minutes;
        let num_slots = (window / slot) as usize;
        let weights = normal_slot_weights(num_slots, settings.arrival_peak_position);

        let mut touched = [false; 24];
        for (i, weight) in weights.iter().enumerate() {
            // Lead runs from the full window down to one slot, never zero.
            let lead_minutes = i64::from(window) - (i as i64) * i64::from(slot);
            let slot_time = flight.scheduled_departure - Duration::minutes(lead_minutes);
            let hour = slot_time.hour() as usize;

            let contribution = passengers * weight;
            buckets[hour].raw_passengers += contribution;
            let band = LeadBand::from_lead_minutes(lead_minutes);
            buckets[hour].band_passengers[band.index()] += contribution;
            touched[hour] = true;
        }

        for (hour, was_touched) in touched.iter().enumerate() {
            if *was_touched {
                buckets[hour].flight_count += 1;
            }
        }
        flights_processed += 1;
    }

    AggregationResult {
        buckets,
        flights_processed,
        flights_dropped,
    }
}

/// Normalized weights for `num_slots` arrival slots.
///
/// A normal curve over the slot indices, its mean placed at `peak_position`
/// along the window (0.0 = earliest slot, 1.0 = the slot closest to
/// departure) and a spread of one sixth of the window, normalized so the
/// weights sum to 1 and each flight's contributions add up to its full
/// passenger estimate.
fn normal_slot_weights(num_slots: usize, peak_position: f64) -> Vec<f64> {
    if num_slots <= 1 {
        return vec![1.0; num_slots];
    }

    let mean = peak_position * (num_slots - 1) as f64;
    let std_dev = num_slots as f64 / 6.0;

    let raw: Vec<f64> = (0..num_slots)
        .map(|i| {
            let z = (i as f64 - mean) / std_dev;
            (-0.5 * z * z).exp()
        })
        .collect();

    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

#[cfg(test)]
mod tests {
    use super::{aggregate, normal_slot_weights};
    use crate::api::{AirportCode, FlightNumber};
    use crate::config::EstimationSettings;
    use crate::models::{FlightRecord, FlightStatus, RouteType};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn create_test_flight(
        number: &str,
        hour: u32,
        minute: u32,
        capacity: i32,
        route_type: RouteType,
    ) -> FlightRecord {
        FlightRecord {
            flight_number: FlightNumber::parse(number).unwrap(),
            airline: "Aer Lingus".to_string(),
            origin: AirportCode::parse("DUB").unwrap(),
            destination: AirportCode::parse("LHR").unwrap(),
            destination_name: "London Heathrow".to_string(),
            scheduled_departure: Utc
                .with_ymd_and_hms(2025, 6, 15, hour, minute, 0)
                .unwrap(),
            scheduled_arrival: None,
            aircraft_type: Some("A320".to_string()),
            seat_capacity: capacity,
            route_type,
            status: FlightStatus::Scheduled,
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        for n in [1usize, 4, 12, 16] {
            let weights = normal_slot_weights(n, 0.6);
            let total: f64 = weights.iter().sum();
            assert!((total - 1.0).abs() < 1e-12, "n={} total={}", n, total);
        }
    }

    #[test]
    fn test_weights_biased_toward_departure() {
        let weights = normal_slot_weights(12, 0.6);
        let early: f64 = weights[..4].iter().sum();
        let late: f64 = weights[8..].iter().sum();
        assert!(late > early);
    }

    #[test]
    fn test_empty_schedule_gives_24_zero_buckets() {
        let result = aggregate(&[], test_date(), &EstimationSettings::default());
        assert_eq!(result.buckets.len(), 24);
        assert!(result.buckets.iter().all(|b| b.raw_passengers == 0.0));
        assert_eq!(result.flights_processed, 0);
        assert_eq!(result.flights_dropped, 0);
    }

    #[test]
    fn test_domestic_window_fills_three_preceding_hours() {
        // 180 seats, domestic 14:00 departure: the 3-hour window covers
        // 11:00 through 13:45 and only those hours.
        let flights = vec![create_test_flight("EI107", 14, 0, 180, RouteType::Domestic)];
        let result = aggregate(&flights, test_date(), &EstimationSettings::default());

        let expected_total = 180.0 * 0.84;
        assert!((result.total_raw_passengers() - expected_total).abs() < 1e-9);

        for bucket in &result.buckets {
            match bucket.hour {
                11 | 12 | 13 => assert!(bucket.raw_passengers > 0.0, "hour {}", bucket.hour),
                _ => assert_eq!(bucket.raw_passengers, 0.0, "hour {}", bucket.hour),
            }
        }
        // The departure hour itself receives nothing.
        assert_eq!(result.buckets[14].raw_passengers, 0.0);
    }

    #[test]
    fn test_flight_count_marked_once_per_touched_hour() {
        let flights = vec![create_test_flight("EI107", 14, 0, 180, RouteType::Domestic)];
        let result = aggregate(&flights, test_date(), &EstimationSettings::default());

        for bucket in &result.buckets {
            match bucket.hour {
                11 | 12 | 13 => assert_eq!(bucket.flight_count, 1),
                _ => assert_eq!(bucket.flight_count, 0),
            }
        }
    }

    #[test]
    fn test_band_breakdown_sums_to_bucket_total() {
        let flights = vec![
            create_test_flight("EI101", 9, 10, 180, RouteType::International),
            create_test_flight("FR201", 14, 0, 189, RouteType::Domestic),
        ];
        let result = aggregate(&flights, test_date(), &EstimationSettings::default());

        for bucket in &result.buckets {
            let band_total: f64 = bucket.band_passengers.iter().sum();
            assert!(
                (band_total - bucket.raw_passengers).abs() < 1e-9,
                "hour {}",
                bucket.hour
            );
        }
    }

    #[test]
    fn test_cancelled_flights_are_ignored_not_dropped() {
        let mut cancelled = create_test_flight("EI111", 12, 0, 330, RouteType::International);
        cancelled.status = FlightStatus::Cancelled;
        let result = aggregate(&[cancelled], test_date(), &EstimationSettings::default());

        assert_eq!(result.total_raw_passengers(), 0.0);
        assert_eq!(result.flights_processed, 0);
        assert_eq!(result.flights_dropped, 0);
    }

    #[test]
    fn test_invalid_capacity_counts_as_dropped() {
        let flights = vec![
            create_test_flight("EI101", 9, 0, 0, RouteType::International),
            create_test_flight("EI103", 10, 0, -12, RouteType::International),
            create_test_flight("EI105", 11, 0, 180, RouteType::International),
        ];
        let result = aggregate(&flights, test_date(), &EstimationSettings::default());

        assert_eq!(result.flights_processed, 1);
        assert_eq!(result.flights_dropped, 2);
        assert!(result.total_raw_passengers() > 0.0);
    }

    #[test]
    fn test_wrong_date_counts_as_dropped() {
        let mut flight = create_test_flight("EI101", 9, 0, 180, RouteType::International);
        flight.scheduled_departure = Utc.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap();
        let result = aggregate(&[flight], test_date(), &EstimationSettings::default());

        assert_eq!(result.flights_processed, 0);
        assert_eq!(result.flights_dropped, 1);
    }

    #[test]
    fn test_early_departure_wraps_onto_evening_hours() {
        // International 01:00 departure: the 4-hour window starts at 21:00
        // the night before, which lands on hours 21-23 in the circular
        // hour-of-day view.
        let flights = vec![create_test_flight("EK162", 1, 0, 350, RouteType::International)];
        let result = aggregate(&flights, test_date(), &EstimationSettings::default());

        let wrapped: f64 = result.buckets[21..24]
            .iter()
            .map(|b| b.raw_passengers)
            .sum();
        assert!(wrapped > 0.0);
        assert!(
            (result.total_raw_passengers() - 350.0 * 0.82).abs() < 1e-9,
            "mass is conserved across the wrap"
        );
    }

    #[test]
    fn test_off_hour_departure_splits_across_hour_edges() {
        // Domestic 14:10 departure: slot instants run 11:10 through 13:55,
        // splitting the window across hours 11, 12 and 13 proportionally.
        let flights = vec![create_test_flight("EI119", 14, 10, 180, RouteType::Domestic)];
        let result = aggregate(&flights, test_date(), &EstimationSettings::default());

        assert!(result.buckets[11].raw_passengers > 0.0);
        assert!(result.buckets[12].raw_passengers > 0.0);
        assert!(result.buckets[13].raw_passengers > 0.0);
        assert_eq!(result.buckets[14].raw_passengers, 0.0);
        assert!((result.total_raw_passengers() - 180.0 * 0.84).abs() < 1e-9);
    }

    #[test]
    fn test_two_flights_accumulate() {
        let flights = vec![
            create_test_flight("EI101", 14, 0, 180, RouteType::Domestic),
            create_test_flight("FR201", 14, 0, 100, RouteType::Domestic),
        ];
        let result = aggregate(&flights, test_date(), &EstimationSettings::default());

        let expected = (180.0 + 100.0) * 0.84;
        assert!((result.total_raw_passengers() - expected).abs() < 1e-9);
        assert_eq!(result.buckets[12].flight_count, 2);
    }
}
