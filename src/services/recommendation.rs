//! Arrival guidance for a specific flight.
//!
//! Candidate arrival hours are ranked by the snapshot's queue congestion
//! (check-in plus security). The recommendation is advisory; the security
//! buffer for the route type is a hard floor it never trades away, so a
//! quiet hour that would leave too little time before departure is not
//! considered at all.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};

use crate::config::RecommendationSettings;
use crate::models::{ArrivalRecommendation, FlightRecord, PredictionSnapshot};
use crate::services::heatmap;

/// Recommend an arrival time for `flight` against its day's snapshot.
pub fn recommend(
    flight: &FlightRecord,
    snapshot: &PredictionSnapshot,
    settings: &RecommendationSettings,
) -> ArrivalRecommendation {
    let departure = flight.scheduled_departure;
    let buffer = Duration::minutes(i64::from(settings.buffer_minutes(flight.route_type)));
    let earliest = departure - Duration::minutes(i64::from(settings.search_window_minutes));

    // Whole hours that leave at least the security buffer before departure.
    let mut chosen: Option<(u8, f64)> = None;
    for hour in 0u8..24 {
        let start = hour_start(snapshot.date, hour);
        if start < earliest || start + buffer > departure {
            continue;
        }
        let congestion = heatmap::hour_congestion(snapshot, usize::from(hour));
        match chosen {
            // On equal congestion the later hour wins: less time at the
            // airport for the same queues.
            Some((_, best)) if congestion > best => {}
            _ => chosen = Some((hour, congestion)),
        }
    }

    let (optimal_arrival, optimal_arrival_hour, congestion_at_your_time) = match chosen {
        Some((hour, congestion)) => (hour_start(snapshot.date, hour), hour, congestion),
        None => {
            // Departure too close to fit any whole hour: arrive exactly one
            // buffer ahead.
            let arrival = departure - buffer;
            let hour = arrival.hour() as u8;
            let congestion = heatmap::hour_congestion(snapshot, usize::from(hour));
            (arrival, hour, congestion)
        }
    };

    let baseline_instant =
        departure - Duration::minutes(i64::from(settings.baseline_lead_minutes));
    let baseline_congestion =
        heatmap::hour_congestion(snapshot, baseline_instant.hour() as usize);

    let saved_fraction = (baseline_congestion - congestion_at_your_time).max(0.0);
    let time_savings = Duration::minutes(
        (saved_fraction * f64::from(settings.max_security_wait_minutes)).round() as i64,
    );

    let comparison = format!(
        "Arriving at {} puts you in {:.0}% congestion instead of {:.0}% at {}",
        optimal_arrival.format("%H:%M"),
        congestion_at_your_time * 100.0,
        baseline_congestion * 100.0,
        baseline_instant.format("%H:%M"),
    );
    let route_type_note = format!(
        "{} flight: plan to be at the airport at least {} before departure",
        flight.route_type.label(),
        format_minutes(settings.buffer_minutes(flight.route_type)),
    );

    ArrivalRecommendation {
        optimal_arrival,
        optimal_arrival_hour,
        comparison,
        time_savings,
        route_type_note,
        peak_congestion_time: hour_start(snapshot.date, snapshot.summary.peak_hour),
        peak_passengers: snapshot.summary.peak_passengers,
        congestion_at_your_time,
    }
}

fn hour_start(date: NaiveDate, hour: u8) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(u32::from(hour.min(23)), 0, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time).and_utc()
}

fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
