//! Spatial distribution: hourly buckets to weighted terminal zones.
//!
//! Distribution is pure bookkeeping over explicit zone data. Each lead band
//! of a bucket is split across zone kinds by the configured share table,
//! then across the zones of a kind by their relative weights. Rendering
//! divides the resulting load by the zone's saturation capacity.

use crate::api::HourWindow;
use crate::config::ZoneSettings;
use crate::models::{
    HeatmapPoint, HourlyBucket, LeadBand, PredictionSnapshot, ZoneKind, ZoneLayout,
};

/// Spread one hour's bucket across a layout's zones.
///
/// Returns per-zone passenger loads aligned with `layout.zones`. A kind with
/// no usable zone in the layout silently loses its share; nothing is
/// redistributed.
pub fn distribute_hour(
    bucket: &HourlyBucket,
    layout: &ZoneLayout,
    shares: &ZoneSettings,
) -> Vec<f64> {
    let mut loads = vec![0.0; layout.zones.len()];
    if bucket.raw_passengers <= 0.0 {
        return loads;
    }

    for band in LeadBand::ALL {
        let band_passengers = bucket.band_passengers[band.index()];
        if band_passengers <= 0.0 {
            continue;
        }
        for kind in ZoneKind::ALL {
            let kind_passengers = band_passengers * shares.share(kind, band);
            if kind_passengers <= 0.0 {
                continue;
            }
            let kind_weight = layout.kind_weight(kind);
            if kind_weight <= 0.0 {
                continue;
            }
            for (idx, zone) in layout.zones.iter().enumerate() {
                if zone.kind == kind && zone.weight > 0.0 {
                    loads[idx] += kind_passengers * zone.weight / kind_weight;
                }
            }
        }
    }

    loads
}

/// Heatmap points for a snapshot restricted to an hour window.
///
/// Loads are averaged over the window's hours before normalizing, so a
/// narrow window shows that period's shape rather than a day total. Zones
/// with no load in the window are omitted entirely.
pub fn slice_window(snapshot: &PredictionSnapshot, window: HourWindow) -> Vec<HeatmapPoint> {
    let hours: Vec<usize> = window.hours().collect();
    let mut points = Vec::new();

    for (idx, zone) in snapshot.zones.iter().enumerate() {
        let total: f64 = hours.iter().map(|&h| snapshot.zone_loads[h][idx]).sum();
        let mean = total / hours.len() as f64;
        if mean <= 0.0 {
            continue;
        }
        points.push(HeatmapPoint {
            lat: zone.centroid.latitude,
            lon: zone.centroid.longitude,
            intensity: intensity(mean, zone.saturation),
        });
    }

    points
}

/// Mean intensity of the queue-forming zones (check-in and security) for one
/// hour of day. This is the congestion figure arrival recommendations rank
/// hours by.
pub fn hour_congestion(snapshot: &PredictionSnapshot, hour: usize) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;

    for (idx, zone) in snapshot.zones.iter().enumerate() {
        if !matches!(zone.kind, ZoneKind::CheckIn | ZoneKind::Security) || zone.weight <= 0.0 {
            continue;
        }
        total += intensity(snapshot.zone_loads[hour][idx], zone.saturation);
        count += 1;
    }

    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

fn intensity(load: f64, saturation: f64) -> f64 {
    if saturation <= 0.0 {
        return 1.0;
    }
    (load / saturation).clamp(0.0, 1.0)
}
