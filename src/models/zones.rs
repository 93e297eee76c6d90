//! Terminal zone model for spatial passenger distribution.
//!
//! Zones are explicit configuration data: each has a centroid, a kind, a
//! relative weight within its kind and a saturation capacity. The mapper
//! never infers a zone from raw coordinates; airports differ only in which
//! zone set they carry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::api::{AirportCode, GeoPoint};
use crate::models::flight::AirportInfo;

/// Functional kind of a terminal zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    CheckIn,
    Security,
    Gates,
    Retail,
    Food,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 5] = [
        ZoneKind::CheckIn,
        ZoneKind::Security,
        ZoneKind::Gates,
        ZoneKind::Retail,
        ZoneKind::Food,
    ];
}

/// How far ahead of departure a passenger is when they occupy a zone.
///
/// Aggregated loads are broken down by band so that, for example, the
/// security zones peak earlier than the gate zones within one flight's
/// arrival window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadBand {
    /// 120 minutes or more before departure
    Early,
    /// 60 to 119 minutes before departure
    Mid,
    /// under 60 minutes before departure
    Late,
}

impl LeadBand {
    pub const COUNT: usize = 3;
    pub const ALL: [LeadBand; 3] = [LeadBand::Early, LeadBand::Mid, LeadBand::Late];

    /// Classify a lead time in minutes before departure.
    pub fn from_lead_minutes(minutes: i64) -> Self {
        if minutes >= 120 {
            LeadBand::Early
        } else if minutes >= 60 {
            LeadBand::Mid
        } else {
            LeadBand::Late
        }
    }

    pub fn index(&self) -> usize {
        match self {
            LeadBand::Early => 0,
            LeadBand::Mid => 1,
            LeadBand::Late => 2,
        }
    }
}

/// One terminal zone: a named centroid with distribution parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportZone {
    /// Stable identifier, e.g. "t1-security-entrance"
    pub id: String,
    /// Display name, e.g. "T1 Security Entrance"
    pub name: String,
    pub kind: ZoneKind,
    pub centroid: GeoPoint,
    /// Relative weight among zones of the same kind (busier zones take a
    /// larger share of the kind's passengers). Must be positive to receive
    /// any load.
    pub weight: f64,
    /// Passenger load at which the zone renders at full intensity (1.0).
    pub saturation: f64,
}

/// The zone set of one airport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub zones: Vec<AirportZone>,
}

impl ZoneLayout {
    pub fn new(zones: Vec<AirportZone>) -> Self {
        Self { zones }
    }

    /// Sum of weights for one kind. Zero when the kind has no usable zone.
    pub fn kind_weight(&self, kind: ZoneKind) -> f64 {
        self.zones
            .iter()
            .filter(|z| z.kind == kind && z.weight > 0.0)
            .map(|z| z.weight)
            .sum()
    }

    /// Dublin Airport Terminal 1: 17 zones surveyed from the terminal map.
    pub fn dublin_t1() -> Self {
        fn zone(
            id: &str,
            name: &str,
            kind: ZoneKind,
            lat: f64,
            lon: f64,
            weight: f64,
            saturation: f64,
        ) -> AirportZone {
            AirportZone {
                id: id.to_string(),
                name: name.to_string(),
                kind,
                centroid: GeoPoint {
                    latitude: lat,
                    longitude: lon,
                },
                weight,
                saturation,
            }
        }

        use ZoneKind::*;
        Self::new(vec![
            // Security
            zone("t1-security-entrance", "T1 Security Entrance", Security,
                53.42680848824327, -6.243421529894776, 80.0, 220.0),
            zone("t1-security-exit", "T1 Security Exit", Security,
                53.42644593488568, -6.243911878984689, 60.0, 160.0),
            // Check-in
            zone("t1-check-in-west", "T1 Check In West", CheckIn,
                53.42754383538095, -6.244651909621402, 170.0, 420.0),
            zone("t1-check-in-east", "T1 Check In East", CheckIn,
                53.42702164466883, -6.243743060262516, 160.0, 400.0),
            // Retail
            zone("t1-duty-free-west", "T1 Duty Free West", Retail,
                53.426974072315154, -6.244578723713256, 45.0, 120.0),
            zone("t1-duty-free-east", "T1 Duty Free East", Retail,
                53.42732344790114, -6.245203317879837, 50.0, 130.0),
            // Food court
            zone("t1-food-hall", "T1 Food Hall", Food,
                53.42802374541869, -6.24568116836029, 100.0, 260.0),
            // Gates, 300 series
            zone("gates-301-307-east", "Gates 301-307 East", Gates,
                53.426274128513555, -6.245718703065823, 90.0, 240.0),
            zone("gates-301-307-west", "Gates 301-307 West", Gates,
                53.42612810625835, -6.246139226505242, 85.0, 220.0),
            zone("gates-301-307-walkway", "Gates 301-307 Walkway", Gates,
                53.42665899009382, -6.245176024957214, 40.0, 110.0),
            // Gates, 200 series
            zone("gates-201-216-east", "Gates 201-216 East", Gates,
                53.42855701477172, -6.246827744495224, 180.0, 460.0),
            zone("gates-201-216-central", "Gates 201-216 Central", Gates,
                53.428411805342485, -6.247185659255368, 195.0, 500.0),
            zone("gates-201-216-west", "Gates 201-216 West", Gates,
                53.42802202897417, -6.247940167155616, 140.0, 360.0),
            zone("gates-217-220", "Gates 217-220", Gates,
                53.42927503966373, -6.246226471021615, 110.0, 280.0),
            // Gates, 100 series
            zone("gates-102-105", "Gates 102-105", Gates,
                53.43049107334048, -6.2474374322065644, 150.0, 380.0),
            zone("gates-106-109", "Gates 106-109", Gates,
                53.43054823093274, -6.248903012307744, 130.0, 330.0),
            zone("gates-110-119", "Gates 110-119", Gates,
                53.43065822299713, -6.250207347795571, 120.0, 310.0),
        ])
    }

    /// Generic single-terminal layout placed around an airport anchor, for
    /// airports without a surveyed zone set.
    pub fn standard_template(anchor: GeoPoint) -> Self {
        fn zone(
            id: &str,
            name: &str,
            kind: ZoneKind,
            anchor: GeoPoint,
            dlat: f64,
            dlon: f64,
            weight: f64,
            saturation: f64,
        ) -> AirportZone {
            AirportZone {
                id: id.to_string(),
                name: name.to_string(),
                kind,
                centroid: GeoPoint {
                    latitude: anchor.latitude + dlat,
                    longitude: anchor.longitude + dlon,
                },
                weight,
                saturation,
            }
        }

        use ZoneKind::*;
        Self::new(vec![
            zone("check-in-hall", "Check-In Hall", CheckIn, anchor, 0.0012, -0.0008, 100.0, 420.0),
            zone("security-main", "Security Screening", Security, anchor, 0.0006, -0.0004, 100.0, 260.0),
            zone("duty-free", "Duty Free", Retail, anchor, 0.0002, -0.0012, 100.0, 140.0),
            zone("food-court", "Food Court", Food, anchor, 0.0008, -0.0016, 100.0, 220.0),
            zone("gates-north", "Gates North", Gates, anchor, 0.0020, -0.0024, 120.0, 420.0),
            zone("gates-south", "Gates South", Gates, anchor, -0.0010, -0.0020, 100.0, 380.0),
        ])
    }
}

/// Zone layouts per airport, with a template fallback.
///
/// This is construction-time data: the engine is handed a catalog and never
/// hard-codes airport geometry.
#[derive(Debug, Clone, Default)]
pub struct ZoneCatalog {
    layouts: HashMap<AirportCode, ZoneLayout>,
}

impl ZoneCatalog {
    pub fn new() -> Self {
        Self {
            layouts: HashMap::new(),
        }
    }

    /// Catalog with the built-in surveyed layouts (currently Dublin T1).
    pub fn with_builtin_layouts() -> Self {
        let mut catalog = Self::new();
        if let Ok(dub) = AirportCode::parse("DUB") {
            catalog.insert(dub, ZoneLayout::dublin_t1());
        }
        catalog
    }

    pub fn insert(&mut self, airport: AirportCode, layout: ZoneLayout) {
        self.layouts.insert(airport, layout);
    }

    /// Layout for an airport: the registered one, or the standard template
    /// placed at the airport's anchor.
    pub fn layout_for(&self, airport: &AirportInfo) -> ZoneLayout {
        match self.layouts.get(&airport.code) {
            Some(layout) => layout.clone(),
            None => ZoneLayout::standard_template(GeoPoint {
                latitude: airport.latitude,
                longitude: airport.longitude,
            }),
        }
    }
}
