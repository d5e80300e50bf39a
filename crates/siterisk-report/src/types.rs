//! The aggregated report: the one value handed to the downstream renderer.
//!
//! Every slice is optional — `None` means "absent because the sub-analysis
//! could not produce data", which callers must distinguish from a present
//! slice with zero/low values.

use chrono::{DateTime, Utc};
use serde::Serialize;

use siterisk_core::Address;
use siterisk_risk::ClassifiedRisk;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Suburb-level statistics scraped from the statistics page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationStats {
    pub suburb: String,
    pub population: i64,
    pub median_age: Option<i64>,
    pub households: Option<i64>,
}

/// Attributes of the property itself, scraped from the property page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyAttributes {
    pub land_size_sqm: f64,
    pub year_built: Option<i64>,
}

/// One classified slice per environmental risk domain.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvironmentalRisk {
    pub fire: Option<ClassifiedRisk>,
    pub flood: Option<ClassifiedRisk>,
    pub stormwater: Option<ClassifiedRisk>,
    pub noise: Option<ClassifiedRisk>,
    pub coastal: Option<ClassifiedRisk>,
    pub character: Option<ClassifiedRisk>,
    pub landslide: Option<ClassifiedRisk>,
}

/// Electricity supply metrics around the property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfrastructureSummary {
    pub facility_count: usize,
    pub nearest_facility_m: Option<f64>,
    /// Distinct facility categories observed, sorted.
    pub categories: Vec<String>,
    /// Transmission lines / feeders crossing the search area.
    pub connector_count: usize,
    /// Composite supply-redundancy score in `[0, 100]`.
    pub redundancy_score: u8,
}

/// The assembled report for one address.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedReport {
    pub address: Address,
    pub generated_at: DateTime<Utc>,
    pub coordinates: Option<Coordinates>,
    pub location: Option<LocationStats>,
    pub property: Option<PropertyAttributes>,
    pub environmental: EnvironmentalRisk,
    pub infrastructure: Option<InfrastructureSummary>,
}
