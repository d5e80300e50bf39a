use serde::{Deserialize, Serialize};

/// One candidate zone feeding a domain's classification.
///
/// `affects_property == true` means the zone's footprint covers the property
/// itself; it dominates every distance-based tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskZone {
    /// Display name, e.g. `"Bushfire Management Overlay Schedule 2"`.
    pub name: String,
    /// Zone type/category, e.g. `"Floodway"`, `"freeway"`.
    pub category: String,
    pub affects_property: bool,
    /// Distance from the property in meters; `None` when the source
    /// supplied no usable geometry.
    pub distance_m: Option<f64>,
}

impl RiskZone {
    #[must_use]
    pub fn affecting(name: &str, category: &str) -> Self {
        Self {
            name: name.to_owned(),
            category: category.to_owned(),
            affects_property: true,
            distance_m: Some(0.0),
        }
    }

    #[must_use]
    pub fn at_distance(name: &str, category: &str, distance_m: f64) -> Self {
        Self {
            name: name.to_owned(),
            category: category.to_owned(),
            affects_property: false,
            distance_m: Some(distance_m),
        }
    }
}
