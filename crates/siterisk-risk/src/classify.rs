//! Generic distance/membership classification shared by every risk domain.

use serde::{Deserialize, Serialize};

use crate::describe::generate_description;
use crate::domains::{DomainProfile, STORMWATER};
use crate::level::RiskLevel;
use crate::recommend::generate_recommendations;
use crate::zone::RiskZone;

/// The classified outcome for one domain. Derived per report, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRisk {
    pub level: RiskLevel,
    pub zones: Vec<RiskZone>,
    pub description: String,
    pub recommendations: Vec<String>,
}

/// Classify one domain from its candidate zones.
///
/// 1. Any zone with `affects_property` forces `VeryHigh`, even when a
///    non-affecting zone is closer.
/// 2. Otherwise the minimum usable distance maps through the domain's band
///    table (half-open, lower-bound-inclusive).
/// 3. With no zones, or no zone carrying a distance, the profile's `empty`
///    level applies.
#[must_use]
pub fn classify(profile: &DomainProfile, zones: Vec<RiskZone>) -> ClassifiedRisk {
    let level = if zones.iter().any(|z| z.affects_property) {
        RiskLevel::VeryHigh
    } else {
        match min_distance(&zones) {
            Some(distance) => profile.level_for_distance(distance),
            None => profile.empty,
        }
    };

    let description = generate_description(profile.domain, level, &zones);
    let recommendations = generate_recommendations(profile.domain, level, &zones);

    ClassifiedRisk {
        level,
        zones,
        description,
        recommendations,
    }
}

/// Stormwater classification: retarding basins are protective infrastructure,
/// so the generic empty→Minimal rule inverts. Zero basins within the search
/// radius is the worst case and carries the critical-flood-protection
/// recommendation.
#[must_use]
pub fn classify_stormwater(basins: Vec<RiskZone>, search_radius_m: f64) -> ClassifiedRisk {
    let profile = &STORMWATER;
    let level = match min_distance(&basins) {
        Some(distance) => profile.level_for_distance(distance),
        None => profile.empty,
    };

    let description = if basins.is_empty() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let radius = search_radius_m.round() as i64;
        format!(
            "No retarding basins or flood-detention infrastructure were found within {radius} m of the property."
        )
    } else {
        generate_description(profile.domain, level, &basins)
    };
    let recommendations = generate_recommendations(profile.domain, level, &basins);

    ClassifiedRisk {
        level,
        zones: basins,
        description,
        recommendations,
    }
}

fn min_distance(zones: &[RiskZone]) -> Option<f64> {
    zones
        .iter()
        .filter_map(|z| z.distance_m)
        .min_by(f64::total_cmp)
}
