//! Human-readable descriptions of a classified domain.

use crate::domains::RiskDomain;
use crate::level::RiskLevel;
use crate::zone::RiskZone;

/// One templated sentence for the report.
///
/// `VeryHigh` names every affecting zone (comma-joined); `High`/`Moderate`
/// reference the single nearest zone and its distance; lower levels get a
/// generic sentence.
#[must_use]
pub fn generate_description(domain: RiskDomain, level: RiskLevel, zones: &[RiskZone]) -> String {
    let label = domain.label();
    match level {
        RiskLevel::VeryHigh => {
            let affecting: Vec<&str> = zones
                .iter()
                .filter(|z| z.affects_property)
                .map(|z| z.name.as_str())
                .collect();
            if affecting.is_empty() {
                // VeryHigh without an affecting zone (stormwater inversion).
                format!("The property has a very high {label} risk rating.")
            } else {
                format!(
                    "The property is directly affected by the following {label} zones: {}.",
                    affecting.join(", ")
                )
            }
        }
        RiskLevel::High | RiskLevel::Moderate => match nearest_zone(zones) {
            Some(zone) => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let distance = zone.distance_m.unwrap_or(0.0).round() as i64;
                format!(
                    "{} ({}) is approximately {distance} m from the property.",
                    zone.name, zone.category
                )
            }
            None => format!("The property has an elevated {label} risk rating."),
        },
        RiskLevel::Low | RiskLevel::Minimal => {
            format!("No significant {label} constraints were identified near the property.")
        }
    }
}

fn nearest_zone(zones: &[RiskZone]) -> Option<&RiskZone> {
    zones
        .iter()
        .filter(|z| z.distance_m.is_some())
        .min_by(|a, b| f64::total_cmp(&a.distance_m.unwrap_or(f64::INFINITY), &b.distance_m.unwrap_or(f64::INFINITY)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn very_high_joins_affecting_zone_names() {
        let zones = vec![
            RiskZone::affecting("BMO Schedule 1", "bushfire overlay"),
            RiskZone::affecting("BMO Schedule 2", "bushfire overlay"),
            RiskZone::at_distance("Far zone", "bushfire overlay", 900.0),
        ];
        let text = generate_description(RiskDomain::Fire, RiskLevel::VeryHigh, &zones);
        assert!(text.contains("BMO Schedule 1, BMO Schedule 2"), "{text}");
        assert!(!text.contains("Far zone"), "{text}");
    }

    #[test]
    fn high_names_the_nearest_zone_with_distance() {
        let zones = vec![
            RiskZone::at_distance("Yarra floodway", "Floodway", 42.4),
            RiskZone::at_distance("Backwater", "waterway", 90.0),
        ];
        let text = generate_description(RiskDomain::Flood, RiskLevel::High, &zones);
        assert!(text.contains("Yarra floodway"), "{text}");
        assert!(text.contains("42 m"), "{text}");
        assert!(!text.contains("Backwater"), "{text}");
    }

    #[test]
    fn minimal_is_generic() {
        let text = generate_description(RiskDomain::Landslide, RiskLevel::Minimal, &[]);
        assert!(text.contains("landslip"), "{text}");
        assert!(text.contains("No significant"), "{text}");
    }
}
