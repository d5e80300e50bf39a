//! Recommendation text per domain.
//!
//! Each trigger contributes a fixed block of strings; the final list is
//! ordered by trigger declaration and de-duplicated, so repeated trigger
//! hits (two zones both named "Floodway") never duplicate text.

use std::collections::HashSet;

use crate::domains::RiskDomain;
use crate::level::RiskLevel;
use crate::zone::RiskZone;

/// The stormwater worst-case string surfaced when no flood-detention
/// infrastructure exists within the search radius.
pub const CRITICAL_FLOOD_PROTECTION: &str = "Critical: no retarding basin or flood-detention infrastructure protects this catchment — obtain a site-specific stormwater and overland flow assessment before any development.";

/// Ordered, de-duplicated recommendations for one classified domain.
#[must_use]
pub fn generate_recommendations(
    domain: RiskDomain,
    level: RiskLevel,
    zones: &[RiskZone],
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    match domain {
        RiskDomain::Fire => {
            if level >= RiskLevel::High {
                out.push("Prepare and maintain a bushfire survival plan.".to_owned());
                out.push(
                    "Confirm the Bushfire Attack Level (BAL) rating with the relevant fire authority before building works."
                        .to_owned(),
                );
            }
            if zones.iter().any(|z| z.affects_property) {
                out.push(
                    "Development applications will require a bushfire management statement."
                        .to_owned(),
                );
            }
        }
        RiskDomain::Flood => {
            for zone in zones {
                if zone.name.eq_ignore_ascii_case("floodway")
                    || zone.category.eq_ignore_ascii_case("floodway")
                {
                    out.push(
                        "The property adjoins a declared floodway — habitable floor levels must sit above the declared flood level."
                            .to_owned(),
                    );
                    out.push(
                        "Obtain a flood certificate from the catchment authority before purchase or works."
                            .to_owned(),
                    );
                } else if zone.category.to_lowercase().contains("waterway") {
                    out.push(
                        "A waterway runs nearby — check overland flow paths on the council flood mapping."
                            .to_owned(),
                    );
                }
            }
            if level >= RiskLevel::High {
                out.push(
                    "Review flood cover in the building insurance policy.".to_owned(),
                );
            }
        }
        RiskDomain::Stormwater => {
            if zones.is_empty() {
                out.push(CRITICAL_FLOOD_PROTECTION.to_owned());
                out.push(
                    "Ask the council for the catchment's drainage strategy and any planned detention works."
                        .to_owned(),
                );
            } else if level >= RiskLevel::Moderate {
                out.push(
                    "Verify the capacity of local drainage against a 1-in-100-year storm event."
                        .to_owned(),
                );
            }
        }
        RiskDomain::Noise => {
            if level >= RiskLevel::Moderate {
                out.push(
                    "Consider acoustic glazing on facades exposed to the nearby road corridor."
                        .to_owned(),
                );
            }
        }
        RiskDomain::Coastal => {
            if level >= RiskLevel::High {
                out.push(
                    "Commission a coastal hazard vulnerability assessment covering erosion and inundation."
                        .to_owned(),
                );
            }
        }
        RiskDomain::Character => {
            if zones.iter().any(|z| z.affects_property) {
                out.push(
                    "External alterations will need planning consent under the character/heritage overlay."
                        .to_owned(),
                );
            }
        }
        RiskDomain::Landslide => {
            if level >= RiskLevel::Moderate {
                out.push(
                    "Obtain a geotechnical report before excavation or retaining works."
                        .to_owned(),
                );
            }
        }
    }

    dedup_preserving_order(out)
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
