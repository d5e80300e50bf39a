//! Environmental risk sub-analyses: one WFS layer → zones → classifier.

use siterisk_core::{Address, LayerDomain};
use siterisk_geo::{distance_to_feature, is_within_feature, Feature};
use siterisk_risk::{classify, classify_stormwater, ClassifiedRisk, DomainProfile, RiskZone};

use crate::error::ReportError;
use crate::types::Coordinates;

use super::{fetch_layer_features, AnalysisContext};

/// Property keys probed for a zone's display name, most specific first.
const NAME_KEYS: &[&str] = &["zone_name", "name", "overlay", "scheme_code", "facility_name"];
/// Property keys probed for a zone's category/type.
const CATEGORY_KEYS: &[&str] = &["category", "zone_type", "overlay_type", "road_type", "type"];

/// Classify one distance-band domain from its configured layer.
pub(crate) async fn analyze_domain(
    ctx: &AnalysisContext<'_>,
    address: &Address,
    coords: Option<Coordinates>,
    layer_domain: LayerDomain,
    profile: &DomainProfile,
    default_category: &str,
) -> Result<ClassifiedRisk, ReportError> {
    let (features, radius_m) = fetch_layer_features(ctx, address, coords, layer_domain).await?;
    let coords = coords.ok_or(ReportError::NoCoordinates)?;
    let zones = zones_from_features(&features, coords, radius_m, default_category);
    tracing::debug!(
        domain = %layer_domain,
        features = features.len(),
        zones = zones.len(),
        "classified environmental domain"
    );
    Ok(classify(profile, zones))
}

/// Stormwater: retarding basins are protective, classification inverts.
pub(crate) async fn analyze_stormwater(
    ctx: &AnalysisContext<'_>,
    address: &Address,
    coords: Option<Coordinates>,
) -> Result<ClassifiedRisk, ReportError> {
    let (features, radius_m) =
        fetch_layer_features(ctx, address, coords, LayerDomain::RetardingBasins).await?;
    let coords = coords.ok_or(ReportError::NoCoordinates)?;
    let basins = zones_from_features(&features, coords, radius_m, "retarding basin");
    Ok(classify_stormwater(basins, radius_m))
}

/// Convert layer features into candidate zones.
///
/// The bounding box is square, so corner features can sit beyond the radius;
/// those are dropped to keep "within N meters" semantics exact. Features
/// with no usable geometry are skipped.
fn zones_from_features(
    features: &[Feature],
    coords: Coordinates,
    radius_m: f64,
    default_category: &str,
) -> Vec<RiskZone> {
    let mut zones = Vec::new();
    for (index, feature) in features.iter().enumerate() {
        let affects = is_within_feature(coords.lat, coords.lon, &feature.geometry);
        let distance_m = if affects {
            Some(0.0)
        } else {
            distance_to_feature(coords.lat, coords.lon, &feature.geometry)
        };

        match distance_m {
            None => {
                tracing::warn!(index, "skipping zone feature without coordinates");
                continue;
            }
            Some(d) if !affects && d > radius_m => continue,
            Some(_) => {}
        }

        let category = first_property(feature, CATEGORY_KEYS)
            .unwrap_or_else(|| default_category.to_owned());
        let name = first_property(feature, NAME_KEYS)
            .unwrap_or_else(|| format!("{category} {}", index + 1));

        zones.push(RiskZone {
            name,
            category,
            affects_property: affects,
            distance_m,
        });
    }
    zones
}

fn first_property(feature: &Feature, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| feature.property_str(key))
        .map(str::to_owned)
}
