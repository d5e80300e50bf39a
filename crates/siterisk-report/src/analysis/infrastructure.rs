//! Electricity supply metrics around the property.

use std::collections::BTreeSet;

use siterisk_core::{Address, LayerDomain};
use siterisk_geo::{distance_to_feature, Feature, Geometry};
use siterisk_risk::redundancy_score;

use crate::error::ReportError;
use crate::types::{Coordinates, InfrastructureSummary};

use super::{fetch_layer_features, AnalysisContext};

const CATEGORY_KEYS: &[&str] = &["category", "facility_type", "asset_class", "type"];

pub(crate) async fn analyze_infrastructure(
    ctx: &AnalysisContext<'_>,
    address: &Address,
    coords: Option<Coordinates>,
) -> Result<InfrastructureSummary, ReportError> {
    let (features, radius_m) =
        fetch_layer_features(ctx, address, coords, LayerDomain::Electricity).await?;
    let coords = coords.ok_or(ReportError::NoCoordinates)?;
    Ok(summarize(&features, coords, radius_m))
}

/// Split layer features into facilities (points/polygons) and connectors
/// (lines), then score supply redundancy.
fn summarize(features: &[Feature], coords: Coordinates, radius_m: f64) -> InfrastructureSummary {
    let mut facility_count = 0usize;
    let mut connector_count = 0usize;
    let mut nearest_facility_m: Option<f64> = None;
    let mut categories: BTreeSet<String> = BTreeSet::new();

    for feature in features {
        let distance = distance_to_feature(coords.lat, coords.lon, &feature.geometry);
        let Some(distance) = distance else {
            continue;
        };
        if distance > radius_m {
            continue;
        }

        match feature.geometry {
            Geometry::LineString(_) | Geometry::MultiLineString(_) => {
                connector_count += 1;
            }
            _ => {
                facility_count += 1;
                nearest_facility_m = Some(match nearest_facility_m {
                    Some(best) if best <= distance => best,
                    _ => distance,
                });
                if let Some(category) = CATEGORY_KEYS
                    .iter()
                    .find_map(|key| feature.property_str(key))
                {
                    categories.insert(category.to_lowercase());
                }
            }
        }
    }

    let score = redundancy_score(
        facility_count,
        nearest_facility_m,
        categories.len(),
        connector_count,
    );

    InfrastructureSummary {
        facility_count,
        nearest_facility_m,
        categories: categories.into_iter().collect(),
        connector_count,
        redundancy_score: score,
    }
}
