//! Independent sub-analyses, one per report slice.

pub mod environment;
pub mod infrastructure;
pub mod location;
pub mod property;

use siterisk_core::{Address, AppConfig, LayerDomain, SourceCache, SourceCatalog, SourcePayload};
use siterisk_geo::{collection_from_value, Feature};
use siterisk_scrape::FieldValue;
use siterisk_wfs::{BoundingBox, WfsClient};

use crate::error::ReportError;
use crate::orchestrator::fetch_or_retrieve;
use crate::sources::wfs_source_id;
use crate::types::Coordinates;

/// Everything a sub-analysis needs, borrowed from the builder for the
/// duration of one report run.
pub(crate) struct AnalysisContext<'a> {
    pub config: &'a AppConfig,
    pub catalog: &'a SourceCatalog,
    pub cache: &'a SourceCache,
    pub wfs: &'a WfsClient,
    pub page_client: &'a reqwest::Client,
}

/// Fetch (through the cache) and parse the features of one WFS layer around
/// the property. Returns the features together with the effective search
/// radius in meters.
pub(crate) async fn fetch_layer_features(
    ctx: &AnalysisContext<'_>,
    address: &Address,
    coords: Option<Coordinates>,
    domain: LayerDomain,
) -> Result<(Vec<Feature>, f64), ReportError> {
    let coords = coords.ok_or(ReportError::NoCoordinates)?;
    let layer = ctx
        .catalog
        .layer(domain)
        .ok_or_else(|| ReportError::LayerNotConfigured {
            domain: domain.to_string(),
        })?;
    let radius_m = layer
        .radius_m
        .unwrap_or(ctx.config.default_buffer_radius_m);
    let bbox = BoundingBox::around(coords.lat, coords.lon, radius_m);
    let source_id = wfs_source_id(domain);

    let type_name = layer.type_name.as_str();
    let payload = fetch_or_retrieve(ctx.cache, address, &source_id, || async move {
        let raw = ctx
            .wfs
            .fetch_collection(&ctx.catalog.wfs_endpoint, type_name, bbox)
            .await?;
        Ok(SourcePayload::Json(raw))
    })
    .await?;

    let raw = payload.as_json().ok_or_else(|| ReportError::WrongPayload {
        source_id: source_id.clone(),
    })?;
    let collection = collection_from_value(raw)?;
    Ok((collection.features, radius_m))
}

/// A field the whole-set validation guaranteed to exist; surfacing its
/// absence as a schema error keeps the failure local to this source.
pub(crate) fn required_i64(
    fields: &std::collections::HashMap<&'static str, FieldValue>,
    name: &'static str,
    source_id: &str,
) -> Result<i64, ReportError> {
    fields.get(name).and_then(FieldValue::as_i64).ok_or_else(|| {
        ReportError::Scrape(siterisk_scrape::ScrapeError::SchemaValidation {
            source_id: source_id.to_owned(),
            reason: format!("required field '{name}' is missing or not an integer"),
        })
    })
}

pub(crate) fn required_f64(
    fields: &std::collections::HashMap<&'static str, FieldValue>,
    name: &'static str,
    source_id: &str,
) -> Result<f64, ReportError> {
    fields.get(name).and_then(FieldValue::as_f64).ok_or_else(|| {
        ReportError::Scrape(siterisk_scrape::ScrapeError::SchemaValidation {
            source_id: source_id.to_owned(),
            reason: format!("required field '{name}' is missing or not numeric"),
        })
    })
}
