//! Property attributes scraped from the property page.

use siterisk_core::{Address, SourcePayload};
use siterisk_scrape::{
    extract_fields, fetch_page, parse_area_sqm, parse_year, FieldSpec, FieldValue, SiblingHop,
    Strategy,
};

use crate::error::ReportError;
use crate::orchestrator::fetch_or_retrieve;
use crate::sources::PROPERTY_PAGE;
use crate::types::PropertyAttributes;

use super::{required_f64, AnalysisContext};

fn property_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            name: "land_size_sqm",
            strategies: vec![
                Strategy::select(vec!["#land-size", ".land-size", "td.land-size"]),
                Strategy::select_then(vec!["th.land-size-label"], SiblingHop::NextElement),
            ],
            fallback_patterns: vec![
                r"(?is)land\s+(?:size|area)[^0-9]{0,40}([\d,.]+\s*(?:m²|m2|sq\s?m|sqm|ha|hectares?))",
            ],
            convert: parse_area_sqm,
            required: true,
            range: Some((50.0, 200_000.0)),
        },
        FieldSpec {
            name: "year_built",
            strategies: vec![
                Strategy::select(vec!["#year-built", ".year-built"]),
                Strategy::select_then(vec!["th.year-built-label"], SiblingHop::NextElement),
            ],
            fallback_patterns: vec![r"(?is)(?:year\s+built|built\s+in)[^0-9]{0,40}(\d{4})"],
            convert: parse_year,
            required: false,
            range: Some((1800.0, 2100.0)),
        },
    ]
}

pub(crate) async fn analyze_property(
    ctx: &AnalysisContext<'_>,
    address: &Address,
) -> Result<PropertyAttributes, ReportError> {
    let url = ctx.catalog.pages.property_url(&address.normalized());

    let payload = fetch_or_retrieve(ctx.cache, address, PROPERTY_PAGE, || async move {
        let body = fetch_page(ctx.page_client, &url, &ctx.config.user_agent).await?;
        Ok(SourcePayload::Html(body))
    })
    .await?;

    let markup = payload.as_html().ok_or_else(|| ReportError::WrongPayload {
        source_id: PROPERTY_PAGE.to_owned(),
    })?;

    let fields = extract_fields(markup, &property_specs(), PROPERTY_PAGE)?;

    Ok(PropertyAttributes {
        land_size_sqm: required_f64(&fields, "land_size_sqm", PROPERTY_PAGE)?,
        year_built: fields.get("year_built").and_then(FieldValue::as_i64),
    })
}
