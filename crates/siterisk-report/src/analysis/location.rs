//! Suburb statistics scraped from the statistics page.

use siterisk_core::{Address, SourcePayload};
use siterisk_scrape::{
    extract_fields, fetch_page, parse_count, FieldSpec, FieldValue, SiblingHop, Strategy,
};

use crate::error::ReportError;
use crate::orchestrator::fetch_or_retrieve;
use crate::sources::SUBURB_STATS;
use crate::types::LocationStats;

use super::{required_i64, AnalysisContext};

fn location_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            name: "population",
            strategies: vec![
                Strategy::select(vec!["#population", ".population", "td.population"]),
                Strategy::select_then(vec!["th.population-label"], SiblingHop::NextElement),
            ],
            fallback_patterns: vec![r"(?is)population[^0-9]{0,40}([\d,]+)"],
            convert: parse_count,
            required: true,
            range: Some((1.0, 10_000_000.0)),
        },
        FieldSpec {
            name: "median_age",
            strategies: vec![
                Strategy::select(vec!["#median-age", ".median-age"]),
                Strategy::select_then(vec!["th.median-age-label"], SiblingHop::NextElement),
            ],
            fallback_patterns: vec![r"(?is)median\s+age[^0-9]{0,40}(\d+)"],
            convert: parse_count,
            required: false,
            range: Some((0.0, 120.0)),
        },
        FieldSpec {
            name: "households",
            strategies: vec![Strategy::select(vec!["#households", ".households"])],
            fallback_patterns: vec![r"(?is)households[^0-9]{0,40}([\d,]+)"],
            convert: parse_count,
            required: false,
            range: None,
        },
    ]
}

pub(crate) async fn analyze_location(
    ctx: &AnalysisContext<'_>,
    address: &Address,
) -> Result<LocationStats, ReportError> {
    let url = ctx
        .catalog
        .pages
        .suburb_stats_url(&address.suburb, &address.postcode);

    let payload = fetch_or_retrieve(ctx.cache, address, SUBURB_STATS, || async move {
        let body = fetch_page(ctx.page_client, &url, &ctx.config.user_agent).await?;
        Ok(SourcePayload::Html(body))
    })
    .await?;

    let markup = payload.as_html().ok_or_else(|| ReportError::WrongPayload {
        source_id: SUBURB_STATS.to_owned(),
    })?;

    let fields = extract_fields(markup, &location_specs(), SUBURB_STATS)?;

    Ok(LocationStats {
        suburb: address.suburb.trim().to_owned(),
        population: required_i64(&fields, "population", SUBURB_STATS)?,
        median_age: fields.get("median_age").and_then(FieldValue::as_i64),
        households: fields.get("households").and_then(FieldValue::as_i64),
    })
}
