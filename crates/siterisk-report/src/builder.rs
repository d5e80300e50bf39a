//! Report assembly: geocode, prefetch shared sources, run every sub-analysis
//! concurrently, merge.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};

use siterisk_core::{Address, AppConfig, LayerDomain, SourceCache, SourceCatalog, SourcePayload};
use siterisk_risk::domains;
use siterisk_scrape::{build_page_client, fetch_json, fetch_page};
use siterisk_wfs::WfsClient;

use crate::analysis::environment::{analyze_domain, analyze_stormwater};
use crate::analysis::infrastructure::analyze_infrastructure;
use crate::analysis::location::analyze_location;
use crate::analysis::property::analyze_property;
use crate::analysis::AnalysisContext;
use crate::error::ReportError;
use crate::geocode::coordinates_from_json;
use crate::orchestrator::fetch_or_retrieve;
use crate::sources::{GEOCODE, PROPERTY_PAGE, SUBURB_STATS};
use crate::types::{AggregatedReport, Coordinates, EnvironmentalRisk};

/// Builds [`AggregatedReport`]s.
///
/// Holds the HTTP clients and the explicitly-injected [`SourceCache`]; one
/// builder serves many report requests, and the cache is the only state
/// shared between them.
pub struct ReportBuilder {
    config: AppConfig,
    catalog: SourceCatalog,
    cache: Arc<SourceCache>,
    wfs: WfsClient,
    page_client: reqwest::Client,
}

impl ReportBuilder {
    /// # Errors
    ///
    /// Returns [`ReportError`] if an HTTP client cannot be constructed.
    pub fn new(
        config: AppConfig,
        catalog: SourceCatalog,
        cache: Arc<SourceCache>,
    ) -> Result<Self, ReportError> {
        let wfs = WfsClient::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.backoff_base_secs,
        )?;
        let page_client = build_page_client(config.request_timeout_secs)?;
        Ok(Self {
            config,
            catalog,
            cache,
            wfs,
            page_client,
        })
    }

    /// Build the full report for one address.
    ///
    /// Sub-analyses run concurrently with no cap; any of them may fail and
    /// its slice comes back `None` while the siblings complete. This
    /// function itself never fails — worst case is a report of absent
    /// slices.
    #[allow(clippy::too_many_lines)]
    pub async fn build_report(&self, address: &Address) -> AggregatedReport {
        let ctx = AnalysisContext {
            config: &self.config,
            catalog: &self.catalog,
            cache: &self.cache,
            wfs: &self.wfs,
            page_client: &self.page_client,
        };

        tracing::info!(address = %address, "building report");

        // Geometric analyses need the property coordinates first; a geocode
        // failure degrades them to absent slices rather than failing the run.
        let coordinates = match self.geocode(&ctx, address).await {
            Ok(coords) => Some(coords),
            Err(e) => {
                tracing::warn!(error = %e, "geocoding failed — geometric slices will be absent");
                None
            }
        };

        self.prefetch(&ctx, address).await;

        let (location, property, fire, flood, stormwater, noise, coastal, character, landslide, infrastructure) = tokio::join!(
            run_slice("location", analyze_location(&ctx, address)),
            run_slice("property", analyze_property(&ctx, address)),
            run_slice(
                "fire",
                analyze_domain(
                    &ctx,
                    address,
                    coordinates,
                    LayerDomain::Fire,
                    &domains::FIRE,
                    "bushfire overlay",
                )
            ),
            run_slice(
                "flood",
                analyze_domain(
                    &ctx,
                    address,
                    coordinates,
                    LayerDomain::Flood,
                    &domains::FLOOD,
                    "flood overlay",
                )
            ),
            run_slice("stormwater", analyze_stormwater(&ctx, address, coordinates)),
            run_slice(
                "noise",
                analyze_domain(
                    &ctx,
                    address,
                    coordinates,
                    LayerDomain::MajorRoads,
                    &domains::NOISE,
                    "major road",
                )
            ),
            run_slice(
                "coastal",
                analyze_domain(
                    &ctx,
                    address,
                    coordinates,
                    LayerDomain::Coastal,
                    &domains::COASTAL,
                    "coastal inundation overlay",
                )
            ),
            run_slice(
                "character",
                analyze_domain(
                    &ctx,
                    address,
                    coordinates,
                    LayerDomain::Character,
                    &domains::CHARACTER,
                    "character overlay",
                )
            ),
            run_slice(
                "landslide",
                analyze_domain(
                    &ctx,
                    address,
                    coordinates,
                    LayerDomain::Landslide,
                    &domains::LANDSLIDE,
                    "erosion overlay",
                )
            ),
            run_slice(
                "infrastructure",
                analyze_infrastructure(&ctx, address, coordinates)
            ),
        );

        AggregatedReport {
            address: address.clone(),
            generated_at: Utc::now(),
            coordinates,
            location,
            property,
            environmental: EnvironmentalRisk {
                fire,
                flood,
                stormwater,
                noise,
                coastal,
                character,
                landslide,
            },
            infrastructure,
        }
    }

    async fn geocode(
        &self,
        ctx: &AnalysisContext<'_>,
        address: &Address,
    ) -> Result<Coordinates, ReportError> {
        let url = self.catalog.geocode_url(&address.normalized());
        let payload = fetch_or_retrieve(ctx.cache, address, GEOCODE, || async move {
            let value = fetch_json(ctx.page_client, &url, &ctx.config.user_agent).await?;
            Ok(SourcePayload::Json(value))
        })
        .await?;

        let value = payload.as_json().ok_or_else(|| ReportError::WrongPayload {
            source_id: GEOCODE.to_owned(),
        })?;
        coordinates_from_json(value)
    }

    /// Warm the cache for sources shared by several sub-analyses so
    /// siblings don't race to fetch the same page. Failures are logged and
    /// ignored — the owning sub-analysis will retry and report properly.
    async fn prefetch(&self, ctx: &AnalysisContext<'_>, address: &Address) {
        let suburb_url = self
            .catalog
            .pages
            .suburb_stats_url(&address.suburb, &address.postcode);
        let property_url = self.catalog.pages.property_url(&address.normalized());

        let warms: Vec<(&str, BoxFuture<'_, Result<SourcePayload, ReportError>>)> = vec![
            (
                SUBURB_STATS,
                fetch_or_retrieve(ctx.cache, address, SUBURB_STATS, move || async move {
                    let body =
                        fetch_page(ctx.page_client, &suburb_url, &ctx.config.user_agent).await?;
                    Ok(SourcePayload::Html(body))
                })
                .boxed(),
            ),
            (
                PROPERTY_PAGE,
                fetch_or_retrieve(ctx.cache, address, PROPERTY_PAGE, move || async move {
                    let body =
                        fetch_page(ctx.page_client, &property_url, &ctx.config.user_agent).await?;
                    Ok(SourcePayload::Html(body))
                })
                .boxed(),
            ),
        ];

        let (sources, futures): (Vec<_>, Vec<_>) = warms.into_iter().unzip();
        let results = futures::future::join_all(futures).await;
        for (source, result) in sources.iter().zip(results) {
            if let Err(e) = result {
                tracing::warn!(source, error = %e, "prefetch failed — analysis will refetch");
            }
        }
    }
}

/// Run one sub-analysis, converting failure into an absent slice.
async fn run_slice<T>(
    name: &'static str,
    analysis: impl Future<Output = Result<T, ReportError>>,
) -> Option<T> {
    match analysis.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(analysis = name, error = %e, "sub-analysis failed — slice absent");
            None
        }
    }
}
