//! HTTP client for WFS `GetFeature` queries.

use std::time::Duration;

use reqwest::Client;

use siterisk_geo::{collection_from_value, Feature};

use crate::bbox::BoundingBox;
use crate::error::WfsError;
use crate::retry::retry_with_backoff;

/// HTTP client for WFS-style geospatial endpoints.
///
/// Issues bounding-box `GetFeature` queries and returns parsed GeoJSON
/// features. Rate limiting (429), not-found (404), and other non-2xx
/// responses surface as typed errors; transient failures (429, network) are
/// retried with exponential backoff up to `max_retries` additional attempts.
pub struct WfsClient {
    client: Client,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl WfsClient {
    /// Creates a `WfsClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for retriable errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`WfsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, WfsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches the features of `type_name` intersecting `bbox`, with
    /// automatic retry on transient errors.
    ///
    /// Malformed member features in the response are skipped during parsing;
    /// only an unusable envelope is an error.
    ///
    /// # Errors
    ///
    /// - [`WfsError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`WfsError::NotFound`] — HTTP 404 (not retried).
    /// - [`WfsError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`WfsError::Http`] — network or TLS failure after all retries exhausted.
    /// - [`WfsError::Geo`] — response body is not a GeoJSON feature collection.
    pub async fn fetch_features(
        &self,
        endpoint: &str,
        type_name: &str,
        bbox: BoundingBox,
    ) -> Result<Vec<Feature>, WfsError> {
        let raw = self.fetch_collection(endpoint, type_name, bbox).await?;
        let collection = collection_from_value(&raw).map_err(|e| WfsError::Geo {
            context: format!("{type_name} features from {endpoint}"),
            source: e,
        })?;
        tracing::debug!(
            type_name,
            count = collection.features.len(),
            "fetched WFS features"
        );
        Ok(collection.features)
    }

    /// Fetches the raw GeoJSON document of `type_name` intersecting `bbox`.
    ///
    /// The envelope is validated (`type == "FeatureCollection"`) but member
    /// features are left untouched, so the value can be cached and re-parsed
    /// by multiple consumers.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_features`].
    pub async fn fetch_collection(
        &self,
        endpoint: &str,
        type_name: &str,
        bbox: BoundingBox,
    ) -> Result<serde_json::Value, WfsError> {
        let url = Self::get_feature_url(endpoint, type_name, bbox)?;
        let max_retries = self.max_retries;
        let backoff_base_secs = self.backoff_base_secs;

        retry_with_backoff(max_retries, backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT, "application/json,application/geo+json;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);

                    return Err(WfsError::RateLimited {
                        domain: extract_domain(&url),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(WfsError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(WfsError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                let root: serde_json::Value =
                    serde_json::from_str(&body).map_err(|e| WfsError::Geo {
                        context: format!("{type_name} features from {url}"),
                        source: siterisk_geo::GeoError::Json(e),
                    })?;

                let root_type = root.get("type").and_then(serde_json::Value::as_str);
                if root_type != Some("FeatureCollection") {
                    return Err(WfsError::Geo {
                        context: format!("{type_name} features from {url}"),
                        source: siterisk_geo::GeoError::NotAFeatureCollection(
                            root_type.map(str::to_owned),
                        ),
                    });
                }

                Ok(root)
            }
        })
        .await
    }

    /// Builds the `GetFeature` URL for the given endpoint, layer, and bbox.
    ///
    /// # Errors
    ///
    /// Returns [`WfsError::InvalidEndpoint`] if `endpoint` cannot be parsed
    /// as a URL base.
    fn get_feature_url(
        endpoint: &str,
        type_name: &str,
        bbox: BoundingBox,
    ) -> Result<String, WfsError> {
        let mut url =
            reqwest::Url::parse(endpoint).map_err(|e| WfsError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                reason: e.to_string(),
            })?;

        url.query_pairs_mut()
            .append_pair("service", "WFS")
            .append_pair("version", "2.0.0")
            .append_pair("request", "GetFeature")
            .append_pair("typeNames", type_name)
            .append_pair("outputFormat", "application/json")
            .append_pair("srsName", "EPSG:4326")
            .append_pair("bbox", &bbox.to_query_value());

        Ok(url.to_string())
    }
}

fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
