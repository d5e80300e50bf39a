//! The fetch-or-retrieve contract between sub-analyses and the source cache.

use std::future::Future;

use siterisk_core::{Address, SourceCache, SourcePayload};

use crate::error::ReportError;

/// Fetch a source through the cache.
///
/// On a cache hit the payload is returned without invoking `fetcher`. On a
/// miss, `fetcher` runs and its result is stored **only on success** — a
/// failed fetch never populates the cache, so the next caller re-fetches.
///
/// The orchestrator is retry-agnostic: any retry/backoff policy lives
/// inside the fetcher, and any error it returns is terminal for this call.
///
/// # Errors
///
/// Propagates the fetcher's error unchanged.
pub async fn fetch_or_retrieve<F, Fut>(
    cache: &SourceCache,
    address: &Address,
    source_id: &str,
    fetcher: F,
) -> Result<SourcePayload, ReportError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<SourcePayload, ReportError>>,
{
    let key = address.cache_key(source_id);

    if let Some(payload) = cache.get(&key) {
        tracing::debug!(source = source_id, "cache hit");
        return Ok(payload);
    }

    let payload = fetcher().await?;
    cache.set(&key, payload.clone());
    Ok(payload)
}
