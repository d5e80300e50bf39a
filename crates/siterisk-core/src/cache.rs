//! Process-wide cache of fetched source payloads.
//!
//! Keyed by `normalized_address + "::" + source_id` (see
//! [`crate::Address::cache_key`]). Entries expire after a TTL and are
//! replaced wholesale on re-fetch, never mutated in place. The cache is the
//! only mutable state shared by concurrent sub-analyses; it is constructed
//! explicitly and passed in rather than held as a global.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Default entry lifetime: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Raw payload of one fetched source. HTML pages and structured JSON
/// endpoints funnel through the same cache and orchestration path.
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePayload {
    Html(String),
    Json(serde_json::Value),
}

impl SourcePayload {
    #[must_use]
    pub fn as_html(&self) -> Option<&str> {
        match self {
            SourcePayload::Html(markup) => Some(markup),
            SourcePayload::Json(_) => None,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            SourcePayload::Json(value) => Some(value),
            SourcePayload::Html(_) => None,
        }
    }
}

/// One cached fetch result. Owned exclusively by [`SourceCache`].
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: SourcePayload,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    #[must_use]
    pub fn new(payload: SourcePayload) -> Self {
        Self {
            payload,
            fetched_at: Utc::now(),
        }
    }
}

/// Pure wall-clock expiry check, shared by `get` and `clear_expired`.
#[must_use]
pub fn is_expired(fetched_at: DateTime<Utc>, ttl: Duration) -> bool {
    let age = Utc::now().signed_duration_since(fetched_at);
    match chrono::Duration::from_std(ttl) {
        Ok(ttl) => age > ttl,
        // TTL too large for chrono — treat as never expiring.
        Err(_) => false,
    }
}

/// Concurrent key-value store for fetched source payloads.
///
/// Last write for a given key wins; there is no merge logic. Readers and
/// writers may run from any task — the interior lock is held only for the
/// duration of a single map operation, never across awaits.
#[derive(Debug)]
pub struct SourceCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for SourceCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl SourceCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached payload for `key`, treating expired entries as
    /// misses. Expired entries are left in place for `clear_expired`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<SourcePayload> {
        let entries = self.entries.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let entry = entries.get(key)?;
        if is_expired(entry.fetched_at, self.ttl) {
            return None;
        }
        Some(entry.payload.clone())
    }

    /// Stores `payload` under `key`, overwriting any prior entry.
    pub fn set(&self, key: &str, payload: SourcePayload) {
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_owned(), CacheEntry::new(payload));
    }

    /// Whether a live (non-expired) entry exists for `key`.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, returning whether one was present.
    pub fn delete(&self, key: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.remove(key).is_some()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.clear();
    }

    /// Drops all expired entries and returns how many were evicted.
    pub fn clear_expired(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| !is_expired(entry.fetched_at, self.ttl));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
