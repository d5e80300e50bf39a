//! Source identifiers used in cache keys.
//!
//! One id per upstream source; WFS layers derive theirs from the layer
//! domain so every domain caches independently.

use siterisk_core::LayerDomain;

pub const GEOCODE: &str = "geocode";
pub const SUBURB_STATS: &str = "suburb_stats";
pub const PROPERTY_PAGE: &str = "property_page";

#[must_use]
pub fn wfs_source_id(domain: LayerDomain) -> String {
    format!("wfs_{domain}")
}
