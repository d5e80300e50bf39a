use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("WFS error: {0}")]
    Wfs(#[from] siterisk_wfs::WfsError),

    #[error("scrape error: {0}")]
    Scrape(#[from] siterisk_scrape::ScrapeError),

    #[error("geometry error: {0}")]
    Geo(#[from] siterisk_geo::GeoError),

    #[error("no layer configured for domain {domain}")]
    LayerNotConfigured { domain: String },

    #[error("cached payload for {source_id} has the wrong shape")]
    WrongPayload { source_id: String },

    #[error("geocoding failed: {reason}")]
    Geocode { reason: String },

    #[error("no coordinates available for the property")]
    NoCoordinates,
}
