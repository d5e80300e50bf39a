use thiserror::Error;

#[derive(Debug, Error)]
pub enum WfsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GeoJSON parse error for {context}: {source}")]
    Geo {
        context: String,
        #[source]
        source: siterisk_geo::GeoError,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid WFS endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
