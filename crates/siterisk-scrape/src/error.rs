use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error fetching page: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("all fetch attempts failed for {url}")]
    AllAttemptsFailed { url: String },

    #[error("schema validation failed for source {source_id}: {reason}")]
    SchemaValidation { source_id: String, reason: String },
}
