pub mod address;
pub mod app_config;
pub mod cache;
pub mod config;
pub mod sources;

use thiserror::Error;

pub use address::Address;
pub use app_config::{AppConfig, Environment};
pub use cache::{is_expired, CacheEntry, SourceCache, SourcePayload, DEFAULT_TTL};
pub use config::{load_app_config, load_app_config_from_env};
pub use sources::{load_sources, LayerDomain, PageSources, SourceCatalog, WfsLayer};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("cannot read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse sources file: {0}")]
    SourcesFileParse(#[from] serde_yaml::Error),

    #[error("sources validation failed: {0}")]
    Validation(String),
}
