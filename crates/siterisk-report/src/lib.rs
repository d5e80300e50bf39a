pub mod analysis;
pub mod builder;
pub mod error;
pub mod geocode;
pub mod orchestrator;
pub mod sources;
pub mod types;

pub use builder::ReportBuilder;
pub use error::ReportError;
pub use orchestrator::fetch_or_retrieve;
pub use types::{
    AggregatedReport, Coordinates, EnvironmentalRisk, InfrastructureSummary, LocationStats,
    PropertyAttributes,
};
