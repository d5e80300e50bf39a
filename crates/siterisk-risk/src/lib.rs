//! Pure risk classification: no I/O, no suspension points.

pub mod classify;
pub mod describe;
pub mod domains;
pub mod level;
pub mod recommend;
pub mod score;
pub mod zone;

pub use classify::{classify, classify_stormwater, ClassifiedRisk};
pub use domains::{DomainProfile, RiskDomain};
pub use level::RiskLevel;
pub use recommend::CRITICAL_FLOOD_PROTECTION;
pub use score::redundancy_score;
pub use zone::RiskZone;
