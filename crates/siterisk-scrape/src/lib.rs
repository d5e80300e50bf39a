pub mod convert;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod strategy;

pub use convert::{parse_area_sqm, parse_count, parse_text, parse_year};
pub use error::ScrapeError;
pub use extract::{extract_fields, FieldSpec, FieldValue};
pub use fetch::{build_page_client, fetch_json, fetch_page};
pub use strategy::{SiblingHop, Strategy};
