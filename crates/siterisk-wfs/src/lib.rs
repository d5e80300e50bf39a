pub mod bbox;
pub mod client;
pub mod error;
mod retry;

pub use bbox::BoundingBox;
pub use client::WfsClient;
pub use error::WfsError;
