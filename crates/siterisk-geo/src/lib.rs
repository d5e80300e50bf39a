pub mod distance;
pub mod feature;
pub mod nearest;
pub mod polygon;

pub use distance::distance_meters;
pub use feature::{
    collection_from_value, parse_feature_collection, Feature, FeatureCollection, GeoError,
    Geometry,
};
pub use nearest::{distance_to_feature, is_within_feature, nearest_point_on_segment};
pub use polygon::point_in_polygon;

/// A `(lon, lat)` coordinate pair, GeoJSON axis order.
pub type Position = (f64, f64);
