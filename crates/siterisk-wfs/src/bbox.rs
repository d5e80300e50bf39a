//! Bounding boxes for spatial queries.

const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// An axis-aligned lon/lat bounding box, EPSG:4326.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Buffer a point by `radius_m` meters on each side.
    ///
    /// The longitude delta widens with `cos(lat)` so the box spans the same
    /// physical distance east-west as north-south regardless of latitude.
    #[must_use]
    pub fn around(lat: f64, lon: f64, radius_m: f64) -> Self {
        let d_lat = radius_m / METERS_PER_DEGREE_LAT;
        let scale = lat.to_radians().cos().max(1e-12);
        let d_lon = radius_m / (METERS_PER_DEGREE_LAT * scale);
        Self {
            min_lon: lon - d_lon,
            min_lat: lat - d_lat,
            max_lon: lon + d_lon,
            max_lat: lat + d_lat,
        }
    }

    /// WFS `bbox` parameter value: `minLon,minLat,maxLon,maxLat,CRS`.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        format!(
            "{},{},{},{},EPSG:4326",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}
