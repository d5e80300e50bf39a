//! Nearest-point and point-to-feature distance primitives.
//!
//! Segments are parametrized in a local equirectangular frame centered on the
//! query point; the longitude scale carries a `cos(lat)` correction so the
//! frame stays ~metric at Australian latitudes. Final distances go through
//! the haversine so they agree with [`distance_meters`].

use crate::distance::distance_meters;
use crate::feature::Geometry;
use crate::polygon::point_in_polygon;
use crate::Position;

const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Closest point on the segment `a`–`b` to `(lat, lon)`, with its distance
/// in meters.
///
/// The segment is parametrized by `t ∈ [0, 1]` and `t` is clamped, so the
/// result is always on the segment (an endpoint when the perpendicular foot
/// falls outside).
#[must_use]
pub fn nearest_point_on_segment(lat: f64, lon: f64, a: Position, b: Position) -> (Position, f64) {
    let scale = lat.to_radians().cos().max(1e-12);
    let to_plane = |p: Position| -> (f64, f64) {
        (
            (p.0 - lon) * METERS_PER_DEGREE_LAT * scale,
            (p.1 - lat) * METERS_PER_DEGREE_LAT,
        )
    };

    let (ax, ay) = to_plane(a);
    let (bx, by) = to_plane(b);
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq == 0.0 {
        // Degenerate segment: both endpoints coincide.
        0.0
    } else {
        let t = -(ax * dx + ay * dy) / len_sq;
        t.clamp(0.0, 1.0)
    };

    let nearest = (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);
    let dist = distance_meters(lat, lon, nearest.1, nearest.0);
    (nearest, dist)
}

/// Minimum distance from `(lat, lon)` to the edges of `ring`, in meters.
///
/// The ring is treated as closed whether or not it carries an explicit
/// closing vertex. Returns `None` for an empty ring.
#[must_use]
pub fn distance_to_ring(lat: f64, lon: f64, ring: &[Position]) -> Option<f64> {
    match ring {
        [] => None,
        [only] => Some(distance_meters(lat, lon, only.1, only.0)),
        _ => {
            let mut min = f64::INFINITY;
            for i in 0..ring.len() {
                let a = ring[i];
                let b = ring[(i + 1) % ring.len()];
                let (_, d) = nearest_point_on_segment(lat, lon, a, b);
                if d < min {
                    min = d;
                }
            }
            Some(min)
        }
    }
}

fn distance_to_path(lat: f64, lon: f64, path: &[Position]) -> Option<f64> {
    match path {
        [] => None,
        [only] => Some(distance_meters(lat, lon, only.1, only.0)),
        _ => path
            .windows(2)
            .map(|pair| nearest_point_on_segment(lat, lon, pair[0], pair[1]).1)
            .min_by(f64::total_cmp),
    }
}

/// Whether `(lat, lon)` lies inside the geometry (polygon membership only;
/// points and lines never contain a point).
#[must_use]
pub fn is_within_feature(lat: f64, lon: f64, geometry: &Geometry) -> bool {
    geometry
        .outer_rings()
        .iter()
        .any(|ring| point_in_polygon(lat, lon, ring))
}

/// Minimum distance in meters from `(lat, lon)` to `geometry`.
///
/// A point inside a polygon is at distance exactly `0.0`; the edge scan is
/// skipped for that feature. Multi-geometries take the minimum over their
/// members. Returns `None` only for geometries with no coordinates.
#[must_use]
pub fn distance_to_feature(lat: f64, lon: f64, geometry: &Geometry) -> Option<f64> {
    match geometry {
        Geometry::Point((p_lon, p_lat)) => Some(distance_meters(lat, lon, *p_lat, *p_lon)),
        Geometry::LineString(path) => distance_to_path(lat, lon, path),
        Geometry::MultiLineString(paths) => paths
            .iter()
            .filter_map(|path| distance_to_path(lat, lon, path))
            .min_by(f64::total_cmp),
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => {
            if is_within_feature(lat, lon, geometry) {
                return Some(0.0);
            }
            geometry
                .outer_rings()
                .iter()
                .filter_map(|ring| distance_to_ring(lat, lon, ring))
                .min_by(f64::total_cmp)
        }
    }
}
