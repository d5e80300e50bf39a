//! Point-in-polygon containment.

use crate::Position;

/// Ray-casting containment test against a polygon's outer ring.
///
/// The ring is an ordered sequence of `(lon, lat)` pairs; an explicit closing
/// vertex (last == first) is tolerated but not required. Holes are the
/// caller's concern and ignored for risk purposes.
///
/// Boundary convention: the crossing test pairs a strict and a non-strict
/// comparison (`(lat_i > lat) != (lat_j > lat)`), so a point exactly on an
/// edge or vertex lands on a consistent, implementation-defined side. Callers
/// must not rely on exact-boundary containment.
///
/// Holds for simple (non-self-intersecting) rings; fewer than three vertices
/// can never contain anything.
#[must_use]
pub fn point_in_polygon(lat: f64, lon: f64, ring: &[Position]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (lon_i, lat_i) = ring[i];
        let (lon_j, lat_j) = ring[j];

        if ((lat_i > lat) != (lat_j > lat))
            && (lon < (lon_j - lon_i) * (lat - lat_i) / (lat_j - lat_i) + lon_i)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit square around the origin, counter-clockwise, unclosed.
    fn unit_square() -> Vec<Position> {
        vec![(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
    }

    #[test]
    fn point_strictly_inside_convex_polygon() {
        assert!(point_in_polygon(0.0, 0.0, &unit_square()));
        assert!(point_in_polygon(0.5, -0.5, &unit_square()));
    }

    #[test]
    fn point_far_outside_bounding_box() {
        assert!(!point_in_polygon(10.0, 10.0, &unit_square()));
        assert!(!point_in_polygon(0.0, -5.0, &unit_square()));
    }

    #[test]
    fn closed_ring_behaves_like_unclosed() {
        let mut ring = unit_square();
        ring.push(ring[0]);
        assert!(point_in_polygon(0.0, 0.0, &ring));
        assert!(!point_in_polygon(2.0, 0.0, &ring));
    }

    #[test]
    fn degenerate_rings_contain_nothing() {
        assert!(!point_in_polygon(0.0, 0.0, &[]));
        assert!(!point_in_polygon(0.0, 0.0, &[(0.0, 0.0)]));
        assert!(!point_in_polygon(0.0, 0.0, &[(0.0, 0.0), (1.0, 1.0)]));
    }

    #[test]
    fn concave_polygon_notch_is_outside() {
        // Square with a notch cut into the right side.
        let ring = vec![
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 1.5),
            (2.0, 2.0),
            (4.0, 2.5),
            (4.0, 4.0),
            (0.0, 4.0),
        ];
        // Inside the notch (right of the inward vertex, between the jaws).
        assert!(!point_in_polygon(2.0, 3.5, &ring));
        // Solid interior.
        assert!(point_in_polygon(2.0, 1.0, &ring));
    }

    #[test]
    fn realistic_geographic_ring() {
        // Rough box around the Kew area (lon, lat order).
        let ring = vec![
            (145.02, -37.82),
            (145.05, -37.82),
            (145.05, -37.79),
            (145.02, -37.79),
        ];
        assert!(point_in_polygon(-37.8065, 145.0309, &ring));
        assert!(!point_in_polygon(-37.8136, 144.9631, &ring));
    }
}
