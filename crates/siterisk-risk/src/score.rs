//! Composite infrastructure redundancy score.

/// Weighted redundancy score for electricity supply, in `[0, 100]`.
///
/// Four independent factors, each capped before weighting:
/// - facility count: up to 40 points at 10+ facilities;
/// - nearest facility distance: up to 30 points, stepped down with distance;
/// - category diversity: up to 20 points at 4+ distinct categories;
/// - network connectors (lines/feeders): up to 10 points at 5+.
///
/// The weighted sum is rounded and clamped.
#[must_use]
pub fn redundancy_score(
    facility_count: usize,
    nearest_distance_m: Option<f64>,
    category_count: usize,
    connector_count: usize,
) -> u8 {
    #[allow(clippy::cast_precision_loss)]
    let facility_factor = (facility_count.min(10) as f64) / 10.0 * 40.0;

    let distance_factor = match nearest_distance_m {
        Some(d) if d < 500.0 => 30.0,
        Some(d) if d < 1000.0 => 25.0,
        Some(d) if d < 2000.0 => 20.0,
        Some(d) if d < 5000.0 => 10.0,
        _ => 0.0,
    };

    #[allow(clippy::cast_precision_loss)]
    let diversity_factor = (category_count.min(4) as f64) / 4.0 * 20.0;

    #[allow(clippy::cast_precision_loss)]
    let connector_factor = (connector_count.min(5) as f64) / 5.0 * 10.0;

    let total = facility_factor + distance_factor + diversity_factor + connector_factor;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = total.round().clamp(0.0, 100.0) as u8;
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_inputs_score_zero() {
        assert_eq!(redundancy_score(0, None, 0, 0), 0);
    }

    #[test]
    fn saturated_inputs_score_one_hundred() {
        assert_eq!(redundancy_score(10, Some(100.0), 4, 5), 100);
    }

    #[test]
    fn factors_cap_independently() {
        // 50 facilities count no more than 10; 20 categories no more than 4.
        assert_eq!(
            redundancy_score(50, Some(100.0), 20, 50),
            redundancy_score(10, Some(100.0), 4, 5)
        );
    }

    #[test]
    fn distance_steps_down_with_range() {
        let near = redundancy_score(5, Some(400.0), 2, 2);
        let mid = redundancy_score(5, Some(1500.0), 2, 2);
        let far = redundancy_score(5, Some(8000.0), 2, 2);
        assert!(near > mid, "{near} <= {mid}");
        assert!(mid > far, "{mid} <= {far}");
    }

    #[test]
    fn missing_distance_contributes_nothing() {
        assert_eq!(
            redundancy_score(5, None, 2, 2),
            redundancy_score(5, Some(9000.0), 2, 2)
        );
    }

    #[test]
    fn distance_boundaries_are_lower_bound_inclusive() {
        // Exactly 500 m falls in the 500–1000 step, not the <500 one.
        let at_boundary = redundancy_score(0, Some(500.0), 0, 0);
        let below = redundancy_score(0, Some(499.0), 0, 0);
        assert_eq!(at_boundary, 25);
        assert_eq!(below, 30);
    }

    #[test]
    fn partial_counts_scale_linearly() {
        // 5 of 10 facilities → 20 of 40 points.
        assert_eq!(redundancy_score(5, None, 0, 0), 20);
        // 2 of 4 categories → 10 of 20 points.
        assert_eq!(redundancy_score(0, None, 2, 0), 10);
    }
}
