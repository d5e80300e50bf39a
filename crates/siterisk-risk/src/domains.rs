//! Per-domain classification profiles.
//!
//! Every band table uses the same half-open, lower-bound-inclusive
//! convention: a distance maps to the first band whose upper bound it is
//! strictly below, so a value exactly on a boundary belongs to the next
//! (larger-distance) band — 50 m with bands at 50/100 is Moderate, not High.

use crate::level::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskDomain {
    Fire,
    Flood,
    Stormwater,
    Noise,
    Coastal,
    Character,
    Landslide,
}

impl RiskDomain {
    /// Human wording used in generated descriptions.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskDomain::Fire => "bushfire management",
            RiskDomain::Flood => "flood",
            RiskDomain::Stormwater => "stormwater",
            RiskDomain::Noise => "traffic noise",
            RiskDomain::Coastal => "coastal inundation",
            RiskDomain::Character => "neighbourhood character",
            RiskDomain::Landslide => "landslip",
        }
    }
}

/// Distance band table for one domain: `(upper_bound_m, level)` pairs in
/// ascending bound order, the level past the last bound, and the level when
/// no zone carries a usable distance.
pub struct DomainProfile {
    pub domain: RiskDomain,
    pub bands: &'static [(f64, RiskLevel)],
    pub beyond: RiskLevel,
    pub empty: RiskLevel,
}

impl DomainProfile {
    /// Map a distance through the band table.
    #[must_use]
    pub fn level_for_distance(&self, distance_m: f64) -> RiskLevel {
        for (upper, level) in self.bands {
            if distance_m < *upper {
                return *level;
            }
        }
        self.beyond
    }
}

pub const FIRE: DomainProfile = DomainProfile {
    domain: RiskDomain::Fire,
    bands: &[(50.0, RiskLevel::High), (100.0, RiskLevel::Moderate)],
    beyond: RiskLevel::Low,
    empty: RiskLevel::Minimal,
};

pub const FLOOD: DomainProfile = DomainProfile {
    domain: RiskDomain::Flood,
    bands: &[(100.0, RiskLevel::High), (300.0, RiskLevel::Moderate)],
    beyond: RiskLevel::Low,
    empty: RiskLevel::Minimal,
};

pub const NOISE: DomainProfile = DomainProfile {
    domain: RiskDomain::Noise,
    bands: &[(100.0, RiskLevel::High), (300.0, RiskLevel::Moderate)],
    beyond: RiskLevel::Low,
    empty: RiskLevel::Minimal,
};

pub const COASTAL: DomainProfile = DomainProfile {
    domain: RiskDomain::Coastal,
    bands: &[(200.0, RiskLevel::High), (1000.0, RiskLevel::Moderate)],
    beyond: RiskLevel::Low,
    empty: RiskLevel::Minimal,
};

pub const CHARACTER: DomainProfile = DomainProfile {
    domain: RiskDomain::Character,
    bands: &[(50.0, RiskLevel::High), (200.0, RiskLevel::Moderate)],
    beyond: RiskLevel::Low,
    empty: RiskLevel::Minimal,
};

pub const LANDSLIDE: DomainProfile = DomainProfile {
    domain: RiskDomain::Landslide,
    bands: &[(100.0, RiskLevel::High), (500.0, RiskLevel::Moderate)],
    beyond: RiskLevel::Low,
    empty: RiskLevel::Minimal,
};

/// Stormwater is inverted: retarding basins are protective, so a *close*
/// basin means *low* risk and an empty candidate set means the property has
/// no flood-detention cover at all. The `empty` level is used by
/// [`crate::classify_stormwater`], not the generic path.
pub const STORMWATER: DomainProfile = DomainProfile {
    domain: RiskDomain::Stormwater,
    bands: &[
        (500.0, RiskLevel::Minimal),
        (1000.0, RiskLevel::Low),
        (2000.0, RiskLevel::Moderate),
    ],
    beyond: RiskLevel::High,
    empty: RiskLevel::VeryHigh,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_fall_in_the_larger_distance_band() {
        assert_eq!(FIRE.level_for_distance(49.0), RiskLevel::High);
        assert_eq!(FIRE.level_for_distance(50.0), RiskLevel::Moderate);
        assert_eq!(FIRE.level_for_distance(99.0), RiskLevel::Moderate);
        assert_eq!(FIRE.level_for_distance(100.0), RiskLevel::Low);
    }

    #[test]
    fn zero_distance_is_the_most_severe_band() {
        assert_eq!(FIRE.level_for_distance(0.0), RiskLevel::High);
        assert_eq!(FLOOD.level_for_distance(0.0), RiskLevel::High);
    }

    #[test]
    fn stormwater_bands_invert() {
        assert_eq!(STORMWATER.level_for_distance(100.0), RiskLevel::Minimal);
        assert_eq!(STORMWATER.level_for_distance(500.0), RiskLevel::Low);
        assert_eq!(STORMWATER.level_for_distance(1500.0), RiskLevel::Moderate);
        assert_eq!(STORMWATER.level_for_distance(2000.0), RiskLevel::High);
    }

    #[test]
    fn all_profiles_declare_ascending_bounds() {
        for profile in [&FIRE, &FLOOD, &NOISE, &COASTAL, &CHARACTER, &LANDSLIDE, &STORMWATER] {
            let bounds: Vec<f64> = profile.bands.iter().map(|(b, _)| *b).collect();
            let mut sorted = bounds.clone();
            sorted.sort_by(f64::total_cmp);
            assert_eq!(bounds, sorted, "{:?} bands out of order", profile.domain);
        }
    }
}
