//! Balancer contribution properties.
//!
//! Whatever a document stores, a balancer's contribution stays in `[0, 1]`
//! and moves in the right direction.

use super::common::{latitude, longitude, make_located, make_scored};
use facetrank::{Balancer, DistanceBalancer, RawResult, StoredValueBalancer};
use proptest::prelude::*;

fn percent() -> StoredValueBalancer {
    StoredValueBalancer::new(1.0, 1, 0.0, 100.0).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: stored-value contributions are clamped into [0, 1].
    #[test]
    fn prop_stored_value_bounded(value in -1e9f64..1e9) {
        let c = percent().contribution(&make_scored(1, 1.0, 1, value));
        prop_assert!((0.0..=1.0).contains(&c));
    }

    /// Property: a larger stored value never contributes less.
    #[test]
    fn prop_stored_value_monotone(a in -50.0f64..150.0, b in -50.0f64..150.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let balancer = percent();
        prop_assert!(
            balancer.contribution(&make_scored(1, 1.0, 1, lo))
                <= balancer.contribution(&make_scored(2, 1.0, 1, hi))
        );
    }

    /// Property: the balancer's range endpoints map to exactly 0 and 1.
    #[test]
    fn prop_stored_value_endpoints(min in -1e4f64..1e4, width in 1e-3f64..1e4) {
        let max = min + width;
        prop_assume!(min < max);
        let balancer = StoredValueBalancer::new(1.0, 0, min, max).unwrap();
        prop_assert_eq!(balancer.normalize(min), 0.0);
        prop_assert_eq!(balancer.normalize(max), 1.0);
    }

    /// Property: distance contributions are in (0, 1].
    #[test]
    fn prop_distance_bounded(
        c_lat in latitude(), c_lon in longitude(),
        d_lat in latitude(), d_lon in longitude(),
    ) {
        let balancer = DistanceBalancer::new(1.0, 2, c_lat, c_lon).unwrap();
        let c = balancer.contribution(&make_located(1, 1.0, 2, d_lat, d_lon));
        prop_assert!(c > 0.0 && c <= 1.0, "contribution {}", c);
    }

    /// Property: a document further north of an equatorial centre scores no higher.
    #[test]
    fn prop_distance_decreasing(a in 0.0f64..=90.0, b in 0.0f64..=90.0) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let balancer = DistanceBalancer::new(1.0, 2, 0.0, 0.0).unwrap();
        let near_score = balancer.contribution(&make_located(1, 1.0, 2, near, 0.0));
        let far_score = balancer.contribution(&make_located(2, 1.0, 2, far, 0.0));
        prop_assert!(near_score >= far_score);
    }

    /// Property: garbage in a slot contributes 0 rather than failing.
    #[test]
    fn prop_garbage_contributes_zero(text in "[a-z ]{0,16}") {
        let doc = RawResult::new(1, 1.0).with_value(2, text.as_str());
        let balancer = DistanceBalancer::new(1.0, 2, 10.0, 10.0).unwrap();
        prop_assert_eq!(balancer.contribution(&doc), 0.0);
    }

    /// Property: weighted contribution is factor × contribution.
    #[test]
    fn prop_weighted_contribution(factor in 0.0f64..=1.0, value in 0.0f64..100.0) {
        let balancer = StoredValueBalancer::new(factor, 1, 0.0, 100.0).unwrap();
        let doc = make_scored(1, 1.0, 1, value);
        prop_assert_eq!(
            balancer.weighted_contribution(&doc),
            factor * balancer.contribution(&doc)
        );
    }
}
