//! Haversine distance and coordinate parsing properties.

use super::common::{latitude, longitude};
use facetrank::geo::EARTH_RADIUS_METRES;
use facetrank::{haversine_distance, LatLong};
use proptest::prelude::*;
use std::f64::consts::PI;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: distance(A, B) == distance(B, A).
    #[test]
    fn prop_distance_symmetric(
        lat1 in latitude(), lon1 in longitude(),
        lat2 in latitude(), lon2 in longitude(),
    ) {
        let ab = haversine_distance(lat1, lon1, lat2, lon2);
        let ba = haversine_distance(lat2, lon2, lat1, lon1);
        prop_assert!((ab - ba).abs() < 1e-6, "{} != {}", ab, ba);
    }

    /// Property: a point is zero metres from itself.
    #[test]
    fn prop_distance_identity(lat in latitude(), lon in longitude()) {
        prop_assert_eq!(haversine_distance(lat, lon, lat, lon), 0.0);
    }

    /// Property: no two points are further apart than half the circumference.
    #[test]
    fn prop_distance_bounded(
        lat1 in latitude(), lon1 in longitude(),
        lat2 in latitude(), lon2 in longitude(),
    ) {
        let d = haversine_distance(lat1, lon1, lat2, lon2);
        prop_assert!(d >= 0.0);
        prop_assert!(d <= PI * EARTH_RADIUS_METRES + 1e-6);
    }

    /// Property: moving further along a meridian never gets closer.
    #[test]
    fn prop_distance_monotone_along_meridian(
        lon in longitude(),
        a in 0.0f64..=90.0,
        b in 0.0f64..=90.0,
    ) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let d_near = haversine_distance(0.0, lon, near, lon);
        let d_far = haversine_distance(0.0, lon, far, lon);
        prop_assert!(d_near <= d_far, "{}° gave {} m, {}° gave {} m", near, d_near, far, d_far);
    }

    /// Property: parsing arbitrary text never panics.
    #[test]
    fn prop_parse_total(s in ".{0,32}") {
        let _ = s.parse::<LatLong>();
    }

    /// Property: a formatted coordinate parses back to the same point.
    #[test]
    fn prop_display_parses_back(lat in latitude(), lon in longitude()) {
        let point = LatLong::new(lat, lon).unwrap();
        let parsed: LatLong = point.to_string().parse().unwrap();
        prop_assert_eq!(parsed, point);
    }
}

#[test]
fn test_one_degree_of_latitude() {
    // 2πR / 360
    let d = haversine_distance(0.0, 0.0, 1.0, 0.0);
    assert!((d - 111_194.93).abs() < 1.0, "got {}", d);
}
