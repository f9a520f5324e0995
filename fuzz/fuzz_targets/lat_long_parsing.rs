// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for `"latitude:longitude"` parsing.
//!
//! Stored coordinates come from whatever was indexed. Parsing must never panic,
//! and anything it accepts must be finite and measure a finite, non-negative
//! distance from a fixed point.

#![no_main]

use facetrank::{Balancer, DistanceBalancer, LatLong, RawResult};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text: String = String::from_utf8_lossy(data).chars().take(128).collect();
    let text = text.as_str();

    if let Ok(point) = text.parse::<LatLong>() {
        assert!(point.latitude.is_finite());
        assert!(point.longitude.is_finite());
        assert!(LatLong::new(point.latitude, point.longitude).is_ok());

        let origin = LatLong { latitude: 0.0, longitude: 0.0 };
        let d = origin.distance_to(&point);
        assert!(d.is_finite() && d >= 0.0, "distance {} for {:?}", d, text);
    }

    // Whatever the slot holds, the contribution stays in [0, 1].
    let balancer = DistanceBalancer::new(1.0, 0, 51.5, -0.1).expect("valid centre");
    let doc = RawResult::new(1, 1.0).with_value(0, text);
    let c = balancer.contribution(&doc);
    assert!((0.0..=1.0).contains(&c), "contribution {} for {:?}", c, text);
});
