// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for weight mixing.
//!
//! Engines are supposed to send raw weights in `[0, 1]`. This one doesn't:
//! NaN, infinities, negatives, and garbage slot values all come through. The
//! output must still be sorted, within `[0, 1]`, above the threshold, and topped
//! by exactly 1.0 whenever anything scored above zero.

#![no_main]

use arbitrary::Arbitrary;
use facetrank::{mix, QueryBuilder, RawResult, StoredValueBalancer};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct MixInput {
    docs: Vec<(f64, Option<f64>)>,
    balance_factor: u8,
    balancer_factor: u8,
    threshold: u8,
}

fuzz_target!(|input: MixInput| {
    let Ok(balancer) = StoredValueBalancer::new(
        f64::from(input.balancer_factor) / 255.0,
        1,
        0.0,
        100.0,
    ) else {
        return;
    };
    let threshold = f64::from(input.threshold) / 255.0;
    let Ok(query) = QueryBuilder::new("fuzz")
        .balance_factor(f64::from(input.balance_factor) / 255.0)
        .threshold(threshold)
        .balancer(balancer)
        .build()
    else {
        return;
    };

    let raw: Vec<RawResult> = input
        .docs
        .iter()
        .take(1000)
        .enumerate()
        .map(|(i, (weight, score))| {
            let doc = RawResult::new(i as u64, *weight);
            match score {
                Some(s) => doc.with_value(1, *s),
                None => doc,
            }
        })
        .collect();

    let results = mix(raw, &query);
    for pair in results.windows(2) {
        assert!(pair[0].weight >= pair[1].weight);
    }
    for r in &results {
        assert!((0.0..=1.0).contains(&r.weight), "weight {}", r.weight);
        assert!(r.weight >= threshold);
    }
    if let Some(top) = results.first() {
        assert!(top.weight == 1.0 || top.weight == 0.0);
    }
});
