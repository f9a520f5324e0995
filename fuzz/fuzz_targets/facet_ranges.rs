// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the facet range builders.
//!
//! Equal-width and distributed ranges must account for every count exactly
//! once, whatever values the engine reports: huge, tiny, negative, or all the
//! same. Fixed ranges must never count more than the table holds per range.

#![no_main]

use arbitrary::Arbitrary;
use facetrank::facets::{
    to_distributed_ranges, to_fixed_ranges, to_ranges_with, EmptyRanges,
};
use facetrank::{FacetTable, FixedRange};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FacetInput {
    entries: Vec<(f64, u16)>,
    max_ranges: u8,
    keep_empty: bool,
    fixed: Vec<(Option<f64>, Option<f64>)>,
}

fuzz_target!(|input: FacetInput| {
    let table: FacetTable = input
        .entries
        .iter()
        .take(500)
        .filter(|(v, _)| v.is_finite())
        .map(|(v, c)| (*v, u64::from(*c)))
        .collect();
    let total = table.total_count();
    let max_ranges = usize::from(input.max_ranges);

    let empty = if input.keep_empty { EmptyRanges::Keep } else { EmptyRanges::Omit };
    match to_ranges_with(&table, max_ranges, empty) {
        Ok(ranges) => {
            assert!(ranges.len() <= max_ranges);
            assert_eq!(ranges.iter().map(|r| r.count).sum::<u64>(), total);
        }
        Err(_) => assert_eq!(max_ranges, 0),
    }

    // Only occupied intervals exist when empty ones are omitted.
    if let Ok(sparse) = to_ranges_with(&table, max_ranges << 48, EmptyRanges::Omit) {
        assert!(sparse.len() <= table.len());
        assert_eq!(sparse.iter().map(|r| r.count).sum::<u64>(), total);
    }

    match to_distributed_ranges(&table, max_ranges) {
        Ok(ranges) => {
            assert!(ranges.len() <= max_ranges);
            assert_eq!(ranges.iter().map(|r| r.count).sum::<u64>(), total);
            for pair in ranges.windows(2) {
                assert_eq!(pair[0].to, pair[1].from);
            }
        }
        Err(_) => assert_eq!(max_ranges, 0),
    }

    let fixed: Vec<FixedRange> = input
        .fixed
        .iter()
        .take(16)
        .map(|(from, to)| FixedRange { from: *from, to: *to })
        .collect();
    if let Ok(ranges) = to_fixed_ranges(&table, &fixed) {
        assert_eq!(ranges.len(), fixed.len());
        assert!(ranges.iter().all(|r| r.count <= total));
    }
});
