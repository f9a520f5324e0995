//! Shared test utilities and fixtures.

#![allow(dead_code)]

use facetrank::{FacetTable, Range, ScoredResult};
use proptest::prelude::*;

// Re-export canonical test utilities from facetrank::testing
pub use facetrank::testing::{
    apple_catalogue, london_shops, make_located, make_result, make_scored, make_table,
    CannedEngine, LOCATION_SLOT, SCORE_SLOT,
};

// ============================================================================
// STRATEGIES
// ============================================================================

pub fn latitude() -> impl Strategy<Value = f64> {
    -90.0f64..=90.0
}

pub fn longitude() -> impl Strategy<Value = f64> {
    -180.0f64..=180.0
}

/// Numeric facet tables with distinct integer values and non-zero counts.
pub fn facet_table_strategy() -> impl Strategy<Value = FacetTable> {
    prop::collection::btree_map(-1000i32..1000, 1u64..100, 1..60)
        .prop_map(|map| map.into_iter().map(|(v, c)| (v as f64, c)).collect::<FacetTable>())
}

/// Facet tables with fractional values, duplicates allowed.
pub fn fractional_table_strategy() -> impl Strategy<Value = FacetTable> {
    prop::collection::vec((-1e6f64..1e6, 1u64..50), 1..80)
        .prop_map(|pairs| pairs.into_iter().collect::<FacetTable>())
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Weights in `[0, 1]` and sorted best first.
pub fn assert_ranked(results: &[ScoredResult]) {
    for r in results {
        assert!(
            (0.0..=1.0).contains(&r.weight),
            "doc {} has weight {} outside [0, 1]",
            r.docid(),
            r.weight
        );
    }
    for pair in results.windows(2) {
        assert!(
            pair[0].weight >= pair[1].weight,
            "doc {} ({}) ranked above doc {} ({})",
            pair[0].docid(),
            pair[0].weight,
            pair[1].docid(),
            pair[1].weight
        );
    }
}

pub fn docids(results: &[ScoredResult]) -> Vec<u64> {
    results.iter().map(ScoredResult::docid).collect()
}

pub fn counts(ranges: &[Range]) -> Vec<u64> {
    ranges.iter().map(|r| r.count).collect()
}

/// Each range starts where the previous one ended.
pub fn assert_contiguous(ranges: &[Range]) {
    for pair in ranges.windows(2) {
        assert_eq!(
            pair[0].to, pair[1].from,
            "gap between {} and {}",
            pair[0], pair[1]
        );
    }
}
