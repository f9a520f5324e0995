//! Facet range properties.
//!
//! - Equal width: counts sum to the table total, every value in exactly one range
//! - Distributed: contiguous, conserving, each closed bucket overshoots by less
//!   than one entry's count
//! - Fixed: unbounded sides include everything on the open side

use super::common::{assert_contiguous, facet_table_strategy, fractional_table_strategy};
use facetrank::facets::{
    to_distributed_ranges, to_fixed_ranges, to_ranges, to_ranges_with, EmptyRanges,
};
use facetrank::FixedRange;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: equal-width counts sum to the table total.
    #[test]
    fn prop_equal_width_conserves_counts(
        table in fractional_table_strategy(),
        max_ranges in 1usize..20,
    ) {
        let total = table.total_count();
        let omitted = to_ranges(&table, max_ranges).unwrap();
        let kept = to_ranges_with(&table, max_ranges, EmptyRanges::Keep).unwrap();

        prop_assert_eq!(omitted.iter().map(|r| r.count).sum::<u64>(), total);
        prop_assert_eq!(kept.iter().map(|r| r.count).sum::<u64>(), total);
        prop_assert!(kept.len() <= max_ranges);
        prop_assert!(omitted.iter().all(|r| r.count > 0));
    }

    /// Property: every facet value lands in exactly one equal-width range,
    /// and that range's count includes it.
    #[test]
    fn prop_equal_width_partitions_values(
        table in fractional_table_strategy(),
        max_ranges in 1usize..20,
    ) {
        let ranges = to_ranges_with(&table, max_ranges, EmptyRanges::Keep).unwrap();
        for (value, count) in table.numeric_entries().unwrap() {
            let holders: Vec<_> = ranges.iter().filter(|r| r.contains(value)).collect();
            prop_assert_eq!(holders.len(), 1, "value {} held by {} ranges", value, holders.len());
            prop_assert!(holders[0].count >= count);
        }
    }

    /// Property: distributed ranges are contiguous, conserve counts, and stay
    /// within max_ranges.
    #[test]
    fn prop_distributed_shape(
        table in facet_table_strategy(),
        max_ranges in 1usize..12,
    ) {
        let ranges = to_distributed_ranges(&table, max_ranges).unwrap();
        prop_assert!(!ranges.is_empty());
        prop_assert!(ranges.len() <= max_ranges);
        prop_assert_eq!(ranges.iter().map(|r| r.count).sum::<u64>(), table.total_count());
        assert_contiguous(&ranges);

        let last = ranges.len() - 1;
        prop_assert!(ranges[last].to_inclusive);
        prop_assert!(ranges[..last].iter().all(|r| !r.to_inclusive));
    }

    /// Property: every bucket but the last is within one entry's count of the target.
    #[test]
    fn prop_distributed_balance(
        table in facet_table_strategy(),
        max_ranges in 1usize..12,
    ) {
        let ranges = to_distributed_ranges(&table, max_ranges).unwrap();
        let target = table.total_count() as f64 / max_ranges as f64;
        let largest = table.entries().iter().map(|(_, c)| *c).max().unwrap_or(0);

        for range in &ranges[..ranges.len() - 1] {
            prop_assert!(range.count as f64 >= target, "{} under target {}", range, target);
            prop_assert!(
                (range.count as f64) < target + largest as f64,
                "{} overshoots target {} by more than {}",
                range, target, largest
            );
        }
    }

    /// Property: `..x` counts every value below x and `x..` everything else.
    #[test]
    fn prop_fixed_unbounded_sides(
        table in facet_table_strategy(),
        split in -1000.0f64..1000.0,
    ) {
        let ranges = [
            FixedRange::below(split).unwrap(),
            FixedRange::at_least(split).unwrap(),
            FixedRange::default(),
        ];
        let out = to_fixed_ranges(&table, &ranges).unwrap();
        let entries = table.numeric_entries().unwrap();

        let below: u64 = entries.iter().filter(|(v, _)| *v < split).map(|(_, c)| c).sum();
        prop_assert_eq!(out[0].count, below);
        prop_assert_eq!(out[0].count + out[1].count, table.total_count());
        prop_assert_eq!(out[2].count, table.total_count());
    }
}
