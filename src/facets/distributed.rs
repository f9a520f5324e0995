// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Distributed ranges: similar counts per range, whatever the widths.
//!
//! Prices are the classic case: hundreds of items between 10 and 50, a handful
//! between 500 and 5000. Equal-width ranges put almost everything in the first
//! bucket; these don't.
//!
//! Greedy, single pass over the distinct values in ascending order. A bucket is
//! closed as soon as its count reaches `total / max_ranges`, so every closed
//! bucket overshoots the target by less than the count of the value that closed
//! it. The final bucket takes whatever is left.

use super::{check_max_ranges, FacetTable, Range};
use crate::error::Result;

/// Ranges with approximately equal counts, at most `max_ranges` of them.
///
/// Ranges are contiguous: each range's `to` is the next range's `from`. Fewer
/// ranges come back when there are fewer distinct values.
pub fn to_distributed_ranges(table: &FacetTable, max_ranges: usize) -> Result<Vec<Range>> {
    check_max_ranges(max_ranges)?;
    let distinct = distinct_sorted(table.numeric_entries()?);
    if distinct.is_empty() {
        return Ok(Vec::new());
    }

    let total: u64 = distinct.iter().map(|(_, c)| c).sum();
    let target = total as f64 / max_ranges as f64;

    let mut ranges = Vec::with_capacity(max_ranges.min(distinct.len()));
    let mut start: Option<f64> = None;
    let mut count = 0u64;

    for (i, (value, value_count)) in distinct.iter().enumerate() {
        let from = *start.get_or_insert(*value);
        count += value_count;

        let has_next = i + 1 < distinct.len();
        let room_for_more = ranges.len() + 1 < max_ranges;
        if has_next && room_for_more && count as f64 >= target {
            ranges.push(Range {
                from: Some(from),
                to: Some(distinct[i + 1].0),
                count,
                to_inclusive: false,
            });
            start = None;
            count = 0;
        }
    }

    if let Some(from) = start {
        let max = distinct[distinct.len() - 1].0;
        ranges.push(Range {
            from: Some(from),
            to: Some(max),
            count,
            to_inclusive: true,
        });
    }

    Ok(ranges)
}

/// Sort ascending and merge duplicate values, summing their counts.
fn distinct_sorted(mut entries: Vec<(f64, u64)>) -> Vec<(f64, u64)> {
    entries.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(f64, u64)> = Vec::with_capacity(entries.len());
    for (value, count) in entries {
        match merged.last_mut() {
            Some((last, total)) if *last == value => *total += count,
            _ => merged.push((value, count)),
        }
    }
    merged
}
