// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Equal-width ranges: chop `[min, max]` into `max_ranges` same-sized pieces.
//!
//! The boundaries are computed once, as `min + (max - min) * i / n`, and the
//! same numbers decide membership. Computing a bucket index with a division and
//! then printing bounds from a multiplication is how values end up counted in
//! a range whose printed bounds exclude them.
//!
//! A value sitting exactly on a boundary belongs to the range it opens. The
//! last range is closed on the right so `max` itself is counted.
//!
//! Counts are kept per occupied interval only, so `max_ranges` may be huge
//! when empty intervals are omitted. Keeping empty intervals materializes all
//! of them and is capped at [`MAX_KEPT_RANGES`].

use super::{check_max_ranges, FacetTable, Range};
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Largest `max_ranges` accepted with [`EmptyRanges::Keep`].
pub const MAX_KEPT_RANGES: usize = 10_000;

/// What to do with intervals no facet value fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyRanges {
    /// Leave them out; the result may have gaps.
    #[default]
    Omit,
    /// Keep them with a count of zero.
    Keep,
}

/// Equal-width ranges over the table's numeric values, empty ranges omitted.
pub fn to_ranges(table: &FacetTable, max_ranges: usize) -> Result<Vec<Range>> {
    to_ranges_with(table, max_ranges, EmptyRanges::Omit)
}

/// Equal-width ranges with an explicit policy for empty intervals.
pub fn to_ranges_with(
    table: &FacetTable,
    max_ranges: usize,
    empty: EmptyRanges,
) -> Result<Vec<Range>> {
    check_max_ranges(max_ranges)?;
    if empty == EmptyRanges::Keep && max_ranges > MAX_KEPT_RANGES {
        return Err(Error::invalid_argument(format!(
            "max_ranges {} exceeds {} when keeping empty ranges",
            max_ranges, MAX_KEPT_RANGES
        )));
    }
    let entries = table.numeric_entries()?;

    let Some((min, max)) = value_bounds(&entries) else {
        return Ok(Vec::new());
    };

    if min == max {
        let count = entries.iter().map(|(_, c)| c).sum();
        return Ok(vec![Range {
            from: Some(min),
            to: Some(max),
            count,
            to_inclusive: true,
        }]);
    }

    let n = max_ranges;
    let bounds = Boundaries { min, max, n };
    let mut counts: BTreeMap<usize, u64> = BTreeMap::new();
    if empty == EmptyRanges::Keep {
        counts.extend((0..n).map(|i| (i, 0)));
    }
    for (value, count) in &entries {
        *counts.entry(bounds.bucket_of(*value)).or_insert(0) += count;
    }

    let ranges = counts
        .into_iter()
        .filter(|(_, count)| *count > 0 || empty == EmptyRanges::Keep)
        .map(|(i, count)| {
            let last = i == n - 1;
            Range {
                from: Some(bounds.lower(i)),
                to: Some(if last { max } else { bounds.lower(i + 1) }),
                count,
                to_inclusive: last,
            }
        })
        .collect();

    Ok(ranges)
}

fn value_bounds(entries: &[(f64, u64)]) -> Option<(f64, f64)> {
    entries.iter().fold(None, |acc, (v, _)| match acc {
        None => Some((*v, *v)),
        Some((lo, hi)) => Some((lo.min(*v), hi.max(*v))),
    })
}

struct Boundaries {
    min: f64,
    max: f64,
    n: usize,
}

impl Boundaries {
    /// Lower bound of interval `i`.
    fn lower(&self, i: usize) -> f64 {
        if i == 0 {
            self.min
        } else {
            self.min + (self.max - self.min) * i as f64 / self.n as f64
        }
    }

    /// Interval index for a value in `[min, max]`: the last `i` whose lower
    /// bound is `<= value`. `lower` is monotone in `i`, so this is a binary
    /// search and agrees with the printed bounds even when neighbouring bounds
    /// round to the same number.
    fn bucket_of(&self, value: f64) -> usize {
        let (mut lo, mut hi) = (0, self.n);
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.lower(mid) <= value {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}
