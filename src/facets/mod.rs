// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Facet tables and the three ways of turning them into ranges.
//!
//! The Retrieval Engine hands over a raw `value → count` table per facet. For
//! numeric slots that's rarely what a user wants to see ("12.99: 1, 13.49: 2,
//! ..."), so the builders here fold it into labelled ranges:
//!
//! - **Equal width** (`to_ranges`): same-sized intervals over `[min, max]`
//! - **Distributed** (`to_distributed_ranges`): intervals with similar counts
//! - **Fixed** (`to_fixed_ranges`): caller-chosen intervals, counted
//!
//! All ranges are half-open `[from, to)`. The last range of the equal-width and
//! distributed builders is closed on the right (`to_inclusive`), otherwise the
//! maximum value would fall off the end.

mod distributed;
mod equal_width;
mod fixed;

pub use distributed::to_distributed_ranges;
pub use equal_width::{to_ranges, to_ranges_with, EmptyRanges, MAX_KEPT_RANGES};
pub use fixed::{to_fixed_ranges, FixedRange};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A facet value: numeric facets carry numbers, boolean facets carry text.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetValue {
    Number(f64),
    Text(String),
}

impl FacetValue {
    /// Parse a table key: anything that reads as a float becomes a number.
    pub fn from_key(key: &str) -> Self {
        match key.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => FacetValue::Number(n),
            _ => FacetValue::Text(key.to_string()),
        }
    }

    /// Numeric value, or `Parse` for text that isn't a finite number.
    pub fn as_number(&self) -> Result<f64> {
        match self {
            FacetValue::Number(n) if n.is_finite() => Ok(*n),
            FacetValue::Number(n) => Err(Error::parse(n.to_string(), "facet value is not finite")),
            FacetValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(Error::parse(s.clone(), "facet value is not numeric")),
            },
        }
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetValue::Number(n) => write!(f, "{}", n),
            FacetValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FacetValue {
    fn from(n: f64) -> Self {
        FacetValue::Number(n)
    }
}

impl From<&str> for FacetValue {
    fn from(s: &str) -> Self {
        FacetValue::Text(s.to_string())
    }
}

/// Raw facet counts for one field or slot, in the order the engine reported them.
///
/// Serialized as a JSON object (`{"5": 3, "10": 2}`), which is how the engine
/// and the CLI exchange them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct FacetTable {
    entries: Vec<(FacetValue, u64)>,
}

impl FacetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `value` (builder style).
    pub fn with(mut self, value: impl Into<FacetValue>, count: u64) -> Self {
        self.insert(value, count);
        self
    }

    pub fn insert(&mut self, value: impl Into<FacetValue>, count: u64) {
        self.entries.push((value.into(), count));
    }

    pub fn entries(&self) -> &[(FacetValue, u64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Every entry as `(number, count)`; fails on the first non-numeric value.
    pub fn numeric_entries(&self) -> Result<Vec<(f64, u64)>> {
        self.entries
            .iter()
            .map(|(value, count)| Ok((value.as_number()?, *count)))
            .collect()
    }
}

impl<V: Into<FacetValue>> FromIterator<(V, u64)> for FacetTable {
    fn from_iter<I: IntoIterator<Item = (V, u64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(v, c)| (v.into(), c)).collect(),
        }
    }
}

impl From<BTreeMap<String, u64>> for FacetTable {
    fn from(map: BTreeMap<String, u64>) -> Self {
        map.into_iter()
            .map(|(key, count)| (FacetValue::from_key(&key), count))
            .collect()
    }
}

impl From<FacetTable> for BTreeMap<String, u64> {
    fn from(table: FacetTable) -> Self {
        let mut map = BTreeMap::new();
        for (value, count) in table.entries {
            *map.entry(value.to_string()).or_insert(0) += count;
        }
        map
    }
}

/// A labelled range with the number of facet entries that fell into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    /// Inclusive lower bound; `None` is unbounded.
    pub from: Option<f64>,
    /// Exclusive upper bound (inclusive when `to_inclusive`); `None` is unbounded.
    pub to: Option<f64>,
    pub count: u64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub to_inclusive: bool,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        let above_from = self.from.map_or(true, |from| value >= from);
        let below_to = self.to.map_or(true, |to| {
            if self.to_inclusive {
                value <= to
            } else {
                value < to
            }
        });
        above_from && below_to
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some(from) => write!(f, "[{}, ", from)?,
            None => f.write_str("(-inf, ")?,
        }
        match self.to {
            Some(to) if self.to_inclusive => write!(f, "{}]", to),
            Some(to) => write!(f, "{})", to),
            None => f.write_str("+inf)"),
        }
    }
}

/// Shared `max_ranges` check for the equal-width and distributed builders.
fn check_max_ranges(max_ranges: usize) -> Result<()> {
    if max_ranges == 0 {
        return Err(Error::invalid_argument("max_ranges must be greater than zero"));
    }
    Ok(())
}
