// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed ranges: the caller picks the intervals, we count.
//!
//! Either bound may be missing ("under 10", "100 and over"). Ranges are
//! evaluated independently, so overlapping ranges are fine and a value can be
//! counted in several of them. Output order is input order.

use super::{FacetTable, Range};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A caller-supplied `[from, to)` interval; `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedRange {
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
}

impl FixedRange {
    /// Build a range, rejecting NaN bounds and `from >= to`.
    pub fn new(from: Option<f64>, to: Option<f64>) -> Result<Self> {
        let range = Self { from, to };
        range.validate()?;
        Ok(range)
    }

    pub fn between(from: f64, to: f64) -> Result<Self> {
        Self::new(Some(from), Some(to))
    }

    pub fn below(to: f64) -> Result<Self> {
        Self::new(None, Some(to))
    }

    pub fn at_least(from: f64) -> Result<Self> {
        Self::new(Some(from), None)
    }

    pub fn validate(&self) -> Result<()> {
        if self.from.is_some_and(f64::is_nan) || self.to.is_some_and(f64::is_nan) {
            return Err(Error::invalid_argument(format!(
                "range {} has a NaN bound",
                self
            )));
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from >= to {
                return Err(Error::invalid_argument(format!(
                    "range {} must have from < to",
                    self
                )));
            }
        }
        Ok(())
    }

    pub fn contains(&self, value: f64) -> bool {
        self.from.map_or(true, |from| value >= from) && self.to.map_or(true, |to| value < to)
    }
}

/// Parses `"a..b"`, `"..b"`, `"a.."`, and `".."`.
impl FromStr for FixedRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (from, to) = s
            .trim()
            .split_once("..")
            .ok_or_else(|| Error::parse(s, "expected \"from..to\""))?;
        let from = parse_bound(s, from)?;
        let to = parse_bound(s, to)?;
        FixedRange::new(from, to)
    }
}

fn parse_bound(input: &str, bound: &str) -> Result<Option<f64>> {
    let bound = bound.trim();
    if bound.is_empty() {
        return Ok(None);
    }
    match bound.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(Error::parse(
            input,
            format!("bound {:?} is not a finite number", bound),
        )),
    }
}

impl fmt::Display for FixedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(from) = self.from {
            write!(f, "{}", from)?;
        }
        f.write_str("..")?;
        if let Some(to) = self.to {
            write!(f, "{}", to)?;
        }
        Ok(())
    }
}

/// Count the table's entries inside each supplied range.
///
/// Every range is validated before anything is counted, so a bad range fails
/// the whole call rather than producing a partial answer.
pub fn to_fixed_ranges(table: &FacetTable, ranges: &[FixedRange]) -> Result<Vec<Range>> {
    for range in ranges {
        range.validate()?;
    }
    let entries = table.numeric_entries()?;

    Ok(ranges
        .iter()
        .map(|range| Range {
            from: range.from,
            to: range.to,
            count: entries
                .iter()
                .filter(|(value, _)| range.contains(*value))
                .map(|(_, count)| count)
                .sum(),
            to_inclusive: false,
        })
        .collect())
}
