// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests, and benches.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::engine::RetrievalEngine;
use crate::facets::FacetTable;
use crate::query::QueryPlan;
use crate::types::{FacetKey, RawResult, Slot};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Slot the sample catalogue keeps its review score in.
pub const SCORE_SLOT: Slot = 1;
/// Slot the sample catalogue keeps `"lat:lon"` store locations in.
pub const LOCATION_SLOT: Slot = 2;

/// A Retrieval Engine that returns the same results for every plan.
///
/// Remembers the plans it was asked to run so tests can assert on them.
#[derive(Debug, Default)]
pub struct CannedEngine {
    results: Vec<RawResult>,
    tables: BTreeMap<FacetKey, FacetTable>,
    executed: RefCell<Vec<String>>,
}

impl CannedEngine {
    pub fn new(results: Vec<RawResult>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn with_table(mut self, key: impl Into<FacetKey>, table: FacetTable) -> Self {
        self.tables.insert(key.into(), table);
        self
    }

    /// Descriptions of every plan executed so far.
    pub fn executed_plans(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }
}

impl RetrievalEngine for CannedEngine {
    fn execute_query(&self, plan: &QueryPlan) -> Vec<RawResult> {
        self.executed.borrow_mut().push(plan.to_string());
        self.results.clone()
    }

    fn facet_table(&self, key: &FacetKey) -> Option<FacetTable> {
        self.tables.get(key).cloned()
    }
}

pub fn make_result(docid: u64, raw_weight: f64) -> RawResult {
    RawResult::new(docid, raw_weight)
}

/// A result with a numeric value in `slot`.
pub fn make_scored(docid: u64, raw_weight: f64, slot: Slot, value: f64) -> RawResult {
    RawResult::new(docid, raw_weight).with_value(slot, value)
}

/// A result with a `"lat:lon"` location in `slot`.
pub fn make_located(docid: u64, raw_weight: f64, slot: Slot, lat: f64, lon: f64) -> RawResult {
    RawResult::new(docid, raw_weight).with_value(slot, format!("{}:{}", lat, lon))
}

/// Three products tied-ish on text relevance with different review scores.
///
/// | docid | title  | raw | score |
/// |-------|--------|-----|-------|
/// | 1     | iPhone | 1.0 | 0     |
/// | 2     | iPad   | 1.0 | 50    |
/// | 3     | iPod   | 0.9 | 100   |
pub fn apple_catalogue() -> Vec<RawResult> {
    [(1, "iPhone", 1.0, 0.0), (2, "iPad", 1.0, 50.0), (3, "iPod", 0.9, 100.0)]
        .into_iter()
        .map(|(docid, title, raw, score)| {
            make_scored(docid, raw, SCORE_SLOT, score).with_field("title", title)
        })
        .collect()
}

/// Shops at increasing distance from central London.
pub fn london_shops() -> Vec<RawResult> {
    vec![
        make_located(10, 0.5, LOCATION_SLOT, 53.4808, -2.2426).with_field("title", "Manchester"),
        make_located(11, 0.5, LOCATION_SLOT, 51.5155, -0.0922).with_field("title", "City"),
        make_located(12, 0.5, LOCATION_SLOT, 51.7520, -1.2577).with_field("title", "Oxford"),
    ]
}

/// A numeric facet table from `(value, count)` pairs.
pub fn make_table(pairs: &[(f64, u64)]) -> FacetTable {
    pairs.iter().copied().collect()
}
