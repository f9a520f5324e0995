// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Weight mixing: blend text relevance with balancer signals, then rank.
//!
//! For each raw result:
//!
//! ```text
//! combined = balance_factor × raw_weight + Σ balancer.factor × contribution
//! ```
//!
//! The whole set is then rescaled by its maximum so the best result sits at
//! exactly `1.0`, results under the query threshold are dropped, and the rest
//! are sorted by weight, best first. Ties keep retrieval order.
//!
//! Worked example (text `0.9`, stored-value balancer `0.1` over `0..100`):
//!
//! | Doc    | raw  | stored | combined | final |
//! |--------|------|--------|----------|-------|
//! | iPhone | 1.0  | 0      | 0.900    | 0.947 |
//! | iPad   | 1.0  | 50     | 0.950    | 1.000 |
//! | iPod   | 0.9  | 100    | 0.910    | 0.958 |
//!
//! The iPad was tied on text relevance and wins on the balancer.

use crate::query::Query;
use crate::types::{Page, RawResult, ResultSet, ScoredResult};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Blend, rescale, threshold, and sort. Consumes the engine's results.
pub fn mix(raw_results: Vec<RawResult>, query: &Query) -> Vec<ScoredResult> {
    let balance_factor = query.balance_factor();
    let balancers = query.balancers();

    let mut scored: Vec<ScoredResult> = raw_results
        .into_iter()
        .map(|raw| {
            let text = sanitize_raw_weight(&raw);
            let signals: f64 = balancers
                .iter()
                .map(|balancer| balancer.weighted_contribution(&raw))
                .sum();
            ScoredResult {
                weight: balance_factor * text + signals,
                raw,
            }
        })
        .collect();

    let max_weight = scored.iter().map(|r| r.weight).fold(0.0_f64, f64::max);
    debug!(results = scored.len(), max_weight, "mixing weights");

    // max == 0 means every combined weight was 0; leave them there.
    if max_weight > 0.0 {
        for result in &mut scored {
            result.weight /= max_weight;
        }
    }

    let threshold = query.threshold();
    scored.retain(|r| r.weight >= threshold);

    // sort_by is stable: equal weights keep retrieval order.
    scored.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    scored
}

/// `mix`, then cut out one page. `match_count` counts everything that
/// passed the threshold; `item_count` counts what's on the page.
pub fn mix_page(raw_results: Vec<RawResult>, query: &Query, page: Page) -> ResultSet {
    let ranked = mix(raw_results, query);
    let match_count = ranked.len();
    let results: Vec<ScoredResult> = ranked
        .into_iter()
        .skip(page.offset)
        .take(page.limit)
        .collect();

    ResultSet {
        item_count: results.len(),
        match_count,
        results,
        facets: BTreeMap::new(),
    }
}

/// Engines promise `[0, 1]`. Anything else is clamped (NaN to 0) and logged.
fn sanitize_raw_weight(raw: &RawResult) -> f64 {
    let weight = raw.raw_weight;
    if (0.0..=1.0).contains(&weight) {
        return weight;
    }
    warn!(
        docid = raw.docid,
        raw_weight = weight,
        "raw weight outside [0, 1], clamping"
    );
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}
