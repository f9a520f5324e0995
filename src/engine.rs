// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The seam to the Retrieval Engine.
//!
//! Matching, filtering, and facet counting happen in the engine; this crate
//! only ranks what comes back. `search` wires the two halves together: hand the
//! engine the query plan, mix the raw results, cut the page, and attach the
//! facet tables the caller asked for.

use crate::facets::FacetTable;
use crate::mixer::mix_page;
use crate::query::{Query, QueryPlan};
use crate::types::{FacetKey, Page, RawResult, ResultSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whatever executes query plans and counts facets.
pub trait RetrievalEngine {
    /// Every matching document, in retrieval order, with stored values attached.
    fn execute_query(&self, plan: &QueryPlan) -> Vec<RawResult>;

    /// Raw value counts for a field or slot over the last match set.
    fn facet_table(&self, key: &FacetKey) -> Option<FacetTable>;
}

/// Paging and facet selection for one search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub page: Page,
    #[serde(default)]
    pub facets: Vec<FacetKey>,
}

impl SearchRequest {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            facets: Vec::new(),
        }
    }

    pub fn with_facet(mut self, key: impl Into<FacetKey>) -> Self {
        self.facets.push(key.into());
        self
    }
}

/// Run `query` against `engine` and rank the outcome.
pub fn search<E: RetrievalEngine + ?Sized>(
    engine: &E,
    query: &Query,
    request: &SearchRequest,
) -> ResultSet {
    let plan = query.plan();
    debug!(plan = %plan, "executing query plan");

    let raw_results = engine.execute_query(&plan);
    let mut result_set = mix_page(raw_results, query, request.page);

    for key in &request.facets {
        match engine.facet_table(key) {
            Some(table) => {
                result_set.facets.insert(key.clone(), table);
            }
            None => debug!(facet = %key, "engine has no facet table, skipping"),
        }
    }

    result_set
}
