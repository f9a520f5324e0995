// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON request documents.
//!
//! A request file describes a whole search: text, filters, balancers, paging,
//! and which facet tables to return. It deserializes into
//! `SearchRequestConfig` and only becomes a `Query` through `QueryBuilder`, so a
//! file can never produce a query that `build()` would have refused.
//!
//! ```json
//! {
//!   "queryString": "apple ipad",
//!   "defaultOperator": "and",
//!   "filters": { "colour": ["red", "blue"] },
//!   "numericFilters": { "2": [{ "min": 0, "max": 10 }] },
//!   "balanceFactor": 0.9,
//!   "threshold": 0.1,
//!   "balancers": [
//!     { "type": "storedValue", "factor": 0.1, "slot": 1, "rangeMin": 0, "rangeMax": 100 },
//!     { "type": "distance", "factor": 0.5, "slot": 3, "centre": "51.5:-0.12" }
//!   ],
//!   "facets": ["colour", 2],
//!   "offset": 0,
//!   "limit": 20
//! }
//! ```

use crate::balancer::{Balancer, DistanceBalancer, StoredValueBalancer};
use crate::engine::SearchRequest;
use crate::error::{Error, Result};
use crate::facets::FacetTable;
use crate::query::{NumericRange, Operator, Query, QueryBuilder};
use crate::types::{FacetKey, Page, RawResult, Slot};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchRequestConfig {
    #[serde(default)]
    pub query_string: String,
    #[serde(default)]
    pub default_operator: Operator,
    #[serde(default)]
    pub filters: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub numeric_filters: BTreeMap<Slot, Vec<NumericRange>>,
    #[serde(default = "default_balance_factor")]
    pub balance_factor: f64,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub balancers: Vec<BalancerConfig>,
    #[serde(default)]
    pub facets: Vec<FacetKey>,
    #[serde(default)]
    pub offset: usize,
    /// Omitted means no limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_balance_factor() -> f64 {
    1.0
}

impl Default for SearchRequestConfig {
    fn default() -> Self {
        Self {
            query_string: String::new(),
            default_operator: Operator::default(),
            filters: BTreeMap::new(),
            numeric_filters: BTreeMap::new(),
            balance_factor: default_balance_factor(),
            threshold: 0.0,
            balancers: Vec::new(),
            facets: Vec::new(),
            offset: 0,
            limit: None,
        }
    }
}

impl SearchRequestConfig {
    pub fn query(&self) -> Result<Query> {
        Query::try_from(self)
    }

    pub fn search_request(&self) -> SearchRequest {
        SearchRequest {
            page: Page::new(self.offset, self.limit.unwrap_or(usize::MAX)),
            facets: self.facets.clone(),
        }
    }
}

/// One balancer entry, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BalancerConfig {
    /// `centre` is `"latitude:longitude"`.
    Distance {
        factor: f64,
        slot: Slot,
        centre: String,
    },
    #[serde(rename_all = "camelCase")]
    StoredValue {
        factor: f64,
        slot: Slot,
        range_min: f64,
        range_max: f64,
    },
}

impl BalancerConfig {
    pub fn build(&self) -> Result<Arc<dyn Balancer>> {
        Ok(match self {
            BalancerConfig::Distance {
                factor,
                slot,
                centre,
            } => Arc::new(DistanceBalancer::from_lat_long(*factor, *slot, centre)?),
            BalancerConfig::StoredValue {
                factor,
                slot,
                range_min,
                range_max,
            } => Arc::new(StoredValueBalancer::new(
                *factor, *slot, *range_min, *range_max,
            )?),
        })
    }
}

impl TryFrom<&SearchRequestConfig> for Query {
    type Error = Error;

    fn try_from(config: &SearchRequestConfig) -> Result<Self> {
        let mut builder = QueryBuilder::new(config.query_string.clone())
            .operator(config.default_operator)
            .balance_factor(config.balance_factor)
            .threshold(config.threshold);

        for (field, values) in &config.filters {
            if values.is_empty() {
                return Err(Error::configuration(format!(
                    "filter on {:?} accepts no values",
                    field
                )));
            }
            for value in values {
                builder = builder.filter(field.clone(), value.clone());
            }
        }
        for (slot, ranges) in &config.numeric_filters {
            for range in ranges {
                builder = builder.numeric_range(*slot, range.min, range.max);
            }
        }
        for balancer in &config.balancers {
            builder = builder.shared_balancer(balancer.build()?);
        }

        builder.build()
    }
}

impl TryFrom<SearchRequestConfig> for Query {
    type Error = Error;

    fn try_from(config: SearchRequestConfig) -> Result<Self> {
        Query::try_from(&config)
    }
}

/// Convert a signed range count from user input.
///
/// Zero and negatives are both `InvalidArgument`.
pub fn max_ranges(value: i64) -> Result<usize> {
    match usize::try_from(value) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::invalid_argument(format!(
            "max_ranges must be greater than zero, got {}",
            value
        ))),
    }
}

/// Read a request file and validate it into a query plus paging.
pub fn load(path: &Path) -> Result<(Query, SearchRequest)> {
    let config: SearchRequestConfig = read_json(path)?;
    let query = config.query()?;
    Ok((query, config.search_request()))
}

/// Read a JSON array of raw results.
pub fn load_results(path: &Path) -> Result<Vec<RawResult>> {
    read_json(path)
}

/// Read a facet table stored as a JSON object of `value: count`.
pub fn load_facet_table(path: &Path) -> Result<FacetTable> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::DecodeConfig {
        path: path.to_path_buf(),
        source,
    })
}
