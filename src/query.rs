// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query configuration and the plan handed to the Retrieval Engine.
//!
//! A `Query` is built once through `QueryBuilder`, validated in `build()`, and
//! immutable afterwards. There are no setters: to change a threshold mid-session
//! you call `to_builder()`, tweak, and build a new one. That way a search never
//! runs against a query whose balance factor was half-updated.
//!
//! # Invariants (checked in `build`)
//!
//! - `query_string` and `filters` cannot both be empty
//! - `balance_factor` and `threshold` are finite and in `[0, 1]`
//! - every numeric range is finite with `min < max`
//!
//! # Filter semantics
//!
//! Boolean filters: values for one field are OR-ed, fields are AND-ed.
//! Numeric filters: ranges are `[min, max)`; ranges on one slot are OR-ed,
//! slots are AND-ed. Evaluating them is the engine's job; this module only
//! describes them.

use crate::balancer::Balancer;
use crate::error::{Error, Result};
use crate::types::Slot;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// How the terms of the query string are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Any term matches (default).
    #[default]
    Or,
    /// All terms must match.
    And,
    /// All terms, adjacent and in order.
    Phrase,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::Or => "OR",
            Operator::And => "AND",
            Operator::Phrase => "PHRASE",
        })
    }
}

/// A numeric filter range, `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}

/// A validated, immutable search query.
#[derive(Debug, Clone)]
pub struct Query {
    query_string: String,
    default_operator: Operator,
    filters: BTreeMap<String, BTreeSet<String>>,
    numeric_filters: BTreeMap<Slot, Vec<NumericRange>>,
    balance_factor: f64,
    threshold: f64,
    balancers: Vec<Arc<dyn Balancer>>,
}

impl Query {
    /// Start a query for the given text.
    pub fn builder(query_string: impl Into<String>) -> QueryBuilder {
        QueryBuilder::new(query_string)
    }

    /// Copy this query's configuration into a builder for an explicit rebuild.
    pub fn to_builder(&self) -> QueryBuilder {
        QueryBuilder {
            query_string: self.query_string.clone(),
            default_operator: self.default_operator,
            filters: self.filters.clone(),
            numeric_filters: self.numeric_filters.clone(),
            balance_factor: self.balance_factor,
            threshold: self.threshold,
            balancers: self.balancers.clone(),
        }
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    pub fn default_operator(&self) -> Operator {
        self.default_operator
    }

    pub fn filters(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.filters
    }

    pub fn numeric_filters(&self) -> &BTreeMap<Slot, Vec<NumericRange>> {
        &self.numeric_filters
    }

    /// Weight given to text relevance when mixing.
    pub fn balance_factor(&self) -> f64 {
        self.balance_factor
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn balancers(&self) -> &[Arc<dyn Balancer>] {
        &self.balancers
    }

    /// Query string split into terms. Stemming is left to the engine.
    pub fn terms(&self) -> Vec<String> {
        self.query_string
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// The composed query tree.
    pub fn plan(&self) -> QueryPlan {
        let terms = self.terms();
        let text = if terms.is_empty() {
            None
        } else {
            let node = PlanNode::Terms {
                operator: self.default_operator,
                terms,
            };
            Some(scaled(self.balance_factor, node))
        };

        let mut weighted: Vec<PlanNode> = text.into_iter().collect();
        weighted.extend(
            self.balancers
                .iter()
                .map(|b| scaled(b.factor(), PlanNode::Balancer(b.describe()))),
        );
        let query = match weighted.len() {
            0 => PlanNode::MatchAll,
            1 => weighted.remove(0),
            _ => PlanNode::Or(weighted),
        };

        let mut filters: Vec<PlanNode> = self
            .filters
            .iter()
            .map(|(field, values)| PlanNode::FieldFilter {
                field: field.clone(),
                values: values.iter().cloned().collect(),
            })
            .collect();
        filters.extend(
            self.numeric_filters
                .iter()
                .map(|(slot, ranges)| PlanNode::NumericFilter {
                    slot: *slot,
                    ranges: ranges.clone(),
                }),
        );

        let root = match filters.len() {
            0 => query,
            1 => PlanNode::Filter {
                query: Box::new(query),
                filter: Box::new(filters.remove(0)),
            },
            _ => PlanNode::Filter {
                query: Box::new(query),
                filter: Box::new(PlanNode::And(filters)),
            },
        };

        QueryPlan { root }
    }
}

fn scaled(factor: f64, node: PlanNode) -> PlanNode {
    if factor == 1.0 {
        node
    } else {
        PlanNode::Scaled {
            factor,
            node: Box::new(node),
        }
    }
}

/// Diagnostic text for the composed query tree.
pub fn describe_query_plan(query: &Query) -> String {
    query.plan().to_string()
}

/// Builder for `Query`. Nothing is checked until `build()`.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query_string: String,
    default_operator: Operator,
    filters: BTreeMap<String, BTreeSet<String>>,
    numeric_filters: BTreeMap<Slot, Vec<NumericRange>>,
    balance_factor: f64,
    threshold: f64,
    balancers: Vec<Arc<dyn Balancer>>,
}

impl QueryBuilder {
    pub fn new(query_string: impl Into<String>) -> Self {
        Self {
            query_string: query_string.into(),
            default_operator: Operator::Or,
            filters: BTreeMap::new(),
            numeric_filters: BTreeMap::new(),
            balance_factor: 1.0,
            threshold: 0.0,
            balancers: Vec::new(),
        }
    }

    /// A query with no text, matching on filters alone.
    pub fn filters_only() -> Self {
        Self::new(String::new())
    }

    pub fn query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = query_string.into();
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.default_operator = operator;
        self
    }

    /// Accept `value` for boolean field `field`.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters
            .entry(field.into())
            .or_default()
            .insert(value.into());
        self
    }

    /// Replace all boolean filters.
    pub fn filters(mut self, filters: BTreeMap<String, BTreeSet<String>>) -> Self {
        self.filters = filters;
        self
    }

    /// Add a `[min, max)` range for `slot`, OR-ed with the slot's other ranges.
    pub fn numeric_range(mut self, slot: Slot, min: f64, max: f64) -> Self {
        self.numeric_filters
            .entry(slot)
            .or_default()
            .push(NumericRange { min, max });
        self
    }

    pub fn clear_numeric_ranges(mut self) -> Self {
        self.numeric_filters.clear();
        self
    }

    /// Weight given to text relevance (default 1.0).
    pub fn balance_factor(mut self, factor: f64) -> Self {
        self.balance_factor = factor;
        self
    }

    /// Minimum final weight (default 0.0, everything passes).
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn balancer(mut self, balancer: impl Balancer + 'static) -> Self {
        self.balancers.push(Arc::new(balancer));
        self
    }

    /// Add an already-shared balancer.
    pub fn shared_balancer(mut self, balancer: Arc<dyn Balancer>) -> Self {
        self.balancers.push(balancer);
        self
    }

    pub fn clear_balancers(mut self) -> Self {
        self.balancers.clear();
        self
    }

    pub fn build(self) -> Result<Query> {
        if self.query_string.trim().is_empty() && self.filters.is_empty() {
            return Err(Error::configuration(
                "query string and filters cannot both be empty",
            ));
        }
        check_unit_interval("balance_factor", self.balance_factor)?;
        check_unit_interval("threshold", self.threshold)?;
        for balancer in &self.balancers {
            check_unit_interval("balancer factor", balancer.factor())?;
        }

        for (field, values) in &self.filters {
            if field.trim().is_empty() {
                return Err(Error::configuration("filter field names must be non-empty"));
            }
            if values.is_empty() {
                return Err(Error::configuration(format!(
                    "filter on {:?} accepts no values",
                    field
                )));
            }
        }

        for (slot, ranges) in &self.numeric_filters {
            for range in ranges {
                if !range.min.is_finite() || !range.max.is_finite() || range.min >= range.max {
                    return Err(Error::configuration(format!(
                        "numeric range {} on slot {} needs finite bounds with min < max",
                        range, slot
                    )));
                }
            }
        }

        Ok(Query {
            query_string: self.query_string,
            default_operator: self.default_operator,
            filters: self.filters,
            numeric_filters: self.numeric_filters,
            balance_factor: self.balance_factor,
            threshold: self.threshold,
            balancers: self.balancers,
        })
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::configuration(format!(
            "{} must be between 0.0 and 1.0, got {}",
            name, value
        )));
    }
    Ok(())
}

/// The composed query tree the Retrieval Engine executes.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub root: PlanNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanNode {
    /// Every document (filter-only queries).
    MatchAll,
    /// Query-string terms joined by the default operator.
    Terms { operator: Operator, terms: Vec<String> },
    /// A subtree whose weight is multiplied by `factor`.
    Scaled { factor: f64, node: Box<PlanNode> },
    /// A balancer's weighting leaf, by description.
    Balancer(String),
    Or(Vec<PlanNode>),
    And(Vec<PlanNode>),
    /// Boolean filter: any of `values` for `field`.
    FieldFilter { field: String, values: Vec<String> },
    /// Numeric filter: any of `ranges` for `slot`.
    NumericFilter { slot: Slot, ranges: Vec<NumericRange> },
    /// Weighted `query` restricted to documents matching `filter`.
    Filter {
        query: Box<PlanNode>,
        filter: Box<PlanNode>,
    },
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Query({})", self.root)
    }
}

impl fmt::Display for PlanNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanNode::MatchAll => f.write_str("<alldocuments>"),
            PlanNode::Terms { operator, terms } => match (operator, terms.as_slice()) {
                (_, [single]) => f.write_str(single),
                (Operator::Phrase, _) => write!(f, "\"{}\"", terms.join(" ")),
                _ => write!(f, "({})", terms.join(&format!(" {} ", operator))),
            },
            PlanNode::Scaled { factor, node } => write!(f, "({} * {})", factor, node),
            PlanNode::Balancer(description) => f.write_str(description),
            PlanNode::Or(nodes) => write_joined(f, nodes, "OR"),
            PlanNode::And(nodes) => write_joined(f, nodes, "AND"),
            PlanNode::FieldFilter { field, values } => {
                let parts: Vec<String> = values.iter().map(|v| format!("{}:{}", field, v)).collect();
                write_parts(f, &parts, "OR")
            }
            PlanNode::NumericFilter { slot, ranges } => {
                let parts: Vec<String> = ranges.iter().map(|r| format!("{}:{}", slot, r)).collect();
                write_parts(f, &parts, "OR")
            }
            PlanNode::Filter { query, filter } => write!(f, "({} FILTER {})", query, filter),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, nodes: &[PlanNode], op: &str) -> fmt::Result {
    let parts: Vec<String> = nodes.iter().map(ToString::to_string).collect();
    write_parts(f, &parts, op)
}

fn write_parts(f: &mut fmt::Formatter<'_>, parts: &[String], op: &str) -> fmt::Result {
    match parts {
        [single] => f.write_str(single),
        _ => write!(f, "({})", parts.join(&format!(" {} ", op))),
    }
}
