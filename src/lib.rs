// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result balancing and facet ranges for a text-search engine.
//!
//! The Retrieval Engine finds documents and counts facet values. This crate
//! decides what order the user sees them in and how numeric facets are
//! grouped:
//!
//! - results are re-ranked by blending text relevance with *balancers*,
//!   secondary signals such as distance from a point or a stored rating
//! - raw `value → count` facet tables become equal-width, evenly distributed,
//!   or caller-chosen ranges
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   plan    ┌──────────────────┐  RawResult  ┌─────────────┐
//! │  query.rs   │──────────▶│ RetrievalEngine  │────────────▶│  mixer.rs   │
//! │ (Query,     │           │  (engine.rs)     │             │ (mix,       │
//! │  QueryPlan) │           └──────────────────┘             │  mix_page)  │
//! └─────────────┘                    │ FacetTable            └─────────────┘
//!        │                           ▼                              ▲
//!        │ balancers          ┌─────────────┐                       │
//!        └───────────────────▶│ balancer/   │───── contribution ────┘
//!                             │ geo.rs      │
//!                             └─────────────┘
//!                             ┌─────────────┐
//!                             │  facets/    │  to_ranges, to_distributed_ranges,
//!                             │             │  to_fixed_ranges
//!                             └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use facetrank::{mix, Query, RawResult, StoredValueBalancer};
//!
//! let query = Query::builder("apple")
//!     .balance_factor(0.9)
//!     .balancer(StoredValueBalancer::new(0.1, 1, 0.0, 100.0)?)
//!     .build()?;
//!
//! let ranked = mix(
//!     vec![
//!         RawResult::new(1, 1.0).with_value(1, 0.0),
//!         RawResult::new(2, 1.0).with_value(1, 50.0),
//!         RawResult::new(3, 0.9).with_value(1, 100.0),
//!     ],
//!     &query,
//! );
//! assert_eq!(ranked[0].docid(), 2);
//! assert_eq!(ranked[0].weight, 1.0);
//! # Ok::<(), facetrank::Error>(())
//! ```

pub mod balancer;
pub mod config;
pub mod engine;
mod error;
pub mod facets;
pub mod geo;
pub mod mixer;
pub mod query;
pub mod testing;
mod types;

pub use balancer::{Balancer, DistanceBalancer, StoredValueBalancer};
pub use engine::{search, RetrievalEngine, SearchRequest};
pub use error::{Error, Result};
pub use facets::{FacetTable, FacetValue, FixedRange, Range};
pub use geo::{haversine_distance, LatLong};
pub use mixer::{mix, mix_page};
pub use query::{describe_query_plan, Operator, Query, QueryBuilder, QueryPlan};
pub use types::{FacetKey, Page, RawResult, ResultSet, ScoredResult, Slot, StoredValue};
