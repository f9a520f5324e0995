// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the facetrank command-line interface.
//!
//! Four subcommands over JSON inputs: `mix` ranks a results file with a
//! request's balancers, `facets` turns a facet table into ranges, `distance`
//! measures between two coordinates, and `describe` prints a request's query
//! plan. `--json` swaps the boxed terminal output for machine-readable JSON.

pub mod display;

use clap::{Parser, Subcommand};
use facetrank::facets::FixedRange;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "facetrank",
    about = "Balance search results and build facet ranges",
    version
)]
pub struct Cli {
    /// Print JSON instead of the boxed terminal display
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank raw results with a request's text weight and balancers
    Mix {
        /// Request file (queryString, balancers, threshold, ...)
        request: PathBuf,

        /// JSON array of raw results from the Retrieval Engine
        results: PathBuf,

        /// Skip this many ranked results (overrides the request)
        #[arg(long)]
        offset: Option<usize>,

        /// Show at most this many results (overrides the request)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Build ranges from a facet table (`{"value": count, ...}`)
    Facets {
        /// Facet table file
        table: PathBuf,

        #[command(subcommand)]
        mode: FacetMode,
    },

    /// Haversine distance between two "latitude:longitude" points
    Distance {
        #[arg(allow_hyphen_values = true)]
        from: String,

        #[arg(allow_hyphen_values = true)]
        to: String,
    },

    /// Print the query plan a request would hand to the Retrieval Engine
    Describe {
        /// Request file
        request: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum FacetMode {
    /// Same-width intervals over [min, max]
    Equal {
        #[arg(long, allow_negative_numbers = true)]
        max_ranges: i64,

        /// Keep intervals no value fell into
        #[arg(long)]
        keep_empty: bool,
    },

    /// Intervals holding similar counts
    Distributed {
        #[arg(long, allow_negative_numbers = true)]
        max_ranges: i64,
    },

    /// Count the table into caller-chosen ranges
    Fixed {
        /// Range as `from..to`; either side may be left open (repeatable)
        #[arg(long = "range", required = true, allow_hyphen_values = true)]
        ranges: Vec<FixedRange>,
    },
}
