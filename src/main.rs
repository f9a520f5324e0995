// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use facetrank::config;
use facetrank::facets::{self, EmptyRanges, Range};
use facetrank::{describe_query_plan, mix_page, LatLong, ResultSet};
use serde_json::json;
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display::*;
use cli::{Cli, Commands, FacetMode};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", error_label("error:"), e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("FACETRANK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Mix {
            request,
            results,
            offset,
            limit,
        } => run_mix(&request, &results, offset, limit, cli.json),
        Commands::Facets { table, mode } => run_facets(&table, mode, cli.json),
        Commands::Distance { from, to } => run_distance(&from, &to, cli.json),
        Commands::Describe { request } => run_describe(&request, cli.json),
    }
}

fn run_mix(
    request_path: &Path,
    results_path: &Path,
    offset: Option<usize>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let (query, request) = config::load(request_path)?;
    let raw_results = config::load_results(results_path)?;

    let mut page = request.page;
    if let Some(offset) = offset {
        page.offset = offset;
    }
    if let Some(limit) = limit {
        page.limit = limit;
    }

    let result_set = mix_page(raw_results, &query, page);
    if json {
        println!("{}", serde_json::to_string_pretty(&result_set)?);
    } else {
        print_result_set(&result_set, page.offset);
    }
    Ok(())
}

fn print_result_set(result_set: &ResultSet, offset: usize) {
    println!();
    section_top("RESULTS");
    if result_set.results.is_empty() {
        row(&format!("  {}", themed(GRAY, &[], "no results")));
    }
    for (i, result) in result_set.results.iter().enumerate() {
        let label = result
            .raw
            .field("title")
            .map(|t| truncate(t, 24))
            .unwrap_or_else(|| format!("doc {}", result.docid()));
        row(&format!(
            "  {} {} {} {}  {}",
            pad_left(&themed(GRAY, &[], &format!("{}.", offset + i + 1)), 4),
            pad_right(&label, 24),
            weight_bar(result.weight),
            weight_value(result.weight),
            themed(GRAY, &[DIM], &format!("#{}", result.docid()))
        ));
    }
    section_mid("SUMMARY");
    row(&format!(
        "  {} matched, {} shown",
        themed(CYAN, &[BOLD], &result_set.match_count.to_string()),
        result_set.item_count
    ));
    section_bot();
    println!();
}

fn run_facets(table_path: &Path, mode: FacetMode, json: bool) -> Result<()> {
    let table = config::load_facet_table(table_path)?;

    let (label, ranges) = match mode {
        FacetMode::Equal {
            max_ranges,
            keep_empty,
        } => {
            let empty = if keep_empty {
                EmptyRanges::Keep
            } else {
                EmptyRanges::Omit
            };
            let ranges = facets::to_ranges_with(&table, config::max_ranges(max_ranges)?, empty)?;
            ("EQUAL WIDTH", ranges)
        }
        FacetMode::Distributed { max_ranges } => {
            let ranges = facets::to_distributed_ranges(&table, config::max_ranges(max_ranges)?)?;
            ("DISTRIBUTED", ranges)
        }
        FacetMode::Fixed { ranges } => ("FIXED", facets::to_fixed_ranges(&table, &ranges)?),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&ranges)?);
    } else {
        print_ranges(label, &ranges, table.total_count());
    }
    Ok(())
}

fn print_ranges(label: &str, ranges: &[Range], total: u64) {
    let max_count = ranges.iter().map(|r| r.count).max().unwrap_or(0);
    println!();
    section_top(label);
    if ranges.is_empty() {
        row(&format!("  {}", themed(GRAY, &[], "no ranges")));
    }
    for range in ranges {
        row(&format!(
            "  {} {} {}",
            pad_right(&range.to_string(), 28),
            count_bar(range.count, max_count),
            pad_left(&themed(CYAN, &[], &range.count.to_string()), 8)
        ));
    }
    section_mid("TABLE");
    row(&format!("  {} values counted", themed(CYAN, &[BOLD], &total.to_string())));
    section_bot();
    println!();
}

fn run_distance(from: &str, to: &str, json: bool) -> Result<()> {
    let a: LatLong = from.parse().with_context(|| format!("bad start point {:?}", from))?;
    let b: LatLong = to.parse().with_context(|| format!("bad end point {:?}", to))?;
    let metres = a.distance_to(&b);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "from": a, "to": b, "metres": metres }))?
        );
    } else {
        println!(
            "{} → {}  {}",
            a,
            b,
            themed(GREEN, &[BOLD], &format_distance(metres))
        );
    }
    Ok(())
}

fn run_describe(request_path: &Path, json: bool) -> Result<()> {
    let (query, _) = config::load(request_path)?;
    let plan = describe_query_plan(&query);

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "plan": plan }))?);
    } else {
        println!("{}", plan);
    }
    Ok(())
}
