//! End-to-end scenarios: request documents through the canned engine to a
//! ranked, faceted result set.

mod common;

use common::{
    apple_catalogue, assert_contiguous, assert_ranked, counts, docids, london_shops, make_scored,
    make_table, CannedEngine, LOCATION_SLOT, SCORE_SLOT,
};
use facetrank::config::SearchRequestConfig;
use facetrank::facets::{to_distributed_ranges, to_fixed_ranges, to_ranges};
use facetrank::{
    describe_query_plan, mix, search, DistanceBalancer, FacetKey, FixedRange, Page, Query,
    QueryBuilder, SearchRequest, StoredValueBalancer,
};

// ============================================================================
// BALANCING
// ============================================================================

#[test]
fn balancer_alone_orders_by_stored_score() {
    let query = QueryBuilder::new("apple")
        .balance_factor(0.0)
        .balancer(StoredValueBalancer::new(1.0, SCORE_SLOT, 0.0, 100.0).unwrap())
        .build()
        .unwrap();
    let results = mix(
        vec![
            make_scored(1, 0.9, SCORE_SLOT, 0.0),
            make_scored(2, 0.3, SCORE_SLOT, 50.0),
            make_scored(3, 0.6, SCORE_SLOT, 100.0),
        ],
        &query,
    );

    let weights: Vec<f64> = results.iter().map(|r| r.weight).collect();
    assert_eq!(docids(&results), vec![3, 2, 1]);
    assert_eq!(weights, vec![1.0, 0.5, 0.0]);
}

#[test]
fn review_score_breaks_a_text_tie() {
    let query = QueryBuilder::new("apple")
        .balance_factor(0.9)
        .balancer(StoredValueBalancer::new(0.1, SCORE_SLOT, 0.0, 100.0).unwrap())
        .build()
        .unwrap();
    let results = mix(apple_catalogue(), &query);

    assert_ranked(&results);
    let titles: Vec<&str> = results.iter().filter_map(|r| r.raw.field("title")).collect();
    assert_eq!(titles, vec!["iPad", "iPod", "iPhone"]);
    assert_eq!(results[0].weight, 1.0);
    assert_eq!((results[1].weight * 100.0).round(), 96.0);
    assert_eq!((results[2].weight * 100.0).round(), 95.0);
}

#[test]
fn nearest_shop_first() {
    let query = QueryBuilder::new("coffee")
        .balance_factor(0.0)
        .balancer(DistanceBalancer::new(1.0, LOCATION_SLOT, 51.5074, -0.1278).unwrap())
        .build()
        .unwrap();
    let results = mix(london_shops(), &query);

    let titles: Vec<&str> = results.iter().filter_map(|r| r.raw.field("title")).collect();
    assert_eq!(titles, vec!["City", "Oxford", "Manchester"]);
    assert_eq!(results[0].weight, 1.0);
}

#[test]
fn threshold_rebuild_narrows_results() {
    let base = QueryBuilder::new("apple")
        .balance_factor(0.0)
        .balancer(StoredValueBalancer::new(1.0, SCORE_SLOT, 0.0, 100.0).unwrap())
        .build()
        .unwrap();
    let strict = base.to_builder().threshold(0.6).build().unwrap();

    assert_eq!(mix(apple_catalogue(), &base).len(), 3);
    let kept = mix(apple_catalogue(), &strict);
    assert_eq!(docids(&kept), vec![3]);
}

// ============================================================================
// FACETS
// ============================================================================

#[test]
fn fixed_ranges_count_half_open() {
    let table = make_table(&[(5.0, 3), (10.0, 2), (15.0, 1)]);
    let ranges = [
        FixedRange::between(0.0, 10.0).unwrap(),
        FixedRange::between(10.0, 20.0).unwrap(),
    ];
    let out = to_fixed_ranges(&table, &ranges).unwrap();
    assert_eq!(counts(&out), vec![3, 3]);
}

#[test]
fn price_facets_three_ways() {
    let prices = make_table(&[
        (9.99, 12),
        (14.5, 30),
        (19.0, 25),
        (24.99, 18),
        (49.0, 6),
        (199.0, 2),
        (899.0, 1),
    ]);

    let equal = to_ranges(&prices, 4).unwrap();
    assert_eq!(equal.iter().map(|r| r.count).sum::<u64>(), 94);
    // Nearly everything is cheap, so most equal-width buckets are empty.
    assert_eq!(equal.len(), 2);
    assert_eq!(equal[0].count, 93);

    let distributed = to_distributed_ranges(&prices, 4).unwrap();
    assert_contiguous(&distributed);
    assert_eq!(counts(&distributed), vec![42, 25, 24, 3]);
    assert!(distributed[3].contains(899.0));
}

// ============================================================================
// REQUEST DOCUMENTS THROUGH THE ENGINE
// ============================================================================

const REQUEST: &str = r#"{
    "queryString": "apple",
    "balanceFactor": 0.9,
    "filters": { "colour": ["silver"] },
    "balancers": [
        { "type": "storedValue", "factor": 0.1, "slot": 1, "rangeMin": 0, "rangeMax": 100 }
    ],
    "facets": ["colour", 4],
    "limit": 2
}"#;

#[test]
fn request_document_drives_search() {
    let config: SearchRequestConfig = serde_json::from_str(REQUEST).unwrap();
    let query = Query::try_from(&config).unwrap();
    let engine = CannedEngine::new(apple_catalogue())
        .with_table("colour", make_table(&[]).with("silver", 2).with("black", 1))
        .with_table(4u32, make_table(&[(64.0, 2), (128.0, 1)]));

    let set = search(&engine, &query, &config.search_request());

    assert_eq!(
        engine.executed_plans(),
        vec![
            "Query((((0.9 * apple) OR (0.1 * stored_value(slot 1, 0..100))) FILTER colour:silver))"
        ]
    );
    assert_eq!(set.match_count, 3);
    assert_eq!(set.item_count, 2);
    assert_eq!(docids(&set.results), vec![2, 3]);
    assert_eq!(set.facets.len(), 2);
    assert_eq!(set.facets[&FacetKey::from(4u32)].total_count(), 3);
}

#[test]
fn missing_facet_tables_are_skipped() {
    let engine = CannedEngine::new(apple_catalogue());
    let query = QueryBuilder::new("apple").build().unwrap();
    let request = SearchRequest::new(Page::new(0, 10)).with_facet("size");

    let set = search(&engine, &query, &request);
    assert!(set.facets.is_empty());
    assert_eq!(set.item_count, 3);
}

#[test]
fn result_set_serializes_for_clients() {
    let query = QueryBuilder::new("apple").build().unwrap();
    let engine = CannedEngine::new(vec![make_scored(7, 0.5, SCORE_SLOT, 12.0)]);
    let set = search(&engine, &query, &SearchRequest::default());

    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json["matchCount"], 1);
    assert_eq!(json["results"][0]["docid"], 7);
    assert_eq!(json["results"][0]["weight"], 1.0);
    assert_eq!(json["results"][0]["values"]["1"], 12.0);
}

#[test]
fn describe_filter_only_request() {
    let query = QueryBuilder::filters_only()
        .filter("colour", "red")
        .numeric_range(2, 0.0, 10.0)
        .numeric_range(2, 20.0, 30.0)
        .build()
        .unwrap();
    assert_eq!(
        describe_query_plan(&query),
        "Query((<alldocuments> FILTER (colour:red AND (2:[0, 10) OR 2:[20, 30)))))"
    );
}
