//! Weight mixing properties: rescaling, thresholds, ordering, paging.

use super::common::{assert_ranked, docids, make_scored};
use facetrank::{mix, mix_page, Page, Query, QueryBuilder, RawResult, StoredValueBalancer};
use proptest::prelude::*;

/// Raw weight and stored score per document.
fn documents() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0.0f64..=1.0, 0.0f64..=100.0), 0..40)
}

fn to_results(docs: &[(f64, f64)]) -> Vec<RawResult> {
    docs.iter()
        .enumerate()
        .map(|(i, (raw, score))| make_scored(i as u64, *raw, 1, *score))
        .collect()
}

fn query(balance_factor: f64, balancer_factor: f64, threshold: f64) -> Query {
    QueryBuilder::new("apple")
        .balance_factor(balance_factor)
        .threshold(threshold)
        .balancer(StoredValueBalancer::new(balancer_factor, 1, 0.0, 100.0).unwrap())
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: results are in [0, 1], best first, and the best is exactly 1.0
    /// unless every combined weight was 0.
    #[test]
    fn prop_top_weight_is_one(
        docs in documents(),
        balance_factor in 0.0f64..=1.0,
        balancer_factor in 0.0f64..=1.0,
    ) {
        let results = mix(to_results(&docs), &query(balance_factor, balancer_factor, 0.0));
        prop_assert_eq!(results.len(), docs.len());
        assert_ranked(&results);
        if let Some(top) = results.first() {
            let all_zero = results.iter().all(|r| r.weight == 0.0);
            prop_assert!(top.weight == 1.0 || all_zero, "top weight {}", top.weight);
        }
    }

    /// Property: nothing below the threshold survives.
    #[test]
    fn prop_threshold_respected(
        docs in documents(),
        threshold in 0.0f64..=1.0,
    ) {
        let results = mix(to_results(&docs), &query(0.5, 0.5, threshold));
        prop_assert!(results.len() <= docs.len());
        prop_assert!(results.iter().all(|r| r.weight >= threshold));
    }

    /// Property: raising the threshold never lets more results through.
    #[test]
    fn prop_threshold_monotone(
        docs in documents(),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let loose = mix(to_results(&docs), &query(0.7, 0.3, lo));
        let strict = mix(to_results(&docs), &query(0.7, 0.3, hi));
        prop_assert!(strict.len() <= loose.len());
    }

    /// Property: equal weights keep retrieval order.
    #[test]
    fn prop_ties_are_stable(n in 1usize..30, raw in 0.01f64..=1.0) {
        let input: Vec<RawResult> = (0..n as u64).map(|id| RawResult::new(id, raw)).collect();
        let query = QueryBuilder::new("apple").build().unwrap();
        let expected: Vec<u64> = (0..n as u64).collect();
        prop_assert_eq!(docids(&mix(input, &query)), expected);
    }

    /// Property: a page is the matching slice of the full ranking.
    #[test]
    fn prop_page_is_slice_of_ranking(
        docs in documents(),
        offset in 0usize..50,
        limit in 0usize..50,
    ) {
        let query = query(0.8, 0.2, 0.0);
        let full = mix(to_results(&docs), &query);
        let page = mix_page(to_results(&docs), &query, Page::new(offset, limit));

        prop_assert_eq!(page.match_count, full.len());
        prop_assert_eq!(page.item_count, page.results.len());
        let expected: Vec<u64> = docids(&full).into_iter().skip(offset).take(limit).collect();
        prop_assert_eq!(docids(&page.results), expected);
    }
}
