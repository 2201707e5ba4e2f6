//! Property tests for the flat nearest-neighbour index.

use docent_rag::{FlatIndex, RagError};
use proptest::prelude::*;

const DIMS: usize = 4;

fn vectors(max: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-100.0f32..100.0, DIMS), 0..max)
}

fn query() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-100.0f32..100.0, DIMS)
}

proptest! {
    #[test]
    fn prop_returns_min_k_n_results(data in vectors(40), query in query(), k in 1usize..50) {
        let index = FlatIndex::build(&data).unwrap();
        let hits = index.search(&query, k).unwrap();
        prop_assert_eq!(hits.len(), k.min(data.len()));
    }

    #[test]
    fn prop_results_ascend_by_distance(data in vectors(40), query in query(), k in 1usize..50) {
        let index = FlatIndex::build(&data).unwrap();
        let hits = index.search(&query, k).unwrap();
        for pair in hits.windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance);
            if pair[0].distance == pair[1].distance {
                prop_assert!(pair[0].position < pair[1].position);
            }
        }
    }

    #[test]
    fn prop_search_is_idempotent(data in vectors(40), query in query(), k in 1usize..50) {
        let index = FlatIndex::build(&data).unwrap();
        let first = index.search(&query, k).unwrap();
        let second = index.search(&query, k).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_no_closer_vector_is_left_out(data in vectors(40), query in query(), k in 1usize..10) {
        let index = FlatIndex::build(&data).unwrap();
        let hits = index.search(&query, k).unwrap();
        if let Some(worst) = hits.last() {
            let returned: Vec<usize> = hits.iter().map(|n| n.position).collect();
            for (position, vector) in data.iter().enumerate() {
                if !returned.contains(&position) {
                    prop_assert!(docent_rag::squared_l2(vector, &query) >= worst.distance);
                }
            }
        }
    }

    #[test]
    fn prop_wrong_query_length_is_rejected(data in vectors(10), len in 0usize..10) {
        prop_assume!(!data.is_empty() && len != DIMS);
        let index = FlatIndex::build(&data).unwrap();
        let query = vec![0.0; len];
        let is_mismatch = matches!(
            index.search(&query, 1),
            Err(RagError::DimensionMismatch { expected: DIMS, .. })
        );
        prop_assert!(is_mismatch);
    }
}
