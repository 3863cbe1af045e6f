//! Ranking depends only on the candidates, never on their arrival order.

use crumbtree::{rank, Block, RankingPolicy};
use proptest::prelude::*;
use std::sync::Arc;

fn candidate_strategy() -> impl Strategy<Value = (Option<u32>, f64, String)> {
    (
        prop::option::of(0u32..5),
        prop::sample::select(vec![0.0, 0.5, 1.0, 2.0, 4.0, 10.0]),
        prop::string::string_regex("[a-c]{1,2}").unwrap(),
    )
}

fn candidates_strategy() -> impl Strategy<Value = Vec<(Arc<Block>, f64)>> {
    prop::collection::vec(candidate_strategy(), 1..20).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (rank, score, title))| {
                let mut block = Block::new(format!("/{}", i), vec![title], "");
                block.rank = rank;
                (Arc::new(block), score)
            })
            .collect()
    })
}

fn policy_strategy() -> impl Strategy<Value = RankingPolicy> {
    prop_oneof![
        Just(RankingPolicy::SquaredPenalty),
        Just(RankingPolicy::RankFirst)
    ]
}

fn hrefs(ranked: &[Arc<Block>]) -> Vec<String> {
    ranked.iter().map(|b| b.href.clone()).collect()
}

proptest! {
    #[test]
    fn prop_ranking_invariant_under_permutation(
        (candidates, shuffled) in candidates_strategy()
            .prop_flat_map(|c| (Just(c.clone()), Just(c).prop_shuffle())),
        policy in policy_strategy(),
    ) {
        prop_assert_eq!(hrefs(&rank(candidates, policy)), hrefs(&rank(shuffled, policy)));
    }

    #[test]
    fn prop_rank_first_orders_by_rank(candidates in candidates_strategy()) {
        let ranked = rank(candidates, RankingPolicy::RankFirst);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].rank_or_default() <= pair[1].rank_or_default());
        }
    }

    #[test]
    fn prop_equal_scores_follow_rank(
        candidates in candidates_strategy(),
        policy in policy_strategy(),
    ) {
        // flatten scores so only rank (then title, href) decides
        let flat: Vec<_> = candidates.into_iter().map(|(b, _)| (b, 1.0)).collect();
        let ranked = rank(flat, policy);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].rank_or_default() <= pair[1].rank_or_default());
        }
    }

    #[test]
    fn prop_rank_keeps_every_candidate(candidates in candidates_strategy(), policy in policy_strategy()) {
        let mut expected = hrefs(&candidates.iter().map(|(b, _)| b.clone()).collect::<Vec<_>>());
        let mut got = hrefs(&rank(candidates, policy));
        expected.sort();
        got.sort();
        prop_assert_eq!(expected, got);
    }
}
