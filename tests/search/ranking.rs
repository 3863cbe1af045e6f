//! Manual rank hints against text relevance, under both policies.

use super::common::docs_dataset;
use crumbtree::{rank, Block, FuzzyIndex, HierarchicalIndex, RankingPolicy};
use std::sync::Arc;

const POLICIES: [RankingPolicy; 2] = [RankingPolicy::SquaredPenalty, RankingPolicy::RankFirst];

fn index(policy: RankingPolicy, blocks: Vec<Block>) -> HierarchicalIndex<FuzzyIndex> {
    let mut index = HierarchicalIndex::new(FuzzyIndex::default(), policy);
    index.init(blocks).unwrap();
    index
}

fn hrefs(ranked: &[Arc<Block>]) -> Vec<&str> {
    ranked.iter().map(|b| b.href.as_str()).collect()
}

#[test]
fn test_equal_scores_lower_rank_first() {
    for policy in POLICIES {
        // Alpha would win the title tie-break without its rank
        let index = index(
            policy,
            vec![
                Block::new("/alpha", vec!["Alpha"], "same words here").with_rank(3),
                Block::new("/beta", vec!["Beta"], "same words here"),
            ],
        );
        assert_eq!(
            hrefs(&index.search_ranked("words")),
            vec!["/beta", "/alpha"],
            "{:?}",
            policy
        );
    }
}

#[test]
fn test_missing_rank_ranks_as_zero() {
    for policy in POLICIES {
        let implicit = index(
            policy,
            vec![
                Block::new("/alpha", vec!["Alpha"], "same words here"),
                Block::new("/beta", vec!["Beta"], "same words here"),
            ],
        );
        let explicit = index(
            policy,
            vec![
                Block::new("/alpha", vec!["Alpha"], "same words here").with_rank(0),
                Block::new("/beta", vec!["Beta"], "same words here").with_rank(0),
            ],
        );
        assert_eq!(
            hrefs(&implicit.search_ranked("words")),
            hrefs(&explicit.search_ranked("words"))
        );
    }
}

#[test]
fn test_rank_first_sinks_low_priority_pages() {
    let index = index(RankingPolicy::RankFirst, docs_dataset().blocks);
    let ranked = index.search_ranked("routing");
    assert!(ranked.len() > 1);
    assert_eq!(ranked.last().unwrap().href, "/docs/migrating");
}

#[test]
fn test_squared_penalty_trades_relevance_for_rank() {
    let weak = Arc::new(Block::new("/weak", vec!["Weak"], ""));
    let strong = Arc::new(Block::new("/strong", vec!["Strong"], "").with_rank(1));

    // 10 / (1+1)² = 2.5 > 2
    let ranked = rank(
        vec![(weak.clone(), 2.0), (strong.clone(), 10.0)],
        RankingPolicy::SquaredPenalty,
    );
    assert_eq!(hrefs(&ranked), vec!["/strong", "/weak"]);

    // 6 / 4 = 1.5 < 2
    let ranked = rank(vec![(weak, 2.0), (strong, 6.0)], RankingPolicy::SquaredPenalty);
    assert_eq!(hrefs(&ranked), vec!["/weak", "/strong"]);
}

#[test]
fn test_ranking_is_deterministic_across_runs() {
    let first = index(RankingPolicy::SquaredPenalty, docs_dataset().blocks);
    let second = index(RankingPolicy::SquaredPenalty, docs_dataset().blocks);
    for query in ["routing", "load", "forms pages", "docs"] {
        assert_eq!(first.search(query), second.search(query), "query {:?}", query);
    }
}
