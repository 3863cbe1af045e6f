//! Exactly-once initialization, duplicate handling and failure modes.

use super::common::{empty_index, hello_blocks, matched_hrefs};
use crumbtree::{Block, Dataset, Error, IngestReport, InitOutcome};

#[test]
fn test_second_init_is_noop() {
    let mut index = empty_index();
    assert!(index.init(hello_blocks()).unwrap().loaded());

    let outcome = index
        .init(vec![Block::new("/late", vec!["Late"], "hello again")])
        .unwrap();
    assert_eq!(outcome, InitOutcome::AlreadyInitialized);
    assert_eq!(index.len(), 2);
    assert!(!index.store().contains("/late"));
    assert_eq!(matched_hrefs(&index.search("hello")), vec!["/a"]);
}

#[test]
fn test_init_twice_matches_single_init() {
    let mut once = empty_index();
    once.init(hello_blocks()).unwrap();

    let mut twice = empty_index();
    twice.init(hello_blocks()).unwrap();
    twice.init(hello_blocks()).unwrap();

    for query in ["hello", "goodbye", "world", "a"] {
        assert_eq!(once.search(query), twice.search(query), "query {:?}", query);
    }
}

#[test]
fn test_duplicate_blocks_in_one_batch_equal_deduplicated_batch() {
    let mut deduped = empty_index();
    deduped.init(hello_blocks()).unwrap();

    let mut doubled = empty_index();
    let mut blocks = hello_blocks();
    blocks.extend(hello_blocks());
    let outcome = doubled.init(blocks).unwrap();
    assert_eq!(
        outcome,
        InitOutcome::Loaded(IngestReport {
            ingested: 2,
            duplicates: 2
        })
    );

    assert_eq!(deduped.search("hello"), doubled.search("hello"));
    assert_eq!(deduped.search_ranked("goodbye"), doubled.search_ranked("goodbye"));
}

#[test]
fn test_first_duplicate_wins() {
    let mut index = empty_index();
    index
        .init(vec![
            Block::new("/x", vec!["X"], "original text"),
            Block::new("/x", vec!["Y"], "replacement text"),
        ])
        .unwrap();

    let stored = index.store().get("/x").unwrap();
    assert_eq!(stored.content, "original text");
    assert_eq!(stored.breadcrumbs, vec!["X"]);
    assert!(index.search("replacement").is_empty());
}

#[test]
fn test_malformed_block_rejects_whole_batch() {
    let mut index = empty_index();
    let mut blocks = hello_blocks();
    blocks.push(Block::new("/orphan", Vec::<String>::new(), "no breadcrumbs"));

    let err = index.init(blocks).unwrap_err();
    assert!(matches!(err, Error::MalformedBlock { ref href, .. } if href == "/orphan"));
    assert!(!index.is_initialized());
    assert!(index.is_empty());

    // a corrected dataset still loads
    assert!(index.init(hello_blocks()).unwrap().loaded());
}

#[test]
fn test_missing_fields_fail_at_parse_time() {
    let err = Dataset::from_slice(br#"{"blocks":[{"breadcrumbs":["A"]}]}"#).unwrap_err();
    assert!(matches!(err, Error::Dataset(_)));
    assert!(err.is_dataset_failure());
}

#[test]
fn test_unknown_fields_ignored() {
    let dataset = Dataset::from_slice(
        br#"{"version":2,"blocks":[{"href":"/a","breadcrumbs":["A"],"content":"x","anchor":"top","rank":"2"}]}"#,
    )
    .unwrap();
    assert_eq!(dataset.blocks[0].rank, Some(2));
}

#[test]
fn test_queries_before_init_are_empty() {
    let index = empty_index();
    assert!(index.search("hello").is_empty());
    assert!(index.search_ranked("hello").is_empty());
    assert!(!index.is_initialized());
}

#[test]
fn test_blank_queries_are_empty() {
    let mut index = empty_index();
    index.init(hello_blocks()).unwrap();
    for query in ["", "   ", "\t\n", "--", "!?"] {
        assert!(index.search(query).is_empty(), "query {:?}", query);
    }
}
