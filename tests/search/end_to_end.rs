//! The full pipeline: blocks in, ranked breadcrumb trees out.

use super::common::{empty_index, find, hello_blocks, labels};
use crumbtree::{Block, HierarchicalIndex, SearchConfig};

#[test]
fn test_hello_returns_single_leaf() {
    let mut index = empty_index();
    index.init(hello_blocks()).unwrap();

    let forest = index.search("hello");
    assert_eq!(forest.len(), 1);
    let root = &forest[0];
    assert_eq!(root.breadcrumbs, vec!["A"]);
    assert_eq!(root.href.as_deref(), Some("/a"));
    assert_eq!(root.node.as_ref().unwrap().content, "hello world");
    assert!(root.children.is_empty());
}

#[test]
fn test_absent_term_gives_empty_list() {
    let mut index = empty_index();
    index.init(hello_blocks()).unwrap();
    assert!(index.search("xylophone").is_empty());
}

#[test]
fn test_intermediate_nodes_link_to_unmatched_blocks() {
    let mut index = empty_index();
    index
        .init(vec![
            Block::new("/docs", vec!["Docs"], "introduction"),
            Block::new("/docs/routing", vec!["Docs", "Routing"], "pages and layouts"),
            Block::new(
                "/docs/routing#load",
                vec!["Docs", "Routing", "Load functions"],
                "fetch data before render",
            ),
        ])
        .unwrap();

    let forest = index.search("fetch");
    let docs = find(&forest, &["Docs"]).unwrap();
    assert!(docs.node.is_none());
    assert_eq!(docs.href.as_deref(), Some("/docs"));

    let routing = find(&forest, &["Docs", "Routing"]).unwrap();
    assert!(routing.node.is_none());
    assert_eq!(routing.href.as_deref(), Some("/docs/routing"));

    let load = find(&forest, &["Docs", "Routing", "Load functions"]).unwrap();
    assert_eq!(load.node.as_ref().unwrap().href, "/docs/routing#load");
}

#[test]
fn test_shared_path_links_to_latest_block() {
    let mut index = empty_index();
    index
        .init(vec![
            Block::new("/old", vec!["Docs"], "alpha"),
            Block::new("/new", vec!["Docs"], "beta"),
            Block::new("/child", vec!["Docs", "Child"], "needle"),
        ])
        .unwrap();

    let forest = index.search("beta");
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].node.as_ref().unwrap().href, "/new");
    assert_eq!(forest[0].href.as_deref(), Some("/new"));

    let forest = index.search("needle");
    let docs = find(&forest, &["Docs"]).unwrap();
    assert!(docs.node.is_none());
    assert_eq!(docs.href.as_deref(), Some("/new"));
    assert_eq!(
        find(&forest, &["Docs", "Child"]).unwrap().href.as_deref(),
        Some("/child")
    );
}

#[test]
fn test_grouping_node_without_block_has_no_href() {
    let mut index = empty_index();
    index
        .init(vec![Block::new("/deep", vec!["Guide", "Part", "Leaf"], "needle")])
        .unwrap();
    let forest = index.search("needle");
    let guide = find(&forest, &["Guide"]).unwrap();
    assert!(guide.href.is_none());
    assert!(guide.node.is_none());
    assert_eq!(labels(&guide.children), vec!["Part"]);
}

#[test]
fn test_results_serialize_to_wire_shape() {
    let mut index = empty_index();
    index.init(hello_blocks()).unwrap();
    let json = serde_json::to_value(index.search("hello")).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "breadcrumbs": ["A"],
            "href": "/a",
            "node": {"href": "/a", "breadcrumbs": ["A"], "content": "hello world"},
            "children": []
        }])
    );
}

#[test]
fn test_config_built_index() {
    let config = SearchConfig::from_json(r#"{"backend":"boolean","combine":"or"}"#).unwrap();
    let mut index = HierarchicalIndex::from_config(&config);
    index.init(hello_blocks()).unwrap();
    let forest = index.search("hello goodbye");
    assert_eq!(forest.len(), 1);
    assert_eq!(labels(&forest[0].children), vec!["B"]);
}
