//! `SearchService` message handling.

use super::common::{empty_index, hello_blocks, FailingSource};
use crumbtree::{
    Dataset, FuzzyIndex, Inbound, Outbound, SearchService, StaticSource, TreeNode,
};
use serde_json::json;

fn service() -> SearchService<FuzzyIndex, StaticSource> {
    SearchService::new(
        empty_index(),
        StaticSource::new(Dataset {
            blocks: hello_blocks(),
        }),
    )
}

fn init() -> Inbound {
    Inbound::Init {
        origin: "https://docs.example".to_string(),
    }
}

fn results(reply: Outbound) -> (Vec<TreeNode>, String) {
    match reply {
        Outbound::Results { results, query } => (results, query),
        other => panic!("expected results, got {:?}", other),
    }
}

#[tokio::test]
async fn test_init_then_query() {
    let mut service = service();
    assert_eq!(service.handle(init()).await, Outbound::Ready);

    let (results, query) = results(service.handle(Inbound::Query("hello".into())).await);
    assert_eq!(query, "hello");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].href.as_deref(), Some("/a"));
}

#[tokio::test]
async fn test_query_before_init_is_empty() {
    let mut service = service();
    let (results, query) = results(service.handle(Inbound::Query("hello".into())).await);
    assert!(results.is_empty());
    assert_eq!(query, "hello");
}

#[tokio::test]
async fn test_repeated_init_answers_ready() {
    let mut service = service();
    assert_eq!(service.handle(init()).await, Outbound::Ready);
    assert_eq!(service.handle(init()).await, Outbound::Ready);
    assert_eq!(service.index().len(), 2);
}

#[tokio::test]
async fn test_recents_always_empty() {
    let mut service = service();
    assert_eq!(service.handle(Inbound::Recents).await, Outbound::Recents(vec![]));
    service.handle(init()).await;
    service.handle(Inbound::Query("hello".into())).await;
    assert_eq!(service.handle(Inbound::Recents).await, Outbound::Recents(vec![]));
}

#[tokio::test]
async fn test_failed_fetch_reports_error_and_keeps_serving() {
    let mut service = SearchService::new(empty_index(), FailingSource);
    match service.handle(init()).await {
        Outbound::Error { message } => assert!(message.contains("unreachable"), "{}", message),
        other => panic!("expected error, got {:?}", other),
    }
    assert!(!service.index().is_initialized());

    let (results, _) = results(service.handle(Inbound::Query("hello".into())).await);
    assert!(results.is_empty());
    assert_eq!(service.handle(Inbound::Recents).await, Outbound::Recents(vec![]));
}

#[tokio::test]
async fn test_malformed_dataset_reports_error() {
    let mut service = SearchService::new(
        empty_index(),
        StaticSource::new(Dataset {
            blocks: vec![crumbtree::Block::new("", vec!["A"], "")],
        }),
    );
    assert!(matches!(service.handle(init()).await, Outbound::Error { .. }));
    assert!(!service.index().is_initialized());
}

#[tokio::test]
async fn test_json_round_trip() {
    let mut service = service();
    let messages = [
        json!({"type": "init", "payload": {"origin": "https://docs.example"}}),
        json!({"type": "query", "payload": "hello"}),
        json!({"type": "recents"}),
    ];
    let mut replies = Vec::new();
    for raw in messages {
        let message: Inbound = serde_json::from_value(raw).unwrap();
        replies.push(serde_json::to_value(service.handle(message).await).unwrap());
    }

    assert_eq!(replies[0], json!({"type": "ready"}));
    assert_eq!(replies[1]["type"], "results");
    assert_eq!(replies[1]["payload"]["query"], "hello");
    assert_eq!(replies[1]["payload"]["results"][0]["href"], "/a");
    assert_eq!(replies[1]["payload"]["results"][0]["node"]["content"], "hello world");
    assert_eq!(replies[2], json!({"type": "recents", "payload": []}));
}
