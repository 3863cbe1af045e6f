//! The worker thread: ordering, failure and shutdown.

use super::common::{docs_dataset, empty_index, hello_blocks, FailingSource};
use crumbtree::{Dataset, Error, Inbound, Outbound, SearchService, StaticSource, Worker};

fn spawn_hello() -> crumbtree::WorkerHandle {
    Worker::spawn(SearchService::new(
        empty_index(),
        StaticSource::new(Dataset {
            blocks: hello_blocks(),
        }),
    ))
}

fn init() -> Inbound {
    Inbound::Init {
        origin: "https://docs.example".to_string(),
    }
}

#[test]
fn test_replies_arrive_in_receipt_order() {
    let mut handle = spawn_hello();
    handle.send(init()).unwrap();
    for query in ["hello", "goodbye", "world"] {
        handle.send(Inbound::Query(query.to_string())).unwrap();
    }
    handle.send(Inbound::Recents).unwrap();

    assert_eq!(handle.blocking_recv(), Some(Outbound::Ready));
    for expected in ["hello", "goodbye", "world"] {
        let reply = handle.blocking_recv().unwrap();
        assert_eq!(reply.query(), Some(expected));
    }
    assert_eq!(handle.blocking_recv(), Some(Outbound::Recents(vec![])));
    handle.shutdown();
}

#[test]
fn test_stale_results_identified_by_echoed_query() {
    let mut handle = Worker::spawn(SearchService::new(
        empty_index(),
        StaticSource::new(docs_dataset()),
    ));
    handle.send(init()).unwrap();
    let typed = ["r", "ro", "rou", "rout"];
    for prefix in typed {
        handle.send(Inbound::Query(prefix.to_string())).unwrap();
    }
    handle.close();

    let latest = typed[typed.len() - 1];
    let mut fresh = Vec::new();
    while let Some(reply) = handle.blocking_recv() {
        if reply.query() == Some(latest) {
            fresh.push(reply);
        }
    }
    assert_eq!(fresh.len(), 1);
    match &fresh[0] {
        Outbound::Results { results, .. } => assert!(!results.is_empty()),
        other => panic!("expected results, got {:?}", other),
    }
    handle.shutdown();
}

#[test]
fn test_failed_init_keeps_worker_alive() {
    let mut handle = Worker::spawn(SearchService::new(empty_index(), FailingSource));
    handle.send(init()).unwrap();
    handle.send(Inbound::Query("hello".to_string())).unwrap();

    assert!(matches!(handle.blocking_recv(), Some(Outbound::Error { .. })));
    assert_eq!(
        handle.blocking_recv(),
        Some(Outbound::Results {
            results: vec![],
            query: "hello".to_string()
        })
    );
    handle.shutdown();
}

#[test]
fn test_send_after_close_fails() {
    let mut handle = spawn_hello();
    handle.send(init()).unwrap();
    handle.close();
    assert!(matches!(handle.send(Inbound::Recents), Err(Error::WorkerClosed)));

    // queued work is still answered, then the channel ends
    assert_eq!(handle.blocking_recv(), Some(Outbound::Ready));
    assert_eq!(handle.blocking_recv(), None);
    handle.shutdown();
}

#[tokio::test]
async fn test_async_recv() {
    let mut handle = spawn_hello();
    handle.send(init()).unwrap();
    handle.send(Inbound::Query("hello".to_string())).unwrap();

    assert_eq!(handle.recv().await, Some(Outbound::Ready));
    match handle.recv().await {
        Some(Outbound::Results { results, query }) => {
            assert_eq!(query, "hello");
            assert_eq!(results[0].href.as_deref(), Some("/a"));
        }
        other => panic!("expected results, got {:?}", other),
    }
}
