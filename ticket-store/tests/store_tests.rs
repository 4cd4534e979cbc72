//! Vector store behavior: indexing, fan-out retrieval, the global merge,
//! and reopen equivalence.

mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use common::{HashEmbedder, TableEmbedder, doc, unit_vec};
use serde_json::json;
use ticket_store::{DEFAULT_TOP_K, TicketDocument, TicketVectorStore};

fn corpus_of(
    entries: &[(&str, Vec<TicketDocument>)],
) -> BTreeMap<String, Vec<TicketDocument>> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[tokio::test]
async fn indexed_documents_are_retrievable_with_restored_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = corpus_of(&[
        (
            "technical",
            vec![doc(
                "technical_1",
                "technical",
                &["vpn", "network"],
                "Subject: VPN connection drops every hour",
            )],
        ),
        (
            "product",
            vec![doc(
                "product_1",
                "product",
                &["refund"],
                "Subject: Refund for duplicate purchase",
            )],
        ),
    ]);

    let mut store = TicketVectorStore::new(dir.path(), Arc::new(HashEmbedder)).unwrap();
    store.create_index(&corpus).await.unwrap();

    let hits = store
        .query_similar("VPN connection drops every hour", None, DEFAULT_TOP_K)
        .await
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert!(hits[0].content.contains("VPN connection"));
    assert!(hits[0].similarity > hits[1].similarity);
    // Inbound coercion restores the structured shapes.
    assert_eq!(hits[0].metadata["tags"], json!(["vpn", "network"]));
    assert_eq!(hits[0].metadata["support_type"], json!("technical"));
}

#[tokio::test]
async fn merge_ranks_globally_across_categories() {
    let dir = tempfile::tempdir().unwrap();
    let embedder = TableEmbedder::new(&[
        ("doc a", unit_vec(0.95)),
        ("doc b", unit_vec(0.7)),
        ("doc c", unit_vec(0.9)),
        ("which doc matches best", vec![1.0, 0.0, 0.0]),
    ]);
    let corpus = corpus_of(&[
        (
            "technical",
            vec![
                doc("t-1", "technical", &[], "doc a"),
                doc("t-2", "technical", &[], "doc b"),
            ],
        ),
        ("product", vec![doc("p-1", "product", &[], "doc c")]),
    ]);

    let mut store = TicketVectorStore::new(dir.path(), Arc::new(embedder)).unwrap();
    store.create_index(&corpus).await.unwrap();

    let hits = store
        .query_similar("which doc matches best", None, 2)
        .await
        .unwrap();

    // 0.95 (technical) then 0.9 (product); 0.7 falls off the global top-2.
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].content, "doc a");
    assert_eq!(hits[1].content, "doc c");
    assert!((hits[0].similarity - 0.95).abs() < 1e-3);
    assert!((hits[1].similarity - 0.9).abs() < 1e-3);
}

#[tokio::test]
async fn reopen_returns_the_same_top_k() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = corpus_of(&[(
        "technical",
        vec![
            doc("t-1", "technical", &[], "Subject: Password reset loop"),
            doc("t-2", "technical", &[], "Subject: Printer driver missing"),
        ],
    )]);

    let mut store = TicketVectorStore::new(dir.path(), Arc::new(HashEmbedder)).unwrap();
    store.create_index(&corpus).await.unwrap();
    let before = store
        .query_similar("Password reset loop on login", None, 2)
        .await
        .unwrap();

    let reopened = TicketVectorStore::load_local(dir.path(), Arc::new(HashEmbedder)).unwrap();
    assert_eq!(reopened.support_types(), vec!["technical"]);
    let after = reopened
        .query_similar("Password reset loop on login", None, 2)
        .await
        .unwrap();

    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.content, a.content);
        assert!((b.similarity - a.similarity).abs() < 1e-6);
    }
}

#[tokio::test]
async fn permissive_gates_return_empty_instead_of_failing() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = corpus_of(&[(
        "technical",
        vec![doc("t-1", "technical", &[], "Subject: anything")],
    )]);
    let mut store = TicketVectorStore::new(dir.path(), Arc::new(HashEmbedder)).unwrap();
    store.create_index(&corpus).await.unwrap();

    assert!(store.query_similar("", None, 5).await.unwrap().is_empty());
    assert!(store.query_similar("   ", None, 5).await.unwrap().is_empty());
    assert!(store.query_similar("too short", None, 5).await.unwrap().is_empty());
    assert!(
        store
            .query_similar("long enough query text", Some("nonexistent"), 5)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn scoped_query_only_searches_the_requested_category() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = corpus_of(&[
        (
            "technical",
            vec![doc("t-1", "technical", &[], "Subject: VPN drops constantly")],
        ),
        (
            "product",
            vec![doc("p-1", "product", &[], "Subject: VPN drops constantly")],
        ),
    ]);
    let mut store = TicketVectorStore::new(dir.path(), Arc::new(HashEmbedder)).unwrap();
    store.create_index(&corpus).await.unwrap();

    let hits = store
        .query_similar("VPN drops constantly again", Some("product"), 5)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].metadata["support_type"], json!("product"));
}

#[tokio::test]
async fn a_failing_category_does_not_abort_the_others() {
    let dir = tempfile::tempdir().unwrap();
    // "bad doc" is stored with a 2-dim vector while everything else is
    // 3-dim, so only that collection errors at query time.
    let embedder = TableEmbedder::new(&[
        ("good doc", unit_vec(0.9)),
        ("bad doc", vec![1.0, 0.0]),
        ("query with enough chars", vec![1.0, 0.0, 0.0]),
    ]);
    let corpus = corpus_of(&[
        ("technical", vec![doc("t-1", "technical", &[], "good doc")]),
        ("product", vec![doc("p-1", "product", &[], "bad doc")]),
    ]);

    let mut store = TicketVectorStore::new(dir.path(), Arc::new(embedder)).unwrap();
    store.create_index(&corpus).await.unwrap();

    let hits = store
        .query_similar("query with enough chars", None, 5)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content, "good doc");
}

#[tokio::test]
async fn a_store_with_no_collections_answers_empty_without_embedding() {
    let dir = tempfile::tempdir().unwrap();
    // NoopEmbedder fails on any embed call, so an empty result proves
    // the query was never embedded.
    let store = TicketVectorStore::new(
        dir.path(),
        Arc::new(ticket_store::embed::NoopEmbedder),
    )
    .unwrap();

    let hits = store
        .query_similar("a perfectly reasonable question", None, 5)
        .await
        .unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn empty_categories_still_register_collections() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = corpus_of(&[("billing", vec![])]);

    let mut store = TicketVectorStore::new(dir.path(), Arc::new(HashEmbedder)).unwrap();
    store.create_index(&corpus).await.unwrap();
    assert_eq!(store.support_types(), vec!["billing"]);

    // The empty collection survives a reopen too.
    let reopened = TicketVectorStore::load_local(dir.path(), Arc::new(HashEmbedder)).unwrap();
    assert_eq!(reopened.support_types(), vec!["billing"]);
}
