use docrag_core::config::RetrievalConfig;
use docrag_core::error::Error;
use docrag_core::traits::ChunkStore;
use docrag_core::types::{Document, DocumentChunk, MetaValue, QueryFilter, RagQuery, SourceKind};
use docrag_embed::{embed, get_default_embedder};
use docrag_hybrid::RetrievalEngine;
use docrag_vector::MemoryStore;

const STORY: &str = "The borrower defaulted on the loan. The loan balance was significant.";

fn small_window_engine(docs: Vec<Document>) -> RetrievalEngine<MemoryStore> {
    let config = RetrievalConfig { chunk_target: 5, chunk_overlap: 1, ..RetrievalConfig::default() };
    RetrievalEngine::new(MemoryStore::with_documents(docs), get_default_embedder(), config).expect("engine")
}

#[test]
fn loan_default_query_ranks_loan_chunk_first() {
    let engine = small_window_engine(vec![Document::new("d1", "p").with_text(STORY)]);
    assert_eq!(engine.index("d1").expect("index").chunks, 3);

    let resp = engine.query(&RagQuery::new("loan default"));
    assert!(resp.total_results >= 1);
    let top = &resp.answers[0];
    assert!(top.text.contains("loan"));
    assert!(top.similarity > 0.0);
    assert_eq!(top.doc_id, "d1");
    assert_eq!(top.chunk_type.as_deref(), Some("text"));
    assert!(resp.answers.iter().all(|a| !a.text.contains("significant") || a.similarity < top.similarity));
}

#[test]
fn similarity_is_rounded_to_four_places() {
    let engine = small_window_engine(vec![Document::new("d1", "p").with_text(STORY)]);
    engine.index("d1").expect("index");
    let resp = engine.query(&RagQuery::new("loan default"));
    for a in &resp.answers {
        let scaled = a.similarity * 10_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6, "{} has more than 4 decimals", a.similarity);
    }
}

#[test]
fn fallback_finds_unindexed_text_with_zero_similarity() {
    let engine = RetrievalEngine::with_defaults(MemoryStore::with_documents([
        Document::new("d1", "p").with_text("Annual review found an escrow shortage on the account."),
    ]));
    // not indexed: no chunks, so ranking yields nothing
    let resp = engine.query(&RagQuery::new("escrow shortage"));
    assert_eq!(resp.total_results, 1);
    assert_eq!(resp.answers[0].doc_id, "d1");
    assert_eq!(resp.answers[0].similarity, 0.0);
    assert_eq!(resp.answers[0].chunk_type.as_deref(), Some("text"));
    assert!(resp.answers[0].semantic_tags.is_none());
}

#[test]
fn search_returns_chunk_hits_then_falls_back_to_document_hits() {
    let engine = small_window_engine(vec![
        Document::new("d1", "p").with_text(STORY),
        Document::new("d2", "p").with_text("escrow shortage notice"),
    ]);
    engine.index("d1").expect("index");

    let hits = engine.search(&RagQuery::new("loan default"));
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|h| h.source == SourceKind::Vector && h.doc_id == "d1" && h.score > 0.0));
    assert!(hits[0].id.starts_with("d1:"));
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));

    // d2 was never indexed, so only the substring path can see it
    let hits = engine.search(&RagQuery::new("shortage notice"));
    assert_eq!(hits.len(), 1);
    assert_eq!((hits[0].id.as_str(), hits[0].source, hits[0].score), ("d2", SourceKind::Text, 0.0));
    assert!(engine.search(&RagQuery::new("  ")).is_empty());
}

#[test]
fn fallback_is_not_used_when_vectors_match() {
    let engine = RetrievalEngine::with_defaults(MemoryStore::with_documents([
        Document::new("d1", "p").with_text("escrow shortage notice"),
    ]));
    engine.index_all().expect("index all");
    let resp = engine.query(&RagQuery::new("escrow shortage"));
    assert_eq!(resp.total_results, 1);
    assert!(resp.answers[0].similarity > 0.0);
}

#[test]
fn empty_query_returns_empty_response() {
    let engine = RetrievalEngine::with_defaults(MemoryStore::with_documents([Document::new("d1", "p").with_text("anything")]));
    let resp = engine.query(&RagQuery::new("   "));
    assert!(resp.answers.is_empty());
    assert_eq!(resp.total_results, 0);
    assert_eq!(resp.query, "");
}

#[test]
fn query_is_trimmed_and_limit_defaults_to_config() {
    let docs: Vec<Document> = (0..8).map(|i| Document::new(format!("d{i}"), "p").with_text(format!("loan number {i}"))).collect();
    let engine = RetrievalEngine::with_defaults(MemoryStore::with_documents(docs));
    engine.index_all().expect("index all");
    let resp = engine.query(&RagQuery::new("  loan  "));
    assert_eq!(resp.query, "loan");
    assert_eq!(resp.total_results, 5);
    assert_eq!(engine.query(&RagQuery::new("loan").with_limit(2)).total_results, 2);
}

#[test]
fn filters_apply_before_ranking_and_to_fallback() {
    let engine = RetrievalEngine::with_defaults(MemoryStore::with_documents([
        Document::new("a", "p").with_loan("L1").with_type("note").with_text("loan payment late fee"),
        Document::new("b", "p").with_loan("L2").with_type("note").with_text("loan payment late fee"),
        Document::new("c", "p").with_loan("L2").with_type("deed").with_text("escrow shortage"),
    ]));
    engine.index("a").expect("index a");
    engine.index("b").expect("index b");

    let mut q = RagQuery::new("late fee");
    q.loan_id = Some("L2".into());
    let resp = engine.query(&q);
    assert_eq!(resp.answers.iter().map(|a| a.doc_id.as_str()).collect::<Vec<_>>(), vec!["b"]);

    let mut q = RagQuery::new("escrow shortage");
    q.doc_type = Some("note".into());
    assert!(engine.query(&q).answers.is_empty(), "fallback honours the same filter");
    q.doc_type = Some("deed".into());
    assert_eq!(engine.query(&q).answers[0].doc_id, "c");
}

#[test]
fn long_chunks_are_excerpted_with_ellipsis() {
    let long: String = std::iter::repeat("loan ").take(300).collect();
    let engine = RetrievalEngine::with_defaults(MemoryStore::with_documents([Document::new("d1", "p").with_text(long)]));
    engine.index("d1").expect("index");
    let resp = engine.query(&RagQuery::new("loan"));
    let text = &resp.answers[0].text;
    assert!(text.ends_with('…'));
    assert_eq!(text.chars().count(), 501);
}

#[test]
fn semantic_tags_flow_through_to_answers() {
    let store = MemoryStore::with_documents([Document::new("d1", "p").with_text("ignored")]);
    store.replace_chunks("d1", vec![DocumentChunk {
        chunk_id: "d1:0".into(),
        doc_id: "d1".into(),
        ord: 0,
        text: "forbearance plan approved".into(),
        vector: Some(embed("forbearance plan approved")),
        chunk_type: Some("clause".into()),
        semantic_tags: Some(MetaValue::from(vec!["hardship", "forbearance"])),
    }]);
    let engine = RetrievalEngine::with_defaults(store);
    let resp = engine.query(&RagQuery::new("forbearance"));
    assert_eq!(resp.answers[0].chunk_type.as_deref(), Some("clause"));
    assert_eq!(resp.answers[0].semantic_tags, Some(MetaValue::List(vec!["hardship".into(), "forbearance".into()])));
    assert_eq!(engine.store().chunks(&QueryFilter::default()).len(), 1);

    let json = serde_json::to_value(&resp).expect("json");
    assert_eq!(json["answers"][0]["semantic_tags"], serde_json::json!(["hardship", "forbearance"]));
    assert_eq!(json["total_results"], 1);
}

#[test]
fn invalid_chunk_window_is_rejected_at_construction() {
    let config = RetrievalConfig { chunk_target: 10, chunk_overlap: 12, ..RetrievalConfig::default() };
    let err = RetrievalEngine::new(MemoryStore::new(), get_default_embedder(), config).err();
    assert!(matches!(err, Some(Error::InvalidConfiguration { target: 10, overlap: 12 })));
}
