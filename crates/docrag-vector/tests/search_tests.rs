use docrag_core::types::DocumentChunk;
use docrag_core::EMBEDDING_DIM;
use docrag_embed::embed;
use docrag_vector::{cosine, rank, rank_chunks, score_candidate};

fn chunk(id: &str, text: &str, vector: Option<Vec<f64>>) -> DocumentChunk {
    DocumentChunk { chunk_id: id.to_string(), doc_id: "d".to_string(), ord: 0, text: text.to_string(), vector, chunk_type: None, semantic_tags: None }
}

#[test]
fn cosine_of_unit_vector_with_itself_is_one() {
    for text in ["loan", "escrow shortage on the loan", "a b c d e f g"] {
        let v = embed(text);
        assert!((cosine(&v, &v) - 1.0).abs() <= 1e-9, "cosine(v, v) for {text:?}");
    }
}

#[test]
fn identical_candidate_ranks_first_with_score_one() {
    let q = embed("loan balance");
    let candidates = vec![
        ("other", Some(embed("borrower balance"))),
        ("same", Some(embed("Loan BALANCE"))),
        ("unrelated", Some(embed("significant"))),
    ];
    let ranked = rank(&q, candidates, 10);
    assert_eq!(ranked[0].chunk, "same");
    assert!((ranked[0].score - 1.0).abs() <= 1e-9);
    assert!(ranked.iter().all(|s| s.chunk != "unrelated"), "zero-similarity candidate is dropped");
}

#[test]
fn all_zero_similarity_gives_empty_result() {
    let q = embed("loan");
    let candidates = vec![(1, Some(embed("significant"))), (2, Some(vec![0.0; EMBEDDING_DIM])), (3, None)];
    assert!(rank(&q, candidates, 5).is_empty());
    let zero_query = embed("");
    assert!(rank(&zero_query, vec![(1, Some(embed("loan")))], 5).is_empty());
}

#[test]
fn ties_keep_input_order_and_limit_applies_after_filtering() {
    let q = embed("loan");
    let v = embed("loan");
    let candidates = vec![
        ("zero", Some(embed("significant"))),
        ("a", Some(v.clone())),
        ("b", Some(v.clone())),
        ("c", Some(v)),
    ];
    let ranked = rank(&q, candidates, 2);
    let ids: Vec<&str> = ranked.iter().map(|s| s.chunk).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn higher_overlap_scores_higher() {
    let q = embed("escrow shortage");
    let ranked = rank(&q, vec![("half", Some(embed("escrow account"))), ("full", Some(embed("escrow shortage notice")))], 5);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].chunk, "full");
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn wrong_width_or_missing_vectors_score_zero_without_failing() {
    let q = embed("loan");
    assert_eq!(score_candidate(&q, Some(&[1.0; 3][..])), 0.0);
    assert_eq!(score_candidate(&q, None), 0.0);

    let mut long = embed("loan");
    long.push(1.0);
    let chunks = vec![
        chunk("short", "loan", Some(vec![1.0; 4])),
        chunk("long", "loan", Some(long)),
        chunk("missing", "loan", None),
        chunk("good", "loan", Some(embed("loan"))),
    ];
    let ranked = rank_chunks(&q, &chunks, 10);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].chunk.chunk_id, "good");
    let hit = ranked[0].to_hit();
    assert_eq!(hit.id, "good");
    assert!((hit.score - 1.0).abs() <= 1e-9);
}
