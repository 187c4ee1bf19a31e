//! docrag-hybrid
//!
//! Query orchestration: embed the query, rank the filtered candidate chunks,
//! and fall back to raw substring search when nothing scores above zero.
use std::time::Instant;
use tracing::info;

use docrag_core::config::RetrievalConfig;
use docrag_core::error::Result;
use docrag_core::traits::{ChunkStore, Embedder};
use docrag_core::types::{Answer, IndexReport, RagQuery, RagResponse, SearchHit, DEFAULT_CHUNK_TYPE};
use docrag_core::ChunkingConfig;
use docrag_embed::get_default_embedder;
use docrag_text::{excerpt, fallback_search};
use docrag_vector::{index_document, rank_chunks};

pub struct RetrievalEngine<S> where S: ChunkStore {
    store: S,
    embedder: Box<dyn Embedder>,
    config: RetrievalConfig,
    chunking: ChunkingConfig,
}

impl<S> RetrievalEngine<S> where S: ChunkStore {
    /// Fails when the configured chunk window cannot advance.
    pub fn new(store: S, embedder: Box<dyn Embedder>, config: RetrievalConfig) -> Result<Self> {
        let chunking = config.chunking()?;
        Ok(Self { store, embedder, config, chunking })
    }

    /// Engine over `store` with the hashing embedder and default settings.
    pub fn with_defaults(store: S) -> Self {
        Self { store, embedder: get_default_embedder(), config: RetrievalConfig::default(), chunking: ChunkingConfig::default() }
    }

    pub fn store(&self) -> &S { &self.store }

    pub fn config(&self) -> &RetrievalConfig { &self.config }

    pub fn index(&self, doc_id: &str) -> Result<IndexReport> {
        index_document(&self.store, self.embedder.as_ref(), doc_id, &self.chunking)
    }

    /// Index every stored document that has extracted text.
    pub fn index_all(&self) -> Result<Vec<IndexReport>> {
        self.store
            .document_ids()
            .into_iter()
            .filter(|id| self.store.document(id).is_some_and(|d| d.text.is_some()))
            .map(|id| self.index(&id))
            .collect()
    }

    /// Ranked hits without excerpts: vector hits, or substring hits when no
    /// chunk scores above zero.
    pub fn search(&self, query: &RagQuery) -> Vec<SearchHit> {
        let q = query.q.trim();
        if q.is_empty() { return vec![]; }
        let limit = query.limit.unwrap_or(self.config.default_limit);
        let filter = query.filter();

        let chunks = self.store.chunks(&filter);
        let hits: Vec<SearchHit> = rank_chunks(&self.embedder.embed(q), &chunks, limit).iter().map(|s| s.to_hit()).collect();
        if !hits.is_empty() { return hits; }
        fallback_search(q, &self.store.documents(&filter), limit)
    }

    pub fn query(&self, query: &RagQuery) -> RagResponse {
        let start = Instant::now();
        let q = query.q.trim();
        if q.is_empty() { return RagResponse::empty(q); }

        let limit = query.limit.unwrap_or(self.config.default_limit);
        let filter = query.filter();
        let qv = self.embedder.embed(q);

        let chunks = self.store.chunks(&filter);
        let mut answers: Vec<Answer> = rank_chunks(&qv, &chunks, limit)
            .into_iter()
            .map(|s| Answer {
                text: excerpt(&s.chunk.text, self.config.excerpt_chars),
                doc_id: s.chunk.doc_id.clone(),
                similarity: round_to(s.score, 4),
                chunk_type: s.chunk.chunk_type.clone(),
                semantic_tags: s.chunk.semantic_tags.clone(),
            })
            .collect();

        let fallback = answers.is_empty();
        if fallback {
            let documents = self.store.documents(&filter);
            answers = fallback_search(q, &documents, limit)
                .into_iter()
                .filter_map(|hit| documents.iter().find(|d| d.doc_id == hit.doc_id))
                .map(|d| Answer {
                    text: excerpt(d.text.as_deref().unwrap_or_default(), self.config.excerpt_chars),
                    doc_id: d.doc_id.clone(),
                    similarity: 0.0,
                    chunk_type: Some(DEFAULT_CHUNK_TYPE.to_string()),
                    semantic_tags: None,
                })
                .collect();
        }

        let processing_time = round_to(start.elapsed().as_secs_f64(), 3);
        info!(query = q, candidates = chunks.len(), results = answers.len(), fallback, "rag query");
        RagResponse { total_results: answers.len(), answers, query: q.to_string(), processing_time }
    }
}

fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}
