//! Domain types shared by the embedder, ranker, store and engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed embedding width shared by the embedder and the ranker.
pub const EMBEDDING_DIM: usize = 128;

/// Upper bound on stored extracted text, in characters.
pub const MAX_EXTRACTED_CHARS: usize = 1_000_000;

/// Chunk type assigned by the indexer and by fallback answers.
pub const DEFAULT_CHUNK_TYPE: &str = "text";

pub type ChunkId = String;
pub type DocId = String;
pub type MetaMap = BTreeMap<String, MetaValue>;

/// Loosely typed metadata value (JSON-shaped) attached to documents and chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<MetaValue>),
    Map(MetaMap),
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self { MetaValue::String(s.to_string()) }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self { MetaValue::String(s) }
}

impl From<f64> for MetaValue {
    fn from(n: f64) -> Self { MetaValue::Number(n) }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self { MetaValue::Bool(b) }
}

impl<T: Into<MetaValue>> From<Vec<T>> for MetaValue {
    fn from(items: Vec<T>) -> Self { MetaValue::List(items.into_iter().map(Into::into).collect()) }
}

/// Processing state of a document. Only moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Extracted,
    Indexed,
}

/// A source document as seen by the retrieval engine.
///
/// - `doc_id`: stable document identity
/// - `loan_id`/`doc_type`: optional query filter keys
/// - `text`: extracted text, `None` until extraction has happened
/// - `status`: see [`DocumentStatus`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: DocId,
    pub loan_id: Option<String>,
    pub doc_type: Option<String>,
    pub path: String,
    pub text: Option<String>,
    pub status: DocumentStatus,
}

impl Document {
    pub fn new(doc_id: impl Into<DocId>, path: impl Into<String>) -> Self {
        Self { doc_id: doc_id.into(), loan_id: None, doc_type: None, path: path.into(), text: None, status: DocumentStatus::Pending }
    }

    #[must_use]
    pub fn with_loan(mut self, loan_id: impl Into<String>) -> Self { self.loan_id = Some(loan_id.into()); self }

    #[must_use]
    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self { self.doc_type = Some(doc_type.into()); self }

    /// Attach extracted text (capped at [`MAX_EXTRACTED_CHARS`]) and mark the document extracted.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_extracted_text(text.into());
        self
    }

    pub fn set_extracted_text(&mut self, mut text: String) {
        if let Some((cut, _)) = text.char_indices().nth(MAX_EXTRACTED_CHARS) {
            text.truncate(cut);
        }
        self.text = Some(text);
        self.status = DocumentStatus::Extracted;
    }
}

/// One overlapping window of a document, the unit of indexing and retrieval.
///
/// `vector` is optional because stored rows may lack one; the ranker treats
/// a missing or wrongly sized vector as all zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub chunk_id: ChunkId,
    pub doc_id: DocId,
    pub ord: usize,
    pub text: String,
    pub vector: Option<Vec<f64>>,
    pub chunk_type: Option<String>,
    pub semantic_tags: Option<MetaValue>,
}

/// Indicates which path produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceKind {
    Vector,
    Text,
}

/// The minimal surface returned by the ranker and the fallback searcher.
///
/// `id` is a chunk id for vector hits and a document id for text hits.
/// Higher `score` is better; text hits always score `0.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub doc_id: DocId,
    pub score: f64,
    pub source: SourceKind,
}

/// Caller-side candidate filter applied before ranking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryFilter {
    pub loan_id: Option<String>,
    pub doc_type: Option<String>,
}

impl QueryFilter {
    pub fn matches(&self, doc: &Document) -> bool {
        let loan_ok = self.loan_id.as_ref().map_or(true, |l| doc.loan_id.as_ref() == Some(l));
        let type_ok = self.doc_type.as_ref().map_or(true, |t| doc.doc_type.as_ref() == Some(t));
        loan_ok && type_ok
    }

    pub fn is_empty(&self) -> bool { self.loan_id.is_none() && self.doc_type.is_none() }
}

/// A retrieval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagQuery {
    pub q: String,
    #[serde(default)]
    pub loan_id: Option<String>,
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl RagQuery {
    pub fn new(q: impl Into<String>) -> Self { Self { q: q.into(), loan_id: None, doc_type: None, limit: None } }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self { self.limit = Some(limit); self }

    pub fn filter(&self) -> QueryFilter { QueryFilter { loan_id: self.loan_id.clone(), doc_type: self.doc_type.clone() } }
}

/// One answer in a query response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub doc_id: DocId,
    pub similarity: f64,
    pub chunk_type: Option<String>,
    pub semantic_tags: Option<MetaValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagResponse {
    pub answers: Vec<Answer>,
    pub query: String,
    pub total_results: usize,
    pub processing_time: f64,
}

impl RagResponse {
    pub fn empty(query: impl Into<String>) -> Self { Self { answers: vec![], query: query.into(), total_results: 0, processing_time: 0.0 } }
}

/// Outcome of indexing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
    pub doc_id: DocId,
    pub chunks: usize,
}
