//! In-memory document and chunk store.
//!
//! One `RwLock` guards documents and chunks together, so replacing a
//! document's chunks is a single delete-then-insert that readers never see
//! half done.
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use docrag_core::traits::ChunkStore;
use docrag_core::types::{DocId, Document, DocumentChunk, DocumentStatus, QueryFilter};

#[derive(Default)]
struct Inner {
    docs: Vec<Document>,
    positions: HashMap<DocId, usize>,
    chunks: BTreeMap<DocId, Vec<DocumentChunk>>,
}

impl Inner {
    fn doc(&self, doc_id: &str) -> Option<&Document> { self.positions.get(doc_id).map(|&i| &self.docs[i]) }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_documents(docs: impl IntoIterator<Item = Document>) -> Self {
        let store = Self::new();
        for doc in docs { store.upsert_document(doc); }
        store
    }

    pub fn chunk_count(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).chunks.values().map(Vec::len).sum()
    }
}

impl ChunkStore for MemoryStore {
    fn upsert_document(&self, doc: Document) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let existing = inner.positions.get(&doc.doc_id).copied();
        if let Some(i) = existing {
            inner.docs[i] = doc;
        } else {
            let i = inner.docs.len();
            inner.positions.insert(doc.doc_id.clone(), i);
            inner.docs.push(doc);
        }
    }

    fn document(&self, doc_id: &str) -> Option<Document> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).doc(doc_id).cloned()
    }

    fn documents(&self, filter: &QueryFilter) -> Vec<Document> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.docs.iter().filter(|d| filter.matches(d)).cloned().collect()
    }

    fn replace_chunks(&self, doc_id: &str, mut chunks: Vec<DocumentChunk>) {
        chunks.sort_by_key(|c| c.ord);
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.chunks.remove(doc_id);
        if !chunks.is_empty() { inner.chunks.insert(doc_id.to_string(), chunks); }
    }

    fn chunks(&self, filter: &QueryFilter) -> Vec<DocumentChunk> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .chunks
            .iter()
            .filter(|(doc_id, _)| filter.is_empty() || inner.doc(doc_id).is_some_and(|d| filter.matches(d)))
            .flat_map(|(_, chunks)| chunks.iter().cloned())
            .collect()
    }

    fn set_status(&self, doc_id: &str, status: DocumentStatus) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let Some(i) = inner.positions.get(doc_id).copied() else { return false };
        inner.docs[i].status = status;
        true
    }
}
