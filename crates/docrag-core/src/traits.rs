use crate::types::{DocId, Document, DocumentChunk, DocumentStatus, QueryFilter};

pub trait Embedder: Send + Sync {
    /// Stable identifier for the embedding scheme (e.g. `hash:blake3:d128`).
    fn embedder_id(&self) -> &str;
    fn dim(&self) -> usize;
    fn embed(&self, text: &str) -> Vec<f64>;
    fn embed_batch(&self, texts: &[String]) -> Vec<Vec<f64>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Storage collaborator for documents and their chunks.
///
/// `replace_chunks` must behave as one atomic delete-then-insert per document.
pub trait ChunkStore: Send + Sync {
    fn upsert_document(&self, doc: Document);
    fn document(&self, doc_id: &str) -> Option<Document>;
    /// Documents matching `filter`, in storage order.
    fn documents(&self, filter: &QueryFilter) -> Vec<Document>;
    fn replace_chunks(&self, doc_id: &str, chunks: Vec<DocumentChunk>);
    /// Chunks of documents matching `filter`, ordered by `(doc_id, ord)`.
    fn chunks(&self, filter: &QueryFilter) -> Vec<DocumentChunk>;
    fn set_status(&self, doc_id: &str, status: DocumentStatus) -> bool;
    fn document_ids(&self) -> Vec<DocId> {
        self.documents(&QueryFilter::default()).into_iter().map(|d| d.doc_id).collect()
    }
}
