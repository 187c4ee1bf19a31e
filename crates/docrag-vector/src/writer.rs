use tracing::{debug, info};

use docrag_core::error::{Error, Result};
use docrag_core::traits::{ChunkStore, Embedder};
use docrag_core::types::{DocumentChunk, DocumentStatus, IndexReport, DEFAULT_CHUNK_TYPE};
use docrag_core::ChunkingConfig;

/// Chunk and embed one document, replacing whatever chunks it had before.
///
/// The document must exist and carry extracted text. Indexing is not
/// incremental: the new chunk set replaces the old one in a single store call.
pub fn index_document<S: ChunkStore + ?Sized>(
    store: &S,
    embedder: &dyn Embedder,
    doc_id: &str,
    chunking: &ChunkingConfig,
) -> Result<IndexReport> {
    let doc = store.document(doc_id).ok_or_else(|| Error::NotFound(format!("document '{doc_id}'")))?;
    let text = doc.text.as_deref().ok_or_else(|| Error::NotFound(format!("extracted text for document '{doc_id}'")))?;

    let pieces = chunking.chunk(text)?;
    let vectors = embedder.embed_batch(&pieces);
    debug!(doc_id, chunks = pieces.len(), embedder = embedder.embedder_id(), "embedded chunks");

    let chunks: Vec<DocumentChunk> = pieces
        .into_iter()
        .zip(vectors)
        .enumerate()
        .map(|(ord, (text, vector))| DocumentChunk {
            chunk_id: format!("{doc_id}:{ord}"),
            doc_id: doc_id.to_string(),
            ord,
            text,
            vector: Some(vector),
            chunk_type: Some(DEFAULT_CHUNK_TYPE.to_string()),
            semantic_tags: None,
        })
        .collect();
    let count = chunks.len();

    store.replace_chunks(doc_id, chunks);
    store.set_status(doc_id, DocumentStatus::Indexed);
    info!(event = "rag_index", doc_id, chunks = count, "indexed document");
    Ok(IndexReport { doc_id: doc_id.to_string(), chunks: count })
}
