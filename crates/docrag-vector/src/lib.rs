//! docrag-vector
//!
//! Vector side of retrieval: similarity ranking (`search`), an in-memory
//! chunk store (`store`) and the document indexer (`writer`).
pub mod search;
pub mod store;
pub mod writer;

pub use search::{cosine, rank, rank_chunks, score_candidate, ScoredChunk};
pub use store::MemoryStore;
pub use writer::index_document;
