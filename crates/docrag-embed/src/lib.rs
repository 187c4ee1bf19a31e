//! Deterministic hashed bag-of-words embeddings.
//!
//! Each token is hashed with BLAKE3; the first two digest bytes (big-endian)
//! modulo the dimension pick a bucket whose count is incremented. The count
//! vector is then L2-normalised. This is the hashing trick, not a semantic
//! model: distinct tokens that land in the same bucket are indistinguishable,
//! which costs some precision and recall and is expected behaviour.

mod pool;
mod tokenize;

pub use pool::{l2_norm, l2_normalize};
pub use tokenize::{tokenize, Tokens};

use docrag_core::traits::Embedder;
use docrag_core::EMBEDDING_DIM;

/// Bucket index in `[0, dim)` for one token.
///
/// # Panics
/// Panics if `dim` is zero.
pub fn bucket(token: &str, dim: usize) -> usize {
    let digest = blake3::hash(token.as_bytes());
    let bytes = digest.as_bytes();
    usize::from(u16::from_be_bytes([bytes[0], bytes[1]])) % dim
}

/// Embed `text` into an `EMBEDDING_DIM`-wide unit vector (all zeros when it has no tokens).
pub fn embed(text: &str) -> Vec<f64> { HashingEmbedder::default().embed(text) }

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
    id: String,
}

impl Default for HashingEmbedder {
    fn default() -> Self { Self::new(EMBEDDING_DIM) }
}

impl HashingEmbedder {
    /// # Panics
    /// Panics if `dim` is zero.
    pub fn new(dim: usize) -> Self {
        assert!(dim > 0, "embedding dimension must be positive");
        Self { dim, id: format!("hash:blake3:d{dim}") }
    }

    pub fn bucket(&self, token: &str) -> usize { bucket(token, self.dim) }
}

impl Embedder for HashingEmbedder {
    fn embedder_id(&self) -> &str { &self.id }

    fn dim(&self) -> usize { self.dim }

    fn embed(&self, text: &str) -> Vec<f64> {
        let mut v = vec![0f64; self.dim];
        for token in tokenize(text) { v[self.bucket(&token)] += 1.0; }
        l2_normalize(&mut v);
        v
    }
}

/// The embedder used by the engine and the CLI.
pub fn get_default_embedder() -> Box<dyn Embedder> { Box::new(HashingEmbedder::default()) }
