//! Brute-force similarity ranking over stored chunk vectors.
//!
//! Vectors are unit length by construction, so cosine similarity is the plain
//! dot product. A stored vector that is missing or has the wrong width is
//! scored as a zero vector instead of failing the query.
use std::borrow::Borrow;
use tracing::warn;

use docrag_core::types::{DocumentChunk, SearchHit, SourceKind};
use docrag_core::EMBEDDING_DIM;

/// Dot product of two pre-normalised vectors over their common prefix.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// A chunk paired with its similarity to the query.
#[derive(Debug, Clone)]
pub struct ScoredChunk<C> {
    pub score: f64,
    pub chunk: C,
}

/// Score one stored vector, treating a missing or mis-sized vector as zeros.
pub fn score_candidate(query: &[f64], candidate: Option<&[f64]>) -> f64 {
    match candidate {
        Some(v) if v.len() == EMBEDDING_DIM => cosine(query, v),
        Some(v) => {
            warn!(expected = EMBEDDING_DIM, got = v.len(), "dimension mismatch, scoring as zero vector");
            0.0
        }
        None => 0.0,
    }
}

/// Rank `candidates` against `query`.
///
/// Scores `<= 0` are dropped, the rest are sorted best first (equal scores keep
/// input order) and the list is cut to `limit`.
pub fn rank<C, I, V>(query: &[f64], candidates: I, limit: usize) -> Vec<ScoredChunk<C>>
where
    I: IntoIterator<Item = (C, Option<V>)>,
    V: Borrow<[f64]>,
{
    let mut scored: Vec<ScoredChunk<C>> = candidates
        .into_iter()
        .map(|(chunk, vec)| ScoredChunk { score: score_candidate(query, vec.as_ref().map(|v| <V as Borrow<[f64]>>::borrow(v))), chunk })
        .filter(|s| s.score > 0.0)
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Rank stored chunks by their own vectors.
pub fn rank_chunks<'a>(query: &[f64], chunks: &'a [DocumentChunk], limit: usize) -> Vec<ScoredChunk<&'a DocumentChunk>> {
    rank(query, chunks.iter().map(|c| (c, c.vector.as_deref())), limit)
}

impl ScoredChunk<&DocumentChunk> {
    pub fn to_hit(&self) -> SearchHit {
        SearchHit { id: self.chunk.chunk_id.clone(), doc_id: self.chunk.doc_id.clone(), score: self.score, source: SourceKind::Vector }
    }
}
