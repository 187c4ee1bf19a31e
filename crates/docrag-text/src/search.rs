use tracing::debug;

use docrag_core::types::{Document, SearchHit, SourceKind};

/// Literal substring search over full document text.
///
/// Used only when vector ranking comes back empty. The raw query is matched
/// as written (case-sensitive, no tokenization). Hits keep storage order and
/// always score `0.0` so callers can tell them from ranked results.
pub fn fallback_search<'a, I>(query: &str, documents: I, limit: usize) -> Vec<SearchHit>
where
    I: IntoIterator<Item = &'a Document>,
{
    let hits: Vec<SearchHit> = documents
        .into_iter()
        .filter(|d| d.text.as_deref().is_some_and(|t| t.contains(query)))
        .take(limit)
        .map(|d| SearchHit { id: d.doc_id.clone(), doc_id: d.doc_id.clone(), score: 0.0, source: SourceKind::Text })
        .collect();
    debug!(query, hits = hits.len(), "fallback text search");
    hits
}

/// First `max_chars` characters of `text`, with `…` appended when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
