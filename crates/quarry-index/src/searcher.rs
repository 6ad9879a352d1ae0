use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::document::{DocId, Document, SearchHit, SearchResult, SearchStats};
use crate::query::{BooleanQuery, Occur};

/// Gateway to whichever backend serves example searches.
///
/// Implementations must be callable from worker threads; a search may
/// block on IO but must not touch UI state.
pub trait CodeSearcher: Send + Sync {
    fn search(&self, query: &BooleanQuery, max_hits: usize) -> Result<SearchResult, SearchError>;
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search backend unavailable: {0}")]
    Unavailable(String),
    #[error("malformed query: {0}")]
    InvalidQuery(String),
}

/// In-process index over [`Document`]s.
///
/// Scoring is the sum of the boosts of every matching clause; documents
/// failing a `Must` clause or matching nothing are excluded. Ties break
/// on ascending document id, so identical corpora rank identically
/// across runs.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    docs: Vec<Arc<Document>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        MemoryIndex::default()
    }

    pub fn insert(&mut self, doc: Document) -> DocId {
        let id = DocId(self.docs.len() as u32);
        self.docs.push(Arc::new(doc));
        id
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl CodeSearcher for MemoryIndex {
    fn search(&self, query: &BooleanQuery, max_hits: usize) -> Result<SearchResult, SearchError> {
        let started = Instant::now();
        let mut stats = SearchStats::default();
        if query.is_empty() || max_hits == 0 {
            return Ok(SearchResult {
                hits: Vec::new(),
                stats,
            });
        }

        let mut hits = Vec::new();
        'docs: for (idx, doc) in self.docs.iter().enumerate() {
            stats.candidates_considered += 1;
            let mut score = 0.0f32;
            let mut matched_any = false;
            for clause in query.clauses() {
                let matches = doc.contains(clause.field, &clause.value);
                if clause.occur == Occur::Must && !matches {
                    continue 'docs;
                }
                if matches {
                    score += clause.boost;
                    matched_any = true;
                }
            }
            if !matched_any {
                continue;
            }
            hits.push(SearchHit {
                id: DocId(idx as u32),
                score,
                doc: Arc::clone(doc),
            });
        }
        stats.matched = hits.len();

        let by_rank =
            |a: &SearchHit, b: &SearchHit| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id));
        if hits.len() > max_hits {
            hits.select_nth_unstable_by(max_hits, by_rank);
            hits.truncate(max_hits);
        }
        hits.sort_unstable_by(by_rank);

        debug!(
            target: "quarry.index",
            query = %query,
            candidates = stats.candidates_considered,
            matched = stats.matched,
            returned = hits.len(),
            elapsed = ?started.elapsed(),
            "example search complete"
        );

        Ok(SearchResult { hits, stats })
    }
}
