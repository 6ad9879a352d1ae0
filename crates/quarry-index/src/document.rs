use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fields::Field;

/// Index-assigned identity of a stored document.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocId(pub(crate) u32);

impl DocId {
    pub fn from_raw(raw: u32) -> Self {
        DocId(raw)
    }

    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocId({})", self.0)
    }
}

/// A flat multi-valued record describing one indexed snippet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    fields: BTreeMap<Field, Vec<String>>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    pub fn add(&mut self, field: Field, value: impl Into<String>) {
        self.fields.entry(field).or_default().push(value.into());
    }

    /// First stored value for `field`.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields
            .get(&field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All stored values for `field`, in insertion order.
    pub fn all(&self, field: Field) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: Field, value: &str) -> bool {
        self.all(field).iter().any(|v| v == value)
    }
}

/// One matching document together with its score.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: DocId,
    pub score: f32,
    pub doc: Arc<Document>,
}

/// Counters describing how much work a search did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub candidates_considered: usize,
    pub matched: usize,
}

/// Ranked hits plus the stats of the run that produced them.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub hits: Vec<SearchHit>,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The document at `rank`, best match first.
    pub fn doc(&self, rank: usize) -> Option<&Document> {
        self.hits.get(rank).map(|hit| hit.doc.as_ref())
    }
}
