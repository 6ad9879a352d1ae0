//! Index model for the code-example search.
//!
//! Example snippets are indexed as flat documents with a closed field
//! vocabulary ([`Field`]). Queries are boolean combinations of exact
//! term clauses ([`BooleanQuery`]); [`CodeSearcher`] is the gateway the
//! UI layer talks to, with [`MemoryIndex`] as the in-process backend.

mod document;
mod fields;
mod query;
mod searcher;

pub use document::{DocId, Document, SearchHit, SearchResult, SearchStats};
pub use fields::{DefinitionKind, Field};
pub use query::{BooleanQuery, Occur, TermClause};
pub use searcher::{CodeSearcher, MemoryIndex, SearchError};
