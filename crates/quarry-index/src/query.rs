use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields::Field;

/// Whether a clause is required or merely rewards matching documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occur {
    Must,
    Should,
}

/// One exact term restricted to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermClause {
    pub field: Field,
    pub value: String,
    pub occur: Occur,
    pub boost: f32,
}

impl fmt::Display for TermClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.occur == Occur::Must {
            f.write_str("+")?;
        }
        write!(f, "{}:{}", self.field, self.value)?;
        if self.boost != 1.0 {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}

/// A flat boolean combination of [`TermClause`]s.
///
/// Documents must satisfy every `Must` clause; `Should` clauses only
/// raise the score. Clause order is preserved, and repeated clauses are
/// kept, each contributing its boost again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanQuery {
    clauses: Vec<TermClause>,
}

impl BooleanQuery {
    pub fn new() -> Self {
        BooleanQuery::default()
    }

    pub fn push(&mut self, clause: TermClause) {
        self.clauses.push(clause);
    }

    pub fn push_must(&mut self, field: Field, value: impl Into<String>) {
        self.push(TermClause {
            field,
            value: value.into(),
            occur: Occur::Must,
            boost: 1.0,
        });
    }

    pub fn push_should(&mut self, field: Field, value: impl Into<String>) {
        self.push_should_boosted(field, value, 1.0);
    }

    pub fn push_should_boosted(&mut self, field: Field, value: impl Into<String>, boost: f32) {
        self.push(TermClause {
            field,
            value: value.into(),
            occur: Occur::Should,
            boost,
        });
    }

    pub fn clauses(&self) -> &[TermClause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The value of the first `Must` clause, if the query carries one.
    ///
    /// Consumers use this to recover the term the query was anchored
    /// on, e.g. the variable type of a usage query, without re-running
    /// classification.
    pub fn must_value(&self) -> Option<&str> {
        self.clauses
            .iter()
            .find(|c| c.occur == Occur::Must)
            .map(|c| c.value.as_str())
    }
}

impl fmt::Display for BooleanQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
