//! Free-text search over named fields.

use crate::Record;

/// Case-insensitive substring search across a fixed set of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    needle: String,
    fields: Vec<String>,
}

impl SearchPredicate {
    pub fn new<I, S>(query: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            needle: query.to_lowercase(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Empty query or empty field list excludes nothing.
    pub fn is_identity(&self) -> bool {
        self.needle.is_empty() || self.fields.is_empty()
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        if self.is_identity() {
            return true;
        }
        self.fields.iter().any(|name| {
            record
                .field(name)
                .is_some_and(|v| v.as_display().to_lowercase().contains(&self.needle))
        })
    }

    pub fn apply<'a, R: Record>(&self, rows: Vec<&'a R>) -> Vec<&'a R> {
        if self.is_identity() {
            return rows;
        }
        rows.into_iter().filter(|r| self.matches(*r)).collect()
    }
}
