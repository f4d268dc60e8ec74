//! Categorical filters applied after search.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Record;

/// Selected value of a categorical filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// No-op: the filter excludes nothing.
    #[default]
    All,
    Value(String),
}

impl Selection {
    pub const ALL_KEY: &'static str = "all";

    pub fn value(value: impl Into<String>) -> Self {
        Selection::from(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == Selection::ALL_KEY {
            Selection::All
        } else {
            Selection::Value(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        match value {
            Selection::All => Selection::ALL_KEY.to_string(),
            Selection::Value(v) => v,
        }
    }
}

/// A named filter over records of type `R`.
///
/// Filters are conjunctive. The pipeline never calls `matches` for an `All`
/// selection.
pub trait RecordFilter<R>: Send + Sync {
    fn id(&self) -> &str;
    fn matches(&self, record: &R, selected: &str) -> bool;
}

/// Exact equality between a field's string form and the selected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalFilter {
    id: String,
    field: String,
}

impl CategoricalFilter {
    pub fn new(id: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
        }
    }

    /// Filter whose id is the field name itself.
    pub fn on(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            id: field.clone(),
            field,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl<R: Record> RecordFilter<R> for CategoricalFilter {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, record: &R, selected: &str) -> bool {
        record
            .field(&self.field)
            .is_some_and(|v| v.as_display() == selected)
    }
}

/// Filter backed by an arbitrary predicate.
pub struct FnFilter<F> {
    id: String,
    predicate: F,
}

impl<F> FnFilter<F> {
    pub fn new(id: impl Into<String>, predicate: F) -> Self {
        Self {
            id: id.into(),
            predicate,
        }
    }
}

impl<R, F> RecordFilter<R> for FnFilter<F>
where
    F: Fn(&R, &str) -> bool + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, record: &R, selected: &str) -> bool {
        (self.predicate)(record, selected)
    }
}

/// Apply one filter with its current selection.
pub fn apply_filter<'a, R>(
    rows: Vec<&'a R>,
    filter: &dyn RecordFilter<R>,
    selection: &Selection,
) -> Vec<&'a R> {
    match selection {
        Selection::All => rows,
        Selection::Value(selected) => rows
            .into_iter()
            .filter(|r| filter.matches(*r, selected))
            .collect(),
    }
}

/// Distinct non-null string forms of `field`, in first-seen order.
///
/// Used to populate a categorical filter's option list.
pub fn distinct_values<'a, R, I>(records: I, field: &str) -> Vec<String>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for record in records {
        if let Some(value) = record.field(field) {
            let display = value.as_display().into_owned();
            if seen.insert(display.clone()) {
                out.push(display);
            }
        }
    }
    out
}
