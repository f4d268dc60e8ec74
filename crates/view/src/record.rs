//! Records and the in-memory collection backing a table.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use adminconsole_core::{DomainError, DomainResult, FieldValue};

/// A uniform row whose fields are addressable by name.
///
/// `None` means the field is absent or null; callers never get an error for
/// an unknown field name.
pub trait Record {
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

/// Map-backed record for ad hoc data (JSON rows, fixtures).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynRecord(BTreeMap<String, serde_json::Value>);

impl DynRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn field_names(&self) -> BTreeSet<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

impl Record for DynRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.0.get(name).and_then(FieldValue::from_json)
    }
}

impl From<BTreeMap<String, serde_json::Value>> for DynRecord {
    fn from(value: BTreeMap<String, serde_json::Value>) -> Self {
        Self(value)
    }
}

/// Ordered working set of records for one table.
///
/// The collection is replaced wholesale by the latest completed load; it is
/// never patched in place ahead of a confirmed backend response.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCollection<R> {
    records: Vec<R>,
}

impl<R> Default for RecordCollection<R> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<R> RecordCollection<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    /// Swap in a freshly loaded set, returning the previous one.
    pub fn replace(&mut self, records: Vec<R>) -> Vec<R> {
        std::mem::replace(&mut self.records, records)
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }
}

impl RecordCollection<DynRecord> {
    /// Build a collection of map-backed rows, enforcing a single schema.
    pub fn from_dyn(records: Vec<DynRecord>) -> DomainResult<Self> {
        if let Some(first) = records.first() {
            let schema = first.field_names();
            if let Some((idx, _)) = records
                .iter()
                .enumerate()
                .skip(1)
                .find(|(_, r)| r.field_names() != schema)
            {
                return Err(DomainError::invariant(format!(
                    "record {idx} does not match the collection schema {schema:?}"
                )));
            }
        }
        Ok(Self::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_and_null_fields_read_as_none() {
        let r = DynRecord::new().with("name", "Ann").with("manager", serde_json::Value::Null);

        assert_eq!(r.field("name"), Some(FieldValue::text("Ann")));
        assert_eq!(r.field("manager"), None);
        assert_eq!(r.field("nope"), None);
    }

    #[test]
    fn mixed_schemas_are_rejected() {
        let rows = vec![
            DynRecord::new().with("a", 1).with("b", 2),
            DynRecord::new().with("a", 1),
        ];
        let err = RecordCollection::from_dyn(rows).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(msg) if msg.contains("record 1")));
    }

    #[test]
    fn uniform_schema_is_accepted() {
        let rows: Vec<DynRecord> =
            serde_json::from_value(json!([{"a": 1, "b": "x"}, {"a": 2, "b": null}])).unwrap();
        let collection = RecordCollection::from_dyn(rows).unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn replace_swaps_whole_set() {
        let mut c = RecordCollection::new(vec![1, 2, 3]);
        let old = c.replace(vec![4]);
        assert_eq!(old, vec![1, 2, 3]);
        assert_eq!(c.as_slice(), &[4]);
    }
}
