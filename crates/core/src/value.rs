//! Scalar field values addressable by name on a record.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};

/// A scalar read from a record field.
///
/// Absent fields and JSON `null` are represented by `None` at the call site
/// (`Option<FieldValue>`), never by a variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
    Text(Cow<'a, str>),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }

    /// String form used for search matching and categorical equality.
    pub fn as_display(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Bool(b) => Cow::Owned(b.to_string()),
            FieldValue::Integer(i) => Cow::Owned(i.to_string()),
            FieldValue::Float(f) => Cow::Owned(f.to_string()),
            FieldValue::Timestamp(ts) => {
                Cow::Owned(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }

    /// Rank of the scalar kind, used to keep ordering total across kinds.
    pub fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Integer(_) | FieldValue::Float(_) => 1,
            FieldValue::Timestamp(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }

    /// Read a scalar out of a JSON value. Arrays, objects and `null` yield `None`.
    pub fn from_json(value: &'a serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(FieldValue::Bool(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(FieldValue::Integer(i)),
                None => n.as_f64().map(FieldValue::Float),
            },
            serde_json::Value::String(s) => Some(FieldValue::text(s)),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for FieldValue<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue<'static> {
    fn from(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn display_forms() {
        assert_eq!(FieldValue::Integer(42).as_display(), "42");
        assert_eq!(FieldValue::Bool(true).as_display(), "true");
        assert_eq!(FieldValue::text("ACTIVE").as_display(), "ACTIVE");

        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        assert_eq!(FieldValue::Timestamp(ts).as_display(), "2024-05-01T08:30:00.000Z");
    }

    #[test]
    fn json_scalars_are_read_and_composites_are_not() {
        let doc = json!({"n": 7, "f": 1.5, "s": "x", "null": null, "arr": [1]});

        assert_eq!(FieldValue::from_json(&doc["n"]), Some(FieldValue::Integer(7)));
        assert_eq!(FieldValue::from_json(&doc["f"]), Some(FieldValue::Float(1.5)));
        assert_eq!(FieldValue::from_json(&doc["s"]), Some(FieldValue::text("x")));
        assert_eq!(FieldValue::from_json(&doc["null"]), None);
        assert_eq!(FieldValue::from_json(&doc["arr"]), None);
    }
}
