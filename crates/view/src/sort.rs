//! Single-key comparator.
//!
//! Ordering policy:
//! - absent/null values sort last in both directions
//! - text uses a collation-style comparison (case-folded, lowercase first on ties)
//! - other scalars use their natural order
//! - the sort is stable, so equal keys keep input order

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use adminconsole_core::FieldValue;

use crate::Record;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active sort key plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Collation-style text comparison.
///
/// Compares case-folded text first; strings that differ only by case put the
/// lowercase form first.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}

/// Natural order between two present values (kind rank first across kinds).
pub fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => collate(x, y),
        (FieldValue::Integer(x), FieldValue::Integer(y)) => x.cmp(y),
        (FieldValue::Float(x), FieldValue::Float(y)) => compare_floats(*x, *y),
        (FieldValue::Integer(x), FieldValue::Float(y)) => compare_int_float(*x, *y),
        (FieldValue::Float(x), FieldValue::Integer(y)) => compare_int_float(*y, *x).reverse(),
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        (FieldValue::Timestamp(x), FieldValue::Timestamp(y)) => x.cmp(y),
        _ => a.kind_rank().cmp(&b.kind_rank()),
    }
}

/// `-0.0 == 0.0`; NaNs sit at the ends as in `f64::total_cmp`.
fn compare_floats(x: f64, y: f64) -> Ordering {
    if x.is_nan() || y.is_nan() {
        return x.total_cmp(&y);
    }
    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
}

/// Exact comparison; casting `i` to `f64` would lose precision past 2^53.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => compare_floats(0.0, f - whole),
        ord => ord,
    }
}

/// Compare two optional field values under `direction`; `None` is always last.
pub fn compare_fields(
    a: Option<&FieldValue<'_>>,
    b: Option<&FieldValue<'_>>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = compare_values(x, y);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

/// Stable in-place sort of row references by `spec`.
pub fn sort_rows<R: Record>(rows: &mut [&R], spec: &SortSpec) {
    rows.sort_by(|a, b| {
        compare_fields(
            a.field(&spec.field).as_ref(),
            b.field(&spec.field).as_ref(),
            spec.direction,
        )
    });
}
