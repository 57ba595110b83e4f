//! Module: query
//! Responsibility: predicate objects handed to point and column executors.
//! Does not own: strategy choice or bound arithmetic (see `adapter`, `translate`).
//! Boundary: `Query::matches` is the reference evaluation against a `DocReader`.

#[cfg(test)]
mod tests;

use crate::{select::ValueSource, value::NumericValue};
use pointdex_primitives::NumberKind;
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    ops::Bound,
};

///
/// DocReader
///
/// Read access to one document's indexed point values and scalar column.
///

pub trait DocReader {
    fn point_values(&self, field: &str) -> &[NumericValue];

    fn column_values(&self, field: &str) -> &[i64];
}

///
/// Query
///

#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    /// Matches no document.
    MatchNone,
    ColumnRange(ColumnRangeQuery),
    ColumnSet(ColumnSetQuery),
    ValueRange(ValueRangeFilter),
    PointRange(PointRangeQuery),
    PointExact(PointExactQuery),
    PointSet(PointSetQuery),
}

impl Query {
    /// Reference evaluation of this predicate against one document.
    #[must_use]
    pub fn matches(&self, doc: &dyn DocReader) -> bool {
        match self {
            Self::MatchNone => false,
            Self::ColumnRange(q) => q.matches(doc),
            Self::ColumnSet(q) => q.matches(doc),
            Self::ValueRange(q) => q.matches(doc),
            Self::PointRange(q) => q.matches(doc),
            Self::PointExact(q) => q.matches(doc),
            Self::PointSet(q) => q.matches(doc),
        }
    }

    #[must_use]
    pub const fn is_match_none(&self) -> bool {
        matches!(self, Self::MatchNone)
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchNone => f.write_str("MatchNone"),
            Self::ColumnRange(q) => write!(f, "{}:[{} TO {}]", q.field, q.lower, q.upper),
            Self::ColumnSet(q) => write!(f, "{}:{:?}", q.field, q.bits),
            Self::ValueRange(q) => {
                let open = if q.min_inclusive { '[' } else { '{' };
                let close = if q.max_inclusive { ']' } else { '}' };
                write!(f, "frange({}):{open}", q.source)?;
                write_optional(f, q.min)?;
                f.write_str(" TO ")?;
                write_optional(f, q.max)?;
                write!(f, "{close}")
            }
            Self::PointRange(q) => {
                let (open, lower) = match q.lower {
                    Bound::Included(v) => ('[', Some(v)),
                    Bound::Excluded(v) => ('{', Some(v)),
                    Bound::Unbounded => ('[', None),
                };
                let (close, upper) = match q.upper {
                    Bound::Included(v) => (']', Some(v)),
                    Bound::Excluded(v) => ('}', Some(v)),
                    Bound::Unbounded => (']', None),
                };
                write!(f, "{}:{open}", q.field)?;
                write_optional(f, lower)?;
                f.write_str(" TO ")?;
                write_optional(f, upper)?;
                write!(f, "{close}")
            }
            Self::PointExact(q) => write!(f, "{}:{}", q.field, q.value),
            Self::PointSet(q) => {
                let values: Vec<String> = q.values.iter().map(ToString::to_string).collect();
                write!(f, "{}:({})", q.field, values.join(" "))
            }
        }
    }
}

fn write_optional(f: &mut fmt::Formatter<'_>, value: Option<NumericValue>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{v}"),
        None => f.write_str("*"),
    }
}

///
/// ColumnRangeQuery
///
/// Closed `[lower, upper]` range over a scalar column's i64 encoding.
/// An inverted range matches nothing.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnRangeQuery {
    pub field: String,
    pub lower: i64,
    pub upper: i64,
}

impl ColumnRangeQuery {
    fn matches(&self, doc: &dyn DocReader) -> bool {
        doc.column_values(&self.field)
            .iter()
            .any(|bits| (self.lower..=self.upper).contains(bits))
    }
}

///
/// ColumnSetQuery
///
/// Exact-membership test over a scalar column; `bits` is sorted and deduplicated.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnSetQuery {
    pub field: String,
    pub bits: Vec<i64>,
}

impl ColumnSetQuery {
    fn matches(&self, doc: &dyn DocReader) -> bool {
        doc.column_values(&self.field)
            .iter()
            .any(|bits| self.bits.binary_search(bits).is_ok())
    }
}

///
/// ValueRangeFilter
///
/// Per-document decode-and-compare filter. Bounds compare with ordinary
/// floating-point semantics, independent of bit order, so `-0.0 == 0.0`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ValueRangeFilter {
    pub source: ValueSource,
    pub min: Option<NumericValue>,
    pub max: Option<NumericValue>,
    pub min_inclusive: bool,
    pub max_inclusive: bool,
}

impl ValueRangeFilter {
    fn matches(&self, doc: &dyn DocReader) -> bool {
        let Some(value) = self.source.value(doc) else {
            return false;
        };
        let value = value.as_f64();

        let above_min = self.min.is_none_or(|min| {
            let min = min.as_f64();
            if self.min_inclusive {
                value >= min
            } else {
                value > min
            }
        });
        let below_max = self.max.is_none_or(|max| {
            let max = max.as_f64();
            if self.max_inclusive {
                value <= max
            } else {
                value < max
            }
        });

        above_min && below_max
    }
}

///
/// PointRangeQuery
///
/// Range over the indexed point structure, with native numeric ordering.
///

#[derive(Clone, Debug, PartialEq)]
pub struct PointRangeQuery {
    pub field: String,
    pub kind: NumberKind,
    pub lower: Bound<NumericValue>,
    pub upper: Bound<NumericValue>,
}

impl PointRangeQuery {
    fn matches(&self, doc: &dyn DocReader) -> bool {
        doc.point_values(&self.field).iter().any(|value| {
            let above = match &self.lower {
                Bound::Included(min) => value.cmp_same_kind(min).is_some_and(Ordering::is_ge),
                Bound::Excluded(min) => value.cmp_same_kind(min).is_some_and(Ordering::is_gt),
                Bound::Unbounded => value.kind() == self.kind,
            };
            let below = match &self.upper {
                Bound::Included(max) => value.cmp_same_kind(max).is_some_and(Ordering::is_le),
                Bound::Excluded(max) => value.cmp_same_kind(max).is_some_and(Ordering::is_lt),
                Bound::Unbounded => value.kind() == self.kind,
            };

            above && below
        })
    }
}

///
/// PointExactQuery
///

#[derive(Clone, Debug, PartialEq)]
pub struct PointExactQuery {
    pub field: String,
    pub value: NumericValue,
}

impl PointExactQuery {
    fn matches(&self, doc: &dyn DocReader) -> bool {
        doc.point_values(&self.field)
            .iter()
            .any(|value| value.cmp_same_kind(&self.value) == Some(Ordering::Equal))
    }
}

///
/// PointSetQuery
///

#[derive(Clone, Debug, PartialEq)]
pub struct PointSetQuery {
    pub field: String,
    pub values: Vec<NumericValue>,
}

impl PointSetQuery {
    fn matches(&self, doc: &dyn DocReader) -> bool {
        doc.point_values(&self.field).iter().any(|value| {
            self.values
                .iter()
                .any(|candidate| value.cmp_same_kind(candidate) == Some(Ordering::Equal))
        })
    }
}
