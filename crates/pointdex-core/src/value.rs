use chrono::{DateTime, SecondsFormat};
use pointdex_primitives::NumberKind;
use std::{cmp::Ordering, fmt};

///
/// NumericValue
///
/// One typed value of a numeric field. `Date` carries epoch milliseconds.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumericValue {
    Date(i64),
    Float32(f32),
    Float64(f64),
    Int32(i32),
    Int64(i64),
}

impl NumericValue {
    #[must_use]
    pub const fn kind(self) -> NumberKind {
        match self {
            Self::Date(_) => NumberKind::Date,
            Self::Float32(_) => NumberKind::Float32,
            Self::Float64(_) => NumberKind::Float64,
            Self::Int32(_) => NumberKind::Int32,
            Self::Int64(_) => NumberKind::Int64,
        }
    }

    /// Scalar-column encoding of this value.
    ///
    /// Integers widen to i64; floats keep their IEEE-754 bit pattern, with
    /// the 32-bit pattern sign-extended.
    #[must_use]
    pub const fn to_bits(self) -> i64 {
        match self {
            Self::Date(v) | Self::Int64(v) => v,
            Self::Int32(v) => v as i64,
            Self::Float32(v) => v.to_bits().cast_signed() as i64,
            Self::Float64(v) => v.to_bits().cast_signed(),
        }
    }

    /// Lossy widening used by floating-point comparison filters.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Date(v) | Self::Int64(v) => v as f64,
            Self::Int32(v) => f64::from(v),
            Self::Float32(v) => f64::from(v),
            Self::Float64(v) => v,
        }
    }

    /// Total order between two values of the same kind.
    ///
    /// Floats use IEEE-754 `totalOrder`, so `-0.0 < +0.0`. Mixed kinds do not compare.
    #[must_use]
    pub fn cmp_same_kind(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Date(a), Self::Date(b)) | (Self::Int64(a), Self::Int64(b)) => Some(a.cmp(b)),
            (Self::Int32(a), Self::Int32(b)) => Some(a.cmp(b)),
            (Self::Float32(a), Self::Float32(b)) => Some(a.total_cmp(b)),
            (Self::Float64(a), Self::Float64(b)) => Some(a.total_cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(millis) => match DateTime::from_timestamp_millis(*millis) {
                Some(date) => write!(f, "{}", date.to_rfc3339_opts(SecondsFormat::Millis, true)),
                None => write!(f, "{millis}"),
            },
            Self::Float32(v) => write!(f, "{v:?}"),
            Self::Float64(v) => write!(f, "{v:?}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
        }
    }
}

///
/// TESTS
///
