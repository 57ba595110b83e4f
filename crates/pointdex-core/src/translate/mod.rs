//! Module: translate
//! Responsibility: textual range bounds to closed scalar-column bit ranges.
//! Does not own: choosing between point and column strategies (see `adapter`).
//! Boundary: leaf module; the adapter calls in only for column-only fields.


use crate::{
    codec::{FloatBits, NumberCodec, ValueParseError, codec_for},
    date::DateMath,
    error::InternalError,
    model::field::FieldConfig,
    query::{ColumnRangeQuery, Query, ValueRangeFilter},
    select::ValueSource,
    value::NumericValue,
};
use pointdex_primitives::NumberKind;
use thiserror::Error as ThisError;

///
/// BoundParseError
///
/// A range bound's text could not be read as the field's kind.
///

#[derive(Debug, ThisError)]
#[error("invalid range bound for field '{field}': {source}")]
pub struct BoundParseError {
    pub field: String,
    #[source]
    pub source: ValueParseError,
}

///
/// RangeRequest
///
/// Textual `[min, max]` request; a missing side is unbounded.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RangeRequest<'a> {
    pub min: Option<&'a str>,
    pub max: Option<&'a str>,
    pub min_inclusive: bool,
    pub max_inclusive: bool,
}

impl<'a> RangeRequest<'a> {
    #[must_use]
    pub const fn new(
        min: Option<&'a str>,
        max: Option<&'a str>,
        min_inclusive: bool,
        max_inclusive: bool,
    ) -> Self {
        Self {
            min,
            max,
            min_inclusive,
            max_inclusive,
        }
    }

    /// Both sides inclusive.
    #[must_use]
    pub const fn closed(min: Option<&'a str>, max: Option<&'a str>) -> Self {
        Self::new(min, max, true, true)
    }

    /// Singleton `[value, value]`.
    #[must_use]
    pub const fn point(value: &'a str) -> Self {
        Self::closed(Some(value), Some(value))
    }
}

///
/// FloatRangePlan
///
/// Outcome of float branch selection. `BitRange` bounds are raw bit patterns
/// with `None` meaning unbounded on that side.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FloatRangePlan {
    BitRange {
        lower: Option<i64>,
        upper: Option<i64>,
        lower_inclusive: bool,
        upper_inclusive: bool,
    },
    ComparisonFallback,
}

/// Translate a range request against a single-valued scalar column.
pub fn translate_range(
    field: &FieldConfig,
    request: RangeRequest<'_>,
    dates: &DateMath,
) -> Result<Query, InternalError> {
    if field.kind().is_floating() {
        translate_floating_point(field, request)
    } else {
        translate_integer_like(field, request, dates)
    }
}

/// Translate an Int32, Int64 or Date range; the encoding is already ordered.
pub fn translate_integer_like(
    field: &FieldConfig,
    request: RangeRequest<'_>,
    dates: &DateMath,
) -> Result<Query, InternalError> {
    let codec = codec_for(field.kind());
    if codec.float_bits().is_some() {
        return Err(InternalError::query_internal(format!(
            "integer range translation reached floating field '{}' ({})",
            field.name(),
            field.kind(),
        )));
    }

    let lower = parse_bound(field, codec, request.min, dates)?;
    let upper = parse_bound(field, codec, request.max, dates)?;

    Ok(column_range_query(
        field.name(),
        lower.map(NumericValue::to_bits),
        upper.map(NumericValue::to_bits),
        request.min_inclusive,
        request.max_inclusive,
    ))
}

/// Translate a Float32 or Float64 range, falling back to a comparison
/// filter when the request straddles zero.
pub fn translate_floating_point(
    field: &FieldConfig,
    request: RangeRequest<'_>,
) -> Result<Query, InternalError> {
    let codec = codec_for(field.kind());
    if codec.float_bits().is_none() {
        return Err(InternalError::query_internal(format!(
            "floating range translation reached non-floating field '{}' ({})",
            field.name(),
            field.kind(),
        )));
    }

    // Float codecs never consult the date parser.
    let dates = DateMath::new();
    let min = parse_bound(field, codec, request.min, &dates)?;
    let max = parse_bound(field, codec, request.max, &dates)?;

    let plan = plan_float_range(
        field.kind(),
        min,
        max,
        request.min_inclusive,
        request.max_inclusive,
    )?;

    let query = match plan {
        FloatRangePlan::BitRange {
            lower,
            upper,
            lower_inclusive,
            upper_inclusive,
        } => column_range_query(field.name(), lower, upper, lower_inclusive, upper_inclusive),
        FloatRangePlan::ComparisonFallback => {
            log::debug!(
                "range on '{}' straddles zero; using per-document comparison filter",
                field.name()
            );

            Query::ValueRange(ValueRangeFilter {
                source: ValueSource::Column {
                    field: field.name().to_string(),
                    kind: field.kind(),
                },
                min,
                max,
                min_inclusive: request.min_inclusive,
                max_inclusive: request.max_inclusive,
            })
        }
    };

    Ok(query)
}

/// Choose the bit range that expresses a float range, if one exists.
///
/// Non-negative ranges keep numeric order. All-negative ranges reverse it,
/// so bounds and their inclusivity swap. `-0.0` belongs to the negative
/// region. A range straddling zero has no contiguous bit range.
pub fn plan_float_range(
    kind: NumberKind,
    min: Option<NumericValue>,
    max: Option<NumericValue>,
    min_inclusive: bool,
    max_inclusive: bool,
) -> Result<FloatRangePlan, InternalError> {
    let Some(landmarks) = codec_for(kind).float_bits() else {
        return Err(InternalError::query_internal(format!(
            "no float bit landmarks for kind {kind}"
        )));
    };
    for bound in [min, max].into_iter().flatten() {
        if bound.kind() != kind {
            return Err(InternalError::query_internal(format!(
                "{} bound passed to {kind} range planning",
                bound.kind()
            )));
        }
    }

    let min_negative = min.is_none_or(|v| is_negative(v, landmarks));
    let max_non_negative = max.is_none_or(|v| v.as_f64() > 0.0 || v.to_bits() == landmarks.zero);
    let max_negative = max.is_some_and(|v| is_negative(v, landmarks));

    let plan = if min_negative && max_non_negative {
        FloatRangePlan::ComparisonFallback
    } else if min_negative && max_negative {
        FloatRangePlan::BitRange {
            lower: max.map(NumericValue::to_bits),
            upper: Some(min.map_or(landmarks.negative_infinity, NumericValue::to_bits)),
            lower_inclusive: max_inclusive,
            upper_inclusive: min_inclusive,
        }
    } else {
        FloatRangePlan::BitRange {
            lower: min.map(NumericValue::to_bits),
            upper: Some(max.map_or(landmarks.positive_infinity, NumericValue::to_bits)),
            lower_inclusive: min_inclusive,
            upper_inclusive: max_inclusive,
        }
    };

    Ok(plan)
}

fn is_negative(value: NumericValue, landmarks: FloatBits) -> bool {
    value.as_f64() < 0.0 || value.to_bits() == landmarks.negative_zero
}

/// Close an i64 range, converting exclusive bounds to inclusive ones.
///
/// Excluding `i64::MAX` from below or `i64::MIN` from above leaves nothing
/// to match.
#[must_use]
pub fn column_range_query(
    field: &str,
    lower: Option<i64>,
    upper: Option<i64>,
    lower_inclusive: bool,
    upper_inclusive: bool,
) -> Query {
    let lower = match lower {
        None => i64::MIN,
        Some(v) if lower_inclusive => v,
        Some(v) => match v.checked_add(1) {
            Some(next) => next,
            None => return Query::MatchNone,
        },
    };
    let upper = match upper {
        None => i64::MAX,
        Some(v) if upper_inclusive => v,
        Some(v) => match v.checked_sub(1) {
            Some(prev) => prev,
            None => return Query::MatchNone,
        },
    };

    Query::ColumnRange(ColumnRangeQuery {
        field: field.to_string(),
        lower,
        upper,
    })
}

pub(crate) fn parse_bound(
    field: &FieldConfig,
    codec: &dyn NumberCodec,
    text: Option<&str>,
    dates: &DateMath,
) -> Result<Option<NumericValue>, BoundParseError> {
    text.map(|text| codec.parse(text, dates))
        .transpose()
        .map_err(|source| BoundParseError {
            field: field.name().to_string(),
            source,
        })
}
