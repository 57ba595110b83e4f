//! Module: adapter
//! Responsibility: schema-driven choice between point and scalar-column paths.
//! Does not own: bit-level range math (see `translate`) or query execution.
//! Boundary: the public query and indexing entry points for point fields.


use crate::{
    codec::codec_for,
    date::DateMath,
    document::{DocumentFields, FieldBuildError},
    error::InternalError,
    model::field::FieldConfig,
    query::{ColumnSetQuery, PointExactQuery, PointRangeQuery, PointSetQuery, Query},
    select::{MultiValueSelector, SelectError, ValueSource},
    translate::{RangeRequest, parse_bound, translate_range},
    value::NumericValue,
};
use std::ops::Bound;

///
/// PointFieldAdapter
///
/// Stateless apart from its date parser; every operation reads only the
/// `FieldConfig` it is handed.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct PointFieldAdapter {
    dates: DateMath,
}

impl PointFieldAdapter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dates: DateMath::new(),
        }
    }

    #[must_use]
    pub const fn with_date_math(dates: DateMath) -> Self {
        Self { dates }
    }

    #[must_use]
    pub const fn date_math(&self) -> &DateMath {
        &self.dates
    }

    /// Build a range query, using the scalar column only when the field has
    /// no point index and at most one value per document.
    pub fn range_query(
        &self,
        field: &FieldConfig,
        request: RangeRequest<'_>,
    ) -> Result<Query, InternalError> {
        if field.is_column_only() && !field.multi_valued() {
            log::debug!("range on '{}' uses the scalar column", field.name());

            return translate_range(field, request, &self.dates);
        }

        self.point_range_query(field, request)
    }

    /// Build a range query over the indexed point structure.
    pub fn point_range_query(
        &self,
        field: &FieldConfig,
        request: RangeRequest<'_>,
    ) -> Result<Query, InternalError> {
        let codec = codec_for(field.kind());
        let min = parse_bound(field, codec, request.min, &self.dates)?;
        let max = parse_bound(field, codec, request.max, &self.dates)?;

        Ok(Query::PointRange(PointRangeQuery {
            field: field.name().to_string(),
            kind: field.kind(),
            lower: to_bound(min, request.min_inclusive),
            upper: to_bound(max, request.max_inclusive),
        }))
    }

    /// Build an exact-match query; column-only fields use a singleton range.
    pub fn exact_query(&self, field: &FieldConfig, text: &str) -> Result<Query, InternalError> {
        if field.is_column_only() {
            return self.range_query(field, RangeRequest::point(text));
        }

        let codec = codec_for(field.kind());
        let value = parse_bound(field, codec, Some(text), &self.dates)?;

        Ok(value.map_or(Query::MatchNone, |value| {
            Query::PointExact(PointExactQuery {
                field: field.name().to_string(),
                value,
            })
        }))
    }

    /// Build a membership query over any number of values.
    pub fn set_query<'a>(
        &self,
        field: &FieldConfig,
        texts: impl IntoIterator<Item = &'a str>,
    ) -> Result<Query, InternalError> {
        let codec = codec_for(field.kind());
        let values = texts
            .into_iter()
            .map(|text| parse_bound(field, codec, Some(text), &self.dates))
            .filter_map(Result::transpose)
            .collect::<Result<Vec<_>, _>>()?;

        if values.is_empty() {
            return Ok(Query::MatchNone);
        }

        if field.is_column_only() {
            let mut bits: Vec<i64> = values.iter().map(|value| value.to_bits()).collect();
            bits.sort_unstable();
            bits.dedup();

            return Ok(Query::ColumnSet(ColumnSetQuery {
                field: field.name().to_string(),
                bits,
            }));
        }

        Ok(Query::PointSet(PointSetQuery {
            field: field.name().to_string(),
            values,
        }))
    }

    /// Resolve the accessor that yields one value per document.
    ///
    /// Single-valued fields ignore the selector. Multi-valued fields need a
    /// scalar column and a selector with a numeric reduction.
    pub fn single_value_source(
        &self,
        field: &FieldConfig,
        selector: MultiValueSelector,
    ) -> Result<ValueSource, InternalError> {
        if !field.multi_valued() {
            return Ok(ValueSource::Column {
                field: field.name().to_string(),
                kind: field.kind(),
            });
        }

        if !field.has_scalar_column() {
            return Err(SelectError::MissingScalarColumn {
                selector,
                field: field.name().to_string(),
            }
            .into());
        }

        let Some(numeric) = selector.numeric_selector() else {
            return Err(SelectError::UnsupportedSelector {
                selector,
                field: field.name().to_string(),
                kind: field.kind(),
            }
            .into());
        };

        Ok(ValueSource::Selected {
            field: field.name().to_string(),
            kind: field.kind(),
            selector: numeric,
        })
    }

    /// Build every physical representation of one value for a document.
    ///
    /// Fails before yielding anything, so a rejected field contributes no
    /// representations.
    pub fn document_fields(
        &self,
        field: &FieldConfig,
        text: &str,
    ) -> Result<DocumentFields, InternalError> {
        if !self.is_field_used(field) {
            return Ok(DocumentFields::empty(field.name()));
        }

        if field.has_scalar_column() && field.multi_valued() {
            return Err(FieldBuildError::MultiValuedScalarColumn {
                field: field.name().to_string(),
            }
            .into());
        }

        let value = self.parse_value(field, text)?;

        Ok(DocumentFields::new(
            field.name(),
            value,
            field.has_scalar_column(),
            field.stored(),
        ))
    }

    /// Whether a field contributes anything to a document.
    #[must_use]
    pub fn is_field_used(&self, field: &FieldConfig) -> bool {
        if !field.indexed() && !field.stored() && !field.has_scalar_column() {
            log::trace!("ignoring unindexed/unstored field: {field}");

            return false;
        }

        true
    }

    /// Read one textual value as the field's kind.
    pub fn parse_value(&self, field: &FieldConfig, text: &str) -> Result<NumericValue, InternalError> {
        codec_for(field.kind())
            .parse(text, &self.dates)
            .map_err(|source| {
                InternalError::from(FieldBuildError::InvalidValue {
                    field: field.name().to_string(),
                    source,
                })
            })
    }
}

const fn to_bound(value: Option<NumericValue>, inclusive: bool) -> Bound<NumericValue> {
    match value {
        Some(value) if inclusive => Bound::Included(value),
        Some(value) => Bound::Excluded(value),
        None => Bound::Unbounded,
    }
}
