//! Module: select
//! Responsibility: single-value selection over multi-valued scalar columns.
//! Does not own: the legality decision for a field (see `adapter`).
//! Boundary: comparison filters and callers read values through `ValueSource`.

use crate::{codec::codec_for, query::DocReader, value::NumericValue};
use pointdex_primitives::NumberKind;
use std::{
    fmt::{self, Display},
    str::FromStr,
};
use thiserror::Error as ThisError;

///
/// SelectError
///

#[derive(Debug, ThisError)]
pub enum SelectError {
    #[error("unknown multi-value selector '{text}'")]
    UnknownSelector { text: String },

    #[error(
        "a scalar column is required to select '{selector}' value from multi-valued field ({field}) at query time"
    )]
    MissingScalarColumn {
        selector: MultiValueSelector,
        field: String,
    },

    #[error(
        "{selector} is not a supported option for picking a single value from the multi-valued field: {field} (type: {kind})"
    )]
    UnsupportedSelector {
        selector: MultiValueSelector,
        field: String,
        kind: NumberKind,
    },
}

///
/// MultiValueSelector
///
/// Caller-requested reduction used to pick one value per document.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MultiValueSelector {
    Min,
    Max,
    MiddleMin,
    MiddleMax,
}

impl MultiValueSelector {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
            Self::MiddleMin => "middle_min",
            Self::MiddleMax => "middle_max",
        }
    }

    /// Reduction available over a sorted numeric column, if any.
    ///
    /// Numeric columns only expose their extremes; the middle selectors
    /// apply to ordinal-sorted text columns.
    #[must_use]
    pub const fn numeric_selector(self) -> Option<NumericSelector> {
        match self {
            Self::Min => Some(NumericSelector::Min),
            Self::Max => Some(NumericSelector::Max),
            Self::MiddleMin | Self::MiddleMax => None,
        }
    }
}

impl Display for MultiValueSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MultiValueSelector {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Min, Self::Max, Self::MiddleMin, Self::MiddleMax]
            .into_iter()
            .find(|selector| selector.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| SelectError::UnknownSelector {
                text: s.to_string(),
            })
    }
}

///
/// NumericSelector
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NumericSelector {
    Min,
    Max,
}

///
/// ValueSource
///
/// Per-document accessor over a field's scalar column.
///

#[derive(Clone, Debug, PartialEq)]
pub enum ValueSource {
    /// Single-valued field; reads the one column value.
    Column { field: String, kind: NumberKind },

    /// Multi-valued field reduced with a selector.
    Selected {
        field: String,
        kind: NumberKind,
        selector: NumericSelector,
    },
}

impl ValueSource {
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Column { field, .. } | Self::Selected { field, .. } => field,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> NumberKind {
        match self {
            Self::Column { kind, .. } | Self::Selected { kind, .. } => *kind,
        }
    }

    /// Read this source's value for one document.
    #[must_use]
    pub fn value(&self, doc: &dyn DocReader) -> Option<NumericValue> {
        let codec = codec_for(self.kind());
        let mut values = doc
            .column_values(self.field())
            .iter()
            .map(|bits| codec.decode(*bits));

        match self {
            Self::Column { .. } => values.next(),
            Self::Selected { selector, .. } => {
                let pick = |a: NumericValue, b: NumericValue| {
                    let b_wins = match (selector, b.cmp_same_kind(&a)) {
                        (NumericSelector::Min, Some(ord)) => ord.is_lt(),
                        (NumericSelector::Max, Some(ord)) => ord.is_gt(),
                        (_, None) => false,
                    };
                    if b_wins { b } else { a }
                };

                values.reduce(pick)
            }
        }
    }
}

impl Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column { field, .. } => write!(f, "column({field})"),
            Self::Selected {
                field, selector, ..
            } => {
                let label = match selector {
                    NumericSelector::Min => "min",
                    NumericSelector::Max => "max",
                };
                write!(f, "{label}({field})")
            }
        }
    }
}

///
/// TESTS
///
