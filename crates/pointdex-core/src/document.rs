//! Module: document
//! Responsibility: physical field representations produced per document.
//! Does not own: deciding which representations a field gets (see `adapter`).
//! Boundary: indexers consume `DocumentFields` once per document.

use crate::{codec::ValueParseError, query::DocReader, value::NumericValue};
use std::{collections::HashMap, iter::FusedIterator};
use thiserror::Error as ThisError;

///
/// FieldBuildError
///

#[derive(Debug, ThisError)]
pub enum FieldBuildError {
    #[error("multi-valued point fields with a scalar column are not supported. Field: '{field}'")]
    MultiValuedScalarColumn { field: String },

    #[error("invalid value for field '{field}': {source}")]
    InvalidValue {
        field: String,
        #[source]
        source: ValueParseError,
    },
}

///
/// IndexableField
///
/// One physical representation of a field value.
///

#[derive(Clone, Debug, PartialEq)]
pub enum IndexableField {
    /// Indexed point encoding.
    Point { name: String, value: NumericValue },

    /// Scalar-column bit encoding.
    Column { name: String, bits: i64 },

    /// Human-readable stored copy.
    Stored { name: String, text: String },
}

impl IndexableField {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Point { name, .. } | Self::Column { name, .. } | Self::Stored { name, .. } => {
                name
            }
        }
    }
}

///
/// Stage
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stage {
    Point,
    Column,
    Stored,
    Done,
}

///
/// DocumentFields
///
/// Lazy sequence of one value's representations, in the order
/// point, column, stored. Consumed once; not restartable.
///

#[derive(Debug)]
pub struct DocumentFields {
    name: String,
    value: Option<NumericValue>,
    column: bool,
    stored: bool,
    stage: Stage,
}

impl DocumentFields {
    pub(crate) fn new(name: &str, value: NumericValue, column: bool, stored: bool) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value),
            column,
            stored,
            stage: Stage::Point,
        }
    }

    pub(crate) fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            column: false,
            stored: false,
            stage: Stage::Done,
        }
    }

    fn remaining(&self) -> usize {
        if self.value.is_none() {
            return 0;
        }

        match self.stage {
            Stage::Point => 1 + usize::from(self.column) + usize::from(self.stored),
            Stage::Column => usize::from(self.column) + usize::from(self.stored),
            Stage::Stored => usize::from(self.stored),
            Stage::Done => 0,
        }
    }
}

impl Iterator for DocumentFields {
    type Item = IndexableField;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.value?;

        loop {
            match self.stage {
                Stage::Point => {
                    self.stage = Stage::Column;
                    return Some(IndexableField::Point {
                        name: self.name.clone(),
                        value,
                    });
                }
                Stage::Column => {
                    self.stage = Stage::Stored;
                    if self.column {
                        return Some(IndexableField::Column {
                            name: self.name.clone(),
                            bits: value.to_bits(),
                        });
                    }
                }
                Stage::Stored => {
                    self.stage = Stage::Done;
                    if self.stored {
                        return Some(IndexableField::Stored {
                            name: self.name.clone(),
                            text: value.to_string(),
                        });
                    }
                }
                Stage::Done => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DocumentFields {}

impl FusedIterator for DocumentFields {}

///
/// MemoryDocument
///
/// In-memory document assembled from indexable fields; used for reference
/// query evaluation.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    points: HashMap<String, Vec<NumericValue>>,
    columns: HashMap<String, Vec<i64>>,
    stored: HashMap<String, Vec<String>>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one representation to this document.
    pub fn add(&mut self, field: IndexableField) {
        match field {
            IndexableField::Point { name, value } => {
                self.points.entry(name).or_default().push(value);
            }
            IndexableField::Column { name, bits } => {
                self.columns.entry(name).or_default().push(bits);
            }
            IndexableField::Stored { name, text } => {
                self.stored.entry(name).or_default().push(text);
            }
        }
    }

    /// Append a raw scalar-column value, including additional values for
    /// multi-valued columns populated outside `document_fields`.
    pub fn push_column(&mut self, field: &str, bits: i64) {
        self.columns.entry(field.to_string()).or_default().push(bits);
    }

    #[must_use]
    pub fn stored_values(&self, field: &str) -> &[String] {
        self.stored.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.columns.is_empty() && self.stored.is_empty()
    }
}

impl Extend<IndexableField> for MemoryDocument {
    fn extend<T: IntoIterator<Item = IndexableField>>(&mut self, iter: T) {
        for field in iter {
            self.add(field);
        }
    }
}

impl FromIterator<IndexableField> for MemoryDocument {
    fn from_iter<T: IntoIterator<Item = IndexableField>>(iter: T) -> Self {
        let mut doc = Self::new();
        doc.extend(iter);
        doc
    }
}

impl DocReader for MemoryDocument {
    fn point_values(&self, field: &str) -> &[NumericValue] {
        self.points.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    fn column_values(&self, field: &str) -> &[i64] {
        self.columns.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_point_column_stored_in_order() {
        let fields: Vec<_> =
            DocumentFields::new("price", NumericValue::Float32(-1.5), true, true).collect();

        assert_eq!(
            fields,
            vec![
                IndexableField::Point {
                    name: "price".to_string(),
                    value: NumericValue::Float32(-1.5),
                },
                IndexableField::Column {
                    name: "price".to_string(),
                    bits: NumericValue::Float32(-1.5).to_bits(),
                },
                IndexableField::Stored {
                    name: "price".to_string(),
                    text: "-1.5".to_string(),
                },
            ]
        );
    }

    #[test]
    fn skips_disabled_representations() {
        let fields: Vec<_> =
            DocumentFields::new("qty", NumericValue::Int32(3), false, true).collect();

        assert_eq!(fields.len(), 2);
        assert!(matches!(fields[0], IndexableField::Point { .. }));
        assert!(matches!(fields[1], IndexableField::Stored { .. }));
    }

    #[test]
    fn size_hint_tracks_consumption_and_fuses() {
        let mut fields = DocumentFields::new("qty", NumericValue::Int64(3), true, false);
        assert_eq!(fields.len(), 2);
        fields.next();
        assert_eq!(fields.len(), 1);
        fields.next();
        assert_eq!(fields.len(), 0);
        assert_eq!(fields.next(), None);
        assert_eq!(fields.next(), None);
    }

    #[test]
    fn empty_sequence_yields_nothing() {
        let mut fields = DocumentFields::empty("qty");
        assert_eq!(fields.len(), 0);
        assert_eq!(fields.next(), None);
    }

    #[test]
    fn memory_document_collects_representations() {
        let doc: MemoryDocument =
            DocumentFields::new("n", NumericValue::Int64(9), true, true).collect();

        assert_eq!(doc.point_values("n"), &[NumericValue::Int64(9)]);
        assert_eq!(doc.column_values("n"), &[9]);
        assert_eq!(doc.stored_values("n"), &["9".to_string()]);
        assert!(doc.point_values("other").is_empty());
    }
}
