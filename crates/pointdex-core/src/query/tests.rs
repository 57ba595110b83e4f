use super::*;
use crate::{document::MemoryDocument, select::NumericSelector};

fn column_doc(field: &str, values: &[NumericValue]) -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    for value in values {
        doc.push_column(field, value.to_bits());
    }
    doc
}

#[test]
fn match_none_never_matches() {
    let doc = column_doc("n", &[NumericValue::Int64(1)]);

    assert!(!Query::MatchNone.matches(&doc));
    assert!(Query::MatchNone.is_match_none());
    assert_eq!(Query::MatchNone.to_string(), "MatchNone");
}

#[test]
fn inverted_column_range_matches_nothing() {
    let query = Query::ColumnRange(ColumnRangeQuery {
        field: "n".to_string(),
        lower: 5,
        upper: 4,
    });

    for v in [3, 4, 5, 6] {
        assert!(!query.matches(&column_doc("n", &[NumericValue::Int64(v)])));
    }
}

#[test]
fn column_queries_ignore_other_fields() {
    let query = Query::ColumnRange(ColumnRangeQuery {
        field: "n".to_string(),
        lower: i64::MIN,
        upper: i64::MAX,
    });

    assert!(query.matches(&column_doc("n", &[NumericValue::Int64(0)])));
    assert!(!query.matches(&column_doc("m", &[NumericValue::Int64(0)])));
}

#[test]
fn column_set_uses_exact_bits() {
    let query = Query::ColumnSet(ColumnSetQuery {
        field: "x".to_string(),
        bits: vec![
            NumericValue::Float64(-0.0).to_bits(),
            NumericValue::Float64(2.0).to_bits(),
        ],
    });

    assert!(query.matches(&column_doc("x", &[NumericValue::Float64(-0.0)])));
    assert!(!query.matches(&column_doc("x", &[NumericValue::Float64(0.0)])));
}

#[test]
fn value_range_treats_signed_zeros_as_equal() {
    let query = Query::ValueRange(ValueRangeFilter {
        source: ValueSource::Column {
            field: "x".to_string(),
            kind: NumberKind::Float32,
        },
        min: Some(NumericValue::Float32(0.0)),
        max: None,
        min_inclusive: true,
        max_inclusive: true,
    });

    assert!(query.matches(&column_doc("x", &[NumericValue::Float32(-0.0)])));
    assert!(!query.matches(&column_doc("x", &[NumericValue::Float32(-0.1)])));
    assert!(!query.matches(&MemoryDocument::new()));
}

#[test]
fn value_range_over_selected_maximum() {
    let query = Query::ValueRange(ValueRangeFilter {
        source: ValueSource::Selected {
            field: "x".to_string(),
            kind: NumberKind::Int32,
            selector: NumericSelector::Max,
        },
        min: Some(NumericValue::Int32(10)),
        max: None,
        min_inclusive: false,
        max_inclusive: true,
    });

    let low = column_doc("x", &[NumericValue::Int32(3), NumericValue::Int32(10)]);
    let high = column_doc("x", &[NumericValue::Int32(3), NumericValue::Int32(11)]);

    assert!(!query.matches(&low));
    assert!(query.matches(&high));
    assert_eq!(query.to_string(), "frange(max(x)):{10 TO *]");
}

#[test]
fn point_range_respects_kind_when_unbounded() {
    let query = Query::PointRange(PointRangeQuery {
        field: "n".to_string(),
        kind: NumberKind::Int64,
        lower: Bound::Unbounded,
        upper: Bound::Unbounded,
    });

    let mut matching = MemoryDocument::new();
    matching.add(crate::document::IndexableField::Point {
        name: "n".to_string(),
        value: NumericValue::Int64(-4),
    });

    assert!(query.matches(&matching));
    assert!(!query.matches(&MemoryDocument::new()));
}

#[test]
fn display_renders_each_variant() {
    let column = Query::ColumnRange(ColumnRangeQuery {
        field: "n".to_string(),
        lower: -3,
        upper: 9,
    });
    let fallback = Query::ValueRange(ValueRangeFilter {
        source: ValueSource::Column {
            field: "x".to_string(),
            kind: NumberKind::Float64,
        },
        min: Some(NumericValue::Float64(-1.0)),
        max: Some(NumericValue::Float64(1.0)),
        min_inclusive: true,
        max_inclusive: false,
    });
    let set = Query::PointSet(PointSetQuery {
        field: "n".to_string(),
        values: vec![NumericValue::Int32(1), NumericValue::Int32(2)],
    });
    let exact = Query::PointExact(PointExactQuery {
        field: "d".to_string(),
        value: NumericValue::Date(0),
    });

    assert_eq!(column.to_string(), "n:[-3 TO 9]");
    assert_eq!(fallback.to_string(), "frange(column(x)):[-1.0 TO 1.0}");
    assert_eq!(set.to_string(), "n:(1 2)");
    assert_eq!(exact.to_string(), "d:1970-01-01T00:00:00.000Z");
}
