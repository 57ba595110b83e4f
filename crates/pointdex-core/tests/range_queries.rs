//! End-to-end range, exact and set queries over documents built through the
//! public adapter surface.

use pointdex_core::{
    adapter::PointFieldAdapter,
    config::SchemaConfig,
    document::MemoryDocument,
    error::ErrorClass,
    model::field::FieldConfig,
    query::Query,
    select::MultiValueSelector,
    translate::{FloatRangePlan, RangeRequest, plan_float_range, translate_integer_like},
    value::NumericValue,
};
use pointdex_primitives::NumberKind;

const SCHEMA: &str = r#"
    [[field]]
    name = "qty"
    kind = "int32"
    indexed = false
    scalar_column = true

    [[field]]
    name = "score"
    kind = "float64"
    indexed = false
    scalar_column = true
    stored = true

    [[field]]
    name = "ratio"
    kind = "float32"
    indexed = false
    scalar_column = true

    [[field]]
    name = "sizes"
    kind = "int64"
    scalar_column = true
    multi_valued = true

    [[field]]
    name = "ghost"
    kind = "int64"
    indexed = false
"#;

fn schema() -> SchemaConfig {
    SchemaConfig::from_toml_str(SCHEMA).expect("schema")
}

fn field<'a>(schema: &'a SchemaConfig, name: &str) -> &'a FieldConfig {
    schema.field(name).expect("declared field")
}

fn doc(adapter: &PointFieldAdapter, field: &FieldConfig, text: &str) -> MemoryDocument {
    adapter
        .document_fields(field, text)
        .expect("document fields")
        .collect()
}

fn matching<'a>(
    adapter: &PointFieldAdapter,
    field: &FieldConfig,
    query: &Query,
    values: &[&'a str],
) -> Vec<&'a str> {
    values
        .iter()
        .copied()
        .filter(|text| query.matches(&doc(adapter, field, text)))
        .collect()
}

#[test]
fn exclusive_max_lower_bound_saturates_to_empty() {
    let schema = schema();
    let qty = field(&schema, "qty");
    let max = i32::MAX.to_string();

    let int64 = FieldConfig::new("n", NumberKind::Int64)
        .with_indexed(false)
        .with_scalar_column(true);
    let max64 = i64::MAX.to_string();
    let saturated = translate_integer_like(
        &int64,
        RangeRequest::new(Some(&max64), None, false, true),
        PointFieldAdapter::new().date_math(),
    )
    .expect("no error at the boundary");
    assert_eq!(saturated, Query::MatchNone);

    let adapter = PointFieldAdapter::new();
    let query = adapter
        .range_query(qty, RangeRequest::new(Some(&max), None, false, true))
        .expect("range");
    assert!(!query.matches(&doc(&adapter, qty, &max)));
}

#[test]
fn negative_float_range_reverses_bits_and_matches_by_value() {
    let schema = schema();
    let score = field(&schema, "score");
    let adapter = PointFieldAdapter::new();

    let plan = plan_float_range(
        NumberKind::Float64,
        Some(NumericValue::Float64(-5.0)),
        Some(NumericValue::Float64(-1.0)),
        true,
        true,
    )
    .expect("plan");
    assert_eq!(
        plan,
        FloatRangePlan::BitRange {
            lower: Some(NumericValue::Float64(-1.0).to_bits()),
            upper: Some(NumericValue::Float64(-5.0).to_bits()),
            lower_inclusive: true,
            upper_inclusive: true,
        }
    );

    let query = adapter
        .range_query(score, RangeRequest::closed(Some("-5.0"), Some("-1.0")))
        .expect("range");
    assert!(matches!(query, Query::ColumnRange(_)));
    assert_eq!(
        matching(&adapter, score, &query, &["-3.0", "-0.5", "-6.0"]),
        vec!["-3.0"]
    );
}

#[test]
fn zero_crossing_float32_uses_a_comparison_filter() {
    let schema = schema();
    let ratio = field(&schema, "ratio");
    let adapter = PointFieldAdapter::new();

    let query = adapter
        .range_query(ratio, RangeRequest::closed(Some("-1.0"), Some("1.0")))
        .expect("range");

    assert!(matches!(query, Query::ValueRange(_)));
    assert_eq!(
        matching(&adapter, ratio, &query, &["-0.5", "0.0", "0.5", "-2.0", "2.0"]),
        vec!["-0.5", "0.0", "0.5"]
    );
}

#[test]
fn inclusivity_toggles_endpoints() {
    let schema = schema();
    let qty = field(&schema, "qty");
    let adapter = PointFieldAdapter::new();
    let values = ["2", "3", "4", "5", "6", "7", "8"];

    let right_open = adapter
        .range_query(qty, RangeRequest::new(Some("3"), Some("7"), true, false))
        .expect("range");
    let left_open = adapter
        .range_query(qty, RangeRequest::new(Some("3"), Some("7"), false, true))
        .expect("range");

    assert_eq!(
        matching(&adapter, qty, &right_open, &values),
        vec!["3", "4", "5", "6"]
    );
    assert_eq!(
        matching(&adapter, qty, &left_open, &values),
        vec!["4", "5", "6", "7"]
    );
}

#[test]
fn multi_valued_scalar_column_document_is_rejected_whole() {
    let schema = schema();
    let sizes = field(&schema, "sizes");
    let adapter = PointFieldAdapter::new();

    let err = adapter.document_fields(sizes, "12").unwrap_err();

    assert_eq!(err.class, ErrorClass::Unsupported);
    assert!(err.message.contains("'sizes'"));
}

#[test]
fn multi_valued_scalar_column_still_selects_single_values() {
    let schema = schema();
    let sizes = field(&schema, "sizes");
    let adapter = PointFieldAdapter::new();

    let mut doc = MemoryDocument::new();
    for v in [40i64, 12, 33] {
        doc.push_column("sizes", v);
    }

    let min = adapter
        .single_value_source(sizes, MultiValueSelector::Min)
        .expect("min");
    assert_eq!(min.value(&doc), Some(NumericValue::Int64(12)));

    let middle = adapter
        .single_value_source(sizes, MultiValueSelector::MiddleMax)
        .unwrap_err();
    assert_eq!(middle.class, ErrorClass::InvalidInput);
}

#[test]
fn unused_field_contributes_nothing() {
    let schema = schema();
    let ghost = field(&schema, "ghost");
    let adapter = PointFieldAdapter::new();

    assert!(!adapter.is_field_used(ghost));
    assert_eq!(adapter.document_fields(ghost, "5").expect("fields").len(), 0);
}

#[test]
fn exact_and_set_queries_on_column_only_floats() {
    let schema = schema();
    let score = field(&schema, "score");
    let adapter = PointFieldAdapter::new();

    let exact = adapter.exact_query(score, "-0.0").expect("exact");
    assert_eq!(
        matching(&adapter, score, &exact, &["-0.0", "0.0", "-1.0"]),
        vec!["-0.0"]
    );

    let set = adapter
        .set_query(score, ["1.5", "-2.25", "1.5"])
        .expect("set");
    assert_eq!(
        matching(&adapter, score, &set, &["1.5", "-2.25", "2.25"]),
        vec!["1.5", "-2.25"]
    );
}

#[test]
fn stored_copy_renders_the_parsed_value() {
    let schema = schema();
    let score = field(&schema, "score");
    let adapter = PointFieldAdapter::new();

    let doc = doc(&adapter, score, " 2.5 ");

    assert_eq!(doc.stored_values("score"), &["2.5".to_string()]);
}
