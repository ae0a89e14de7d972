//! Integration tests for fieldorder.

use std::io::Write;
use tempfile::NamedTempFile;

use fieldorder::dependency::resolve_equivalences;
use fieldorder::{
    partial_order, record, sample, AnalyzerConfig, DependencyAnalyzer, FieldOrderError, FieldPair,
    FieldPriority, KeepOrder, ParserConfig, PromptResolver, Record, RecordBatch, Value,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn pairs(list: &[(&str, &str)]) -> Vec<FieldPair> {
    list.iter().map(|(a, b)| FieldPair::new(*a, *b)).collect()
}

// =============================================================================
// Reference Dataset
// =============================================================================

#[test]
fn test_customer_purchases_repeated_100_times() {
    let batch = RecordBatch::new(sample::customer_purchases())
        .and_then(|b| b.repeat(100))
        .expect("valid batch");
    assert_eq!(batch.len(), 1200);

    let order = partial_order(batch.records()).expect("Analysis failed");

    assert_eq!(order.equivalences, pairs(&[("city", "city_population")]));
    assert_eq!(
        order.ordered,
        pairs(&[
            ("cust_id", "city_population"),
            ("cust_id", "name"),
            ("cust_id", "city"),
        ])
    );
}

#[test]
fn test_customer_purchases_cardinalities() {
    let batch = RecordBatch::new(sample::customer_purchases()).unwrap();
    let report = DependencyAnalyzer::new().analyze(&batch).unwrap();

    let card = |a: &str, b: &str| {
        report
            .cardinalities
            .iter()
            .find(|c| c.determiner == a && c.dependent == b)
            .map(|c| c.cardinality)
    };

    assert_eq!(card("cust_id", "name"), Some(1));
    assert_eq!(card("name", "cust_id"), Some(2));
    assert_eq!(card("city", "item"), Some(4));
    assert_eq!(card("item", "cust_id"), Some(4));
    assert_eq!(card("cust_id", "item"), Some(3));
    assert_eq!(card("city", "city_population"), Some(1));
}

#[test]
fn test_analysis_is_repeatable() {
    let records = sample::customer_purchases();
    let first = partial_order(&records).unwrap();
    let second = partial_order(&records).unwrap();

    assert_eq!(first, second);
}

// =============================================================================
// File Input Tests
// =============================================================================

#[test]
fn test_analyze_csv_file() {
    let content = "zipcode,city,state,beds\n\
                   02134,Boston,MA,3\n\
                   02135,Boston,MA,2\n\
                   60601,Chicago,IL,3\n\
                   60602,Chicago,IL,4\n\
                   02134,Boston,MA,5\n";
    let file = create_test_file(content);

    let (report, source) = DependencyAnalyzer::new()
        .analyze_file(file.path())
        .expect("Analysis failed");

    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 5);
    assert_eq!(source.field_count, 4);
    assert!(source.hash.starts_with("sha256:"));

    assert_eq!(report.equivalences, pairs(&[("city", "state")]));
    assert!(report.ordered.contains(&FieldPair::new("zipcode", "city")));
    assert!(report.ordered.contains(&FieldPair::new("zipcode", "state")));
    assert!(!report.ordered.iter().any(|p| p.first() == "beds"));
}

#[test]
fn test_analyze_tsv_with_exclusions() {
    let content = "zipcode\tcity\tprice\n\
                   02134\tBoston\t510000\n\
                   02135\tBoston\t480000\n\
                   60601\tChicago\t390000\n";
    let file = create_test_file(content);

    let analyzer = DependencyAnalyzer::with_config(AnalyzerConfig {
        excluded_fields: vec!["price".to_string()],
        ..AnalyzerConfig::default()
    });
    let (report, source) = analyzer.analyze_file(file.path()).unwrap();

    assert_eq!(source.format, "tsv");
    assert_eq!(report.fields, vec!["zipcode", "city"]);
    assert_eq!(report.ordered, pairs(&[("zipcode", "city")]));
}

#[test]
fn test_zip_codes_stay_text() {
    let file = create_test_file("zipcode,n\n02134,1\n2134,1\n");
    let analyzer = DependencyAnalyzer::with_config(AnalyzerConfig {
        parser: ParserConfig {
            delimiter: Some(b','),
            ..ParserConfig::default()
        },
        ..AnalyzerConfig::default()
    });
    let (report, _) = analyzer.analyze_file(file.path()).unwrap();

    // "02134" and 2134 are different values, so n sees two zip codes.
    let n_to_zip = report
        .cardinalities
        .iter()
        .find(|c| c.determiner == "n" && c.dependent == "zipcode")
        .map(|c| c.cardinality);
    assert_eq!(n_to_zip, Some(2));
}

#[test]
fn test_missing_file() {
    let err = DependencyAnalyzer::new()
        .analyze_file("/nonexistent/houses.csv")
        .unwrap_err();
    assert!(matches!(err, FieldOrderError::Io { .. }));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_empty_batch_is_an_error() {
    let records: Vec<Record> = Vec::new();

    assert!(matches!(
        partial_order(&records),
        Err(FieldOrderError::EmptyData(_))
    ));
    assert!(matches!(
        DependencyAnalyzer::new().analyze_records(&records),
        Err(FieldOrderError::EmptyData(_))
    ));
}

#[test]
fn test_mixed_schema_is_an_error() {
    let records = vec![
        record([("a", Value::from(1)), ("b", Value::from(2))]),
        record([("a", Value::from(1)), ("b", Value::from(2))]),
        record([("a", Value::from(1)), ("b", Value::from(2)), ("c", Value::from(3))]),
    ];

    match partial_order(&records) {
        Err(FieldOrderError::SchemaMismatch { row, found, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(found, vec!["a", "b", "c"]);
        }
        other => panic!("expected schema mismatch, got {other:?}"),
    }
}

#[test]
fn test_field_order_may_vary_between_records() {
    let records = vec![
        record([("a", Value::from(1)), ("b", Value::from(2))]),
        record([("b", Value::from(3)), ("a", Value::from(4))]),
    ];
    let order = partial_order(&records).unwrap();

    assert_eq!(order.equivalences, pairs(&[("a", "b")]));
}

// =============================================================================
// Resolution Tests
// =============================================================================

#[test]
fn test_prompt_resolution_on_reference_data() {
    let batch = RecordBatch::new(sample::customer_purchases()).unwrap();
    let mut report = DependencyAnalyzer::new().analyze(&batch).unwrap();

    let mut transcript = Vec::new();
    let mut prompt = PromptResolver::new(std::io::Cursor::new("1\n"), &mut transcript);
    report.resolve_with(&mut prompt).unwrap();

    assert_eq!(report.resolved, pairs(&[("city_population", "city")]));
    assert_eq!(report.strict_order()[0], FieldPair::new("city_population", "city"));
}

#[test]
fn test_invalid_prompt_choice_is_fatal() {
    let equivalences = pairs(&[("city", "city_population"), ("state", "state_code")]);
    let mut prompt = PromptResolver::new(std::io::Cursor::new("1\nx\n"), Vec::new());

    let err = resolve_equivalences(&equivalences, &mut prompt).unwrap_err();
    assert!(matches!(err, FieldOrderError::InvalidChoice { .. }));
}

#[test]
fn test_policy_resolvers() {
    let equivalences = pairs(&[("city", "city_population"), ("state", "state_code")]);

    let kept = resolve_equivalences(&equivalences, &mut KeepOrder).unwrap();
    assert_eq!(kept, equivalences);

    let mut prefer = FieldPriority::new(["city_population"]);
    let preferred = resolve_equivalences(&equivalences, &mut prefer).unwrap();
    assert_eq!(
        preferred,
        pairs(&[("city_population", "city"), ("state", "state_code")])
    );
}

// =============================================================================
// Batch Helper Tests
// =============================================================================

#[test]
fn test_value_counts_on_reference_data() {
    let batch = RecordBatch::new(sample::customer_purchases()).unwrap();
    let counts = batch.value_counts();

    assert_eq!(counts["cust_id"], 5);
    assert_eq!(counts["name"], 4);
    assert_eq!(counts["city"], 4);
    assert_eq!(counts["city_population"], 4);
    assert_eq!(counts["item"], 4);
}
