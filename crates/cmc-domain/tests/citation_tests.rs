//! Citation record integration tests

use cmc_domain::{
    is_valid, validate_collection, Citation, StoredDocument, ValidationSeverity,
};
use rstest::rstest;

#[rstest]
#[case::number(r#"{"id": 12, "text": "t", "source": "s"}"#, 12)]
#[case::digit_string(r#"{"id": "12", "text": "t", "source": "s"}"#, 12)]
#[case::leading_zero(r#"{"id": "012", "text": "t", "source": "s"}"#, 12)]
fn test_id_shapes(#[case] json: &str, #[case] expected: u64) {
    let citation: Citation = serde_json::from_str(json).unwrap();
    assert_eq!(citation.id, expected);
}

#[rstest]
#[case::negative(r#"{"id": -1, "text": "t", "source": "s"}"#)]
#[case::word(r#"{"id": "one", "text": "t", "source": "s"}"#)]
#[case::float(r#"{"id": 1.5, "text": "t", "source": "s"}"#)]
#[case::missing(r#"{"text": "t", "source": "s"}"#)]
fn test_invalid_ids(#[case] json: &str) {
    assert!(serde_json::from_str::<Citation>(json).is_err());
}

#[test]
fn test_serde_round_trip_keeps_camel_case() {
    let citation = Citation::new(2, "Impurities", "ICH Q3A")
        .with_source_file("file-2")
        .with_tags(["impurities"]);
    let json = serde_json::to_value(&citation).unwrap();
    assert_eq!(json["sourceFileId"], "file-2");

    let parsed: Citation = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, citation);
}

#[test]
fn test_document_collection_validation() {
    let doc = StoredDocument::new("doc-1", "Specification")
        .with_citation(Citation::new(1, "ICH Q6A guideline", "ICH Q6A").with_page(15))
        .with_citation(Citation::new(1, "Duplicate", "ICH Q6A"));

    let issues = validate_collection(&doc.citations);
    let errors: Vec<_> = issues
        .iter()
        .filter(|i| i.severity == ValidationSeverity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "id");
    assert!(doc.citations.iter().all(is_valid));
}
