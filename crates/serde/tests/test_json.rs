use medknow_fhir::r4b::*;
use medknow_serde::{
    SerdeError, from_json_reader, from_json_slice, from_json_str, from_json_value,
    to_json_string, to_json_string_pretty, to_json_value, to_json_vec, to_json_writer,
};
use serde_json::{Value, json};

const EXAMPLE: &str = include_str!("../../fhir/tests/data/medicationknowledge-example.json");

#[test]
fn test_entry_points_agree() {
    let from_str: MedicationKnowledge = from_json_str(EXAMPLE).unwrap();
    let from_slice: MedicationKnowledge = from_json_slice(EXAMPLE.as_bytes()).unwrap();
    let from_reader: MedicationKnowledge = from_json_reader(EXAMPLE.as_bytes()).unwrap();
    let from_value: MedicationKnowledge =
        from_json_value(serde_json::from_str(EXAMPLE).unwrap()).unwrap();
    assert_eq!(from_str, from_slice);
    assert_eq!(from_str, from_reader);
    assert_eq!(from_str, from_value);
}

#[test]
fn test_writers_produce_the_same_document() {
    let med: MedicationKnowledge = from_json_str(EXAMPLE).unwrap();
    let original: Value = serde_json::from_str(EXAMPLE).unwrap();

    assert_eq!(to_json_value(&med).unwrap(), original);

    let compact = to_json_string(&med).unwrap();
    assert_eq!(compact.as_bytes(), to_json_vec(&med).unwrap().as_slice());
    assert!(!compact.contains('\n'));

    let pretty = to_json_string_pretty(&med).unwrap();
    assert!(pretty.starts_with("{\n  \"resourceType\": \"MedicationKnowledge\""));

    let mut written = Vec::new();
    to_json_writer(&med, &mut written, false).unwrap();
    assert_eq!(std::string::String::from_utf8(written).unwrap(), compact);
}

#[test]
fn test_decimal_text_survives() {
    let med: MedicationKnowledge = from_json_str(EXAMPLE).unwrap();
    let text = to_json_string(&med).unwrap();
    assert!(text.contains(r#""value":4.50"#));
    assert!(text.contains(r#""value":45.2"#));
}

#[test]
fn test_resource_enum_dispatches() {
    let resource: Resource = from_json_str(EXAMPLE).unwrap();
    assert_eq!(resource.resource_type(), "MedicationKnowledge");
    assert_eq!(resource.id(), Some("example"));
}

#[test]
fn test_decode_errors_are_json_errors() {
    let cases = [
        json!({"resourceType": "Medication"}),
        json!({"resourceType": "MedicationKnowledge", "colour": "red"}),
        json!({"resourceType": "MedicationKnowledge", "status": 1}),
        json!({
            "resourceType": "MedicationKnowledge",
            "drugCharacteristic": [{"valueString": "white", "valueCodeableConcept": {"text": "white"}}]
        }),
        json!({
            "resourceType": "MedicationKnowledge",
            "synonym": ["a", null],
            "_synonym": [null, null]
        }),
    ];
    for case in cases {
        let err = from_json_value::<MedicationKnowledge>(case.clone()).unwrap_err();
        assert!(matches!(err, SerdeError::Json(_)), "{case} gave {err}");
    }
}

#[test]
fn test_empty_resource() {
    let med: MedicationKnowledge =
        from_json_str(r#"{"resourceType": "MedicationKnowledge"}"#).unwrap();
    assert_eq!(med, MedicationKnowledge::default());
    assert_eq!(
        to_json_string(&med).unwrap(),
        r#"{"resourceType":"MedicationKnowledge"}"#
    );
}
