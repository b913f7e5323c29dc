//! `contained` holds whole resources, so `Resource` must stay small and
//! nested resources must decode without exhausting a small thread stack.
use medknow_fhir::r4b::*;

const NESTED: &str = r##"{
  "resourceType": "MedicationKnowledge",
  "id": "outer",
  "contained": [
    {
      "resourceType": "MedicationKnowledge",
      "id": "inner",
      "contained": [
        {
          "resourceType": "MedicationKnowledge",
          "id": "innermost",
          "status": "inactive"
        }
      ],
      "associatedMedication": [{"reference": "#innermost"}]
    }
  ],
  "text": {
    "status": "generated",
    "div": "<div xmlns=\"http://www.w3.org/1999/xhtml\">Nested contained resources</div>"
  },
  "status": "active",
  "associatedMedication": [{"reference": "#inner"}]
}"##;

#[test]
fn test_resource_enum_is_pointer_sized() {
    assert!(
        std::mem::size_of::<Resource>() <= 16,
        "Resource is {} bytes; variants should be boxed",
        std::mem::size_of::<Resource>()
    );
}

#[test]
fn test_deserialize_nested_contained_on_small_stack() {
    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(|| {
            let resource: MedicationKnowledge = serde_json::from_str(NESTED).unwrap();
            let inner = &resource.contained.as_ref().unwrap()[0];
            assert_eq!(inner.id(), Some("inner"));
            let Resource::MedicationKnowledge(inner) = inner;
            let innermost = &inner.contained.as_ref().unwrap()[0];
            assert_eq!(innermost.id(), Some("innermost"));
            serde_json::to_string(&resource).unwrap()
        })
        .unwrap();
    let written = handle.join().expect("thread should not overflow");
    assert!(written.contains("innermost"));
}
