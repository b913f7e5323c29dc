use medknow_fhir::MemSize;
use medknow_fhir::r4b::*;
use std::mem::size_of;

const EXAMPLE: &str = include_str!("data/medicationknowledge-example.json");

#[test]
fn test_empty_resource_is_inline_only() {
    let resource = MedicationKnowledge::default();
    assert_eq!(resource.heap_size(), 0);
    assert_eq!(resource.mem_size(), size_of::<MedicationKnowledge>());
}

#[test]
fn test_mem_size_grows_with_content() {
    let mut resource = MedicationKnowledge::default();
    let empty = resource.mem_size();

    resource.status = Some(Code::new("active"));
    let with_status = resource.mem_size();
    assert!(with_status >= empty + "active".len());

    resource.synonym = Some(vec![String::new("Tylenol"), String::new("Panadol")]);
    assert!(resource.mem_size() >= with_status + 2 * size_of::<String>() + 14);
}

#[test]
fn test_boxed_children_are_counted() {
    let identifier = Identifier {
        assigner: Some(Box::new(Reference::to("Organization/1"))),
        ..Default::default()
    };
    assert!(identifier.heap_size() >= size_of::<Reference>() + "Organization/1".len());
}

#[test]
fn test_contained_resources_are_counted() {
    let resource: MedicationKnowledge = serde_json::from_str(EXAMPLE).unwrap();
    let contained = resource.contained.as_ref().unwrap();
    let contained_size: usize = contained.iter().map(MemSize::heap_size).sum();
    assert!(contained_size >= size_of::<MedicationKnowledge>());
    assert!(resource.heap_size() > contained_size);
}
