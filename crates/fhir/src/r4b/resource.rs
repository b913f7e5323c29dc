use super::MedicationKnowledge;
use crate::MemSize;
use medknow_fhirpath_support::{Reflect, StaticTypeInfo, SystemValue, TypeInfo, TypeSpecifier};
use medknow_serde_support::{FhirJson, FieldError, JsonObject, complex};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Any resource, dispatched on `resourceType`.
///
/// This is what `contained` holds. Variants are boxed so the enum stays
/// pointer-sized no matter how large a resource struct grows.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    MedicationKnowledge(Box<MedicationKnowledge>),
}

impl Resource {
    pub fn resource_type(&self) -> &'static str {
        match self {
            Resource::MedicationKnowledge(_) => "MedicationKnowledge",
        }
    }

    /// Logical id, if the resource has one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Resource::MedicationKnowledge(resource) => {
                resource.id.as_ref().and_then(|id| id.value.as_deref())
            }
        }
    }
}

impl From<MedicationKnowledge> for Resource {
    fn from(resource: MedicationKnowledge) -> Self {
        Resource::MedicationKnowledge(Box::new(resource))
    }
}

impl Serialize for Resource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Resource::MedicationKnowledge(resource) => resource.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let resource_type = value
            .get("resourceType")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| D::Error::custom("resource is missing `resourceType`"))?;
        match resource_type.as_str() {
            "MedicationKnowledge" => MedicationKnowledge::deserialize(value)
                .map(Resource::from)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "unsupported resource type `{}`",
                other
            ))),
        }
    }
}

impl FhirJson for Resource {
    fn write_one<M>(&self, name: &str, map: &mut M) -> Result<(), M::Error>
    where
        M: SerializeMap,
    {
        complex::write_one(self, name, map)
    }

    fn write_many<M>(items: &[Self], name: &str, map: &mut M) -> Result<(), M::Error>
    where
        M: SerializeMap,
    {
        complex::write_many(items, name, map)
    }

    fn read_one(name: &str, object: &mut JsonObject) -> Result<Option<Self>, FieldError> {
        complex::read_one(name, object)
    }

    fn read_many(name: &str, object: &mut JsonObject) -> Result<Vec<Self>, FieldError> {
        complex::read_many(name, object)
    }
}

impl StaticTypeInfo for Resource {
    fn type_specifier() -> TypeSpecifier {
        TypeSpecifier::fhir("Resource")
    }
}

impl Reflect for Resource {
    fn type_info(&self) -> TypeInfo {
        match self {
            Resource::MedicationKnowledge(resource) => resource.type_info(),
        }
    }

    fn children(&self, name: Option<&str>) -> Vec<&dyn Reflect> {
        match self {
            Resource::MedicationKnowledge(resource) => resource.children(name),
        }
    }

    fn system_value(&self) -> Option<SystemValue> {
        None
    }
}

impl MemSize for Resource {
    fn heap_size(&self) -> usize {
        match self {
            Resource::MedicationKnowledge(resource) => resource.heap_size(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::MedicationKnowledge(resource) => fmt::Display::fmt(resource, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatches_on_resource_type() {
        let resource: Resource = serde_json::from_value(json!({
            "resourceType": "MedicationKnowledge",
            "id": "med-1",
        }))
        .unwrap();
        assert_eq!(resource.resource_type(), "MedicationKnowledge");
        assert_eq!(resource.id(), Some("med-1"));
    }

    #[test]
    fn test_unknown_resource_type_is_an_error() {
        let err = serde_json::from_value::<Resource>(json!({"resourceType": "Patient"}))
            .unwrap_err();
        assert!(err.to_string().contains("Patient"));

        assert!(serde_json::from_value::<Resource>(json!({"id": "x"})).is_err());
    }

    #[test]
    fn test_serializes_as_inner_resource() {
        let resource = Resource::from(MedicationKnowledge::default());
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"resourceType": "MedicationKnowledge"})
        );
    }
}
