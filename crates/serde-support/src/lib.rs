//! Field-level codec helpers used by the `FhirSerde` derive.
//!
//! Generated `Serialize` impls stream each struct field into a
//! [`serde::ser::SerializeMap`] through [`FhirJson::write_one`] /
//! [`FhirJson::write_many`]. Generated `Deserialize` impls first buffer the
//! incoming object into a [`JsonObject`] and then pull every field back out
//! with [`FhirJson::read_one`] / [`FhirJson::read_many`]. Whatever remains in
//! the object afterwards is an unknown element.
//!
//! Buffering lets choice elements (`value[x]`) probe each of their typed
//! keys. Primitives arrive in one of two shapes:
//!
//! * **JSON**: `"status": "active", "_status": {"id": "s1"}`
//! * **XML** (as produced by `medknow-serde`): `"status": {"id": "s1", "value": "active"}`
//!
//! The XML shape is only accepted inside [`with_xml_primitives`].

pub mod complex;
pub mod primitive;

use serde::ser::SerializeMap;
use serde_json::Value;
use std::fmt;

pub use primitive::{IdAndExtensionHelper, PrimitiveElement, PrimitiveValue, with_xml_primitives};

/// Buffered FHIR JSON object a generated decoder reads its fields from.
pub type JsonObject = serde_json::Map<String, Value>;

/// Codec for a value stored under a named key of a FHIR JSON object.
///
/// Primitives write a `name`/`_name` pair, complex types a single nested
/// object, and choice types prefix the name onto the key of their active
/// variant (`name` + `CodeableConcept`).
pub trait FhirJson: Sized {
    /// Writes a single occurrence under `name`.
    fn write_one<M>(&self, name: &str, map: &mut M) -> Result<(), M::Error>
    where
        M: SerializeMap;

    /// Writes a repeating element under `name`. An empty slice writes nothing.
    fn write_many<M>(items: &[Self], name: &str, map: &mut M) -> Result<(), M::Error>
    where
        M: SerializeMap;

    /// Removes and decodes a single occurrence; `Ok(None)` when absent.
    fn read_one(name: &str, object: &mut JsonObject) -> Result<Option<Self>, FieldError>;

    /// Removes and decodes a repeating element; absent yields an empty vector.
    fn read_many(name: &str, object: &mut JsonObject) -> Result<Vec<Self>, FieldError>;

    /// Whether [`FhirJson::write_one`] would write nothing. Only a primitive
    /// without value, id or extension is empty.
    fn is_empty_element(&self) -> bool {
        false
    }
}

/// Error raised while pulling a field out of a buffered object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl fmt::Display) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, "required element is missing")
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid `{}`: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Turns an absent `1..1` element into an error.
pub fn required<T>(read: Result<Option<T>, FieldError>, name: &str) -> Result<T, FieldError> {
    read?.ok_or_else(|| FieldError::missing(name))
}

/// Turns an empty `1..*` element into an error.
pub fn at_least_one<T>(read: Result<Vec<T>, FieldError>, name: &str) -> Result<Vec<T>, FieldError> {
    let items = read?;
    if items.is_empty() {
        return Err(FieldError::new(name, "at least one repetition is required"));
    }
    Ok(items)
}

/// Maps an empty `0..*` element to `None`.
pub fn non_empty<T>(read: Result<Vec<T>, FieldError>) -> Result<Option<Vec<T>>, FieldError> {
    let items = read?;
    Ok(if items.is_empty() { None } else { Some(items) })
}

/// Checks and removes the `resourceType` discriminator of a resource object.
pub fn expect_resource_type(object: &mut JsonObject, expected: &str) -> Result<(), FieldError> {
    match object.remove("resourceType") {
        Some(Value::String(found)) if found == expected => Ok(()),
        Some(other) => Err(FieldError::new(
            "resourceType",
            format!("expected `{}`, found {}", expected, other),
        )),
        None => Err(FieldError::missing("resourceType")),
    }
}

/// Rejects any key a generated decoder did not consume.
pub fn deny_unknown_fields(object: &JsonObject, type_name: &str) -> Result<(), FieldError> {
    match object.keys().next() {
        Some(key) => Err(FieldError::new(
            key,
            format!("unknown element in {}", type_name),
        )),
        None => Ok(()),
    }
}

/// Rejects `null` for a whole element.
///
/// FHIR JSON only allows `null` as a placeholder inside the arrays of a
/// repeating split primitive.
pub fn not_null(name: &str, value: Value) -> Result<Value, FieldError> {
    if value.is_null() {
        return Err(FieldError::new(name, "null is not a valid element value"));
    }
    Ok(value)
}

/// Normalizes a value that may hold one item or an array of items.
///
/// JSON always uses arrays for repeating elements, but an element that
/// occurs once in XML reaches the decoder as a bare object or scalar.
pub fn single_or_vec(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

// Element ids and extension urls are plain strings rather than primitive
// elements: they never carry a `_name` sidecar and render as XML attributes.
impl FhirJson for String {
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
        match object.remove(name) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text)),
            Some(other) => Err(FieldError::new(
                name,
                format!("expected a string, found {}", other),
            )),
        }
    }

    fn read_many(name: &str, object: &mut JsonObject) -> Result<Vec<Self>, FieldError> {
        complex::read_many(name, object)
    }
}
