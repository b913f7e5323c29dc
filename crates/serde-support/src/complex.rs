//! Codec helpers for complex types (datatypes, backbone elements, resources).
//!
//! Complex values are ordinary nested objects in both JSON shapes, so these
//! helpers only handle the single-vs-repeated ambiguity and error context.

use crate::{FieldError, JsonObject, not_null, single_or_vec};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde_json::Value;

pub fn write_one<T, M>(value: &T, name: &str, map: &mut M) -> Result<(), M::Error>
where
    T: Serialize + ?Sized,
    M: SerializeMap,
{
    map.serialize_entry(name, value)
}

pub fn write_many<T, M>(items: &[T], name: &str, map: &mut M) -> Result<(), M::Error>
where
    T: Serialize,
    M: SerializeMap,
{
    if items.is_empty() {
        return Ok(());
    }
    map.serialize_entry(name, items)
}

pub fn read_one<T>(name: &str, object: &mut JsonObject) -> Result<Option<T>, FieldError>
where
    T: DeserializeOwned,
{
    match object.remove(name).map(|value| not_null(name, value)).transpose()? {
        None => Ok(None),
        Some(Value::Array(_)) => Err(FieldError::new(
            name,
            "expected a single element, found an array",
        )),
        Some(value) => decode(name, value).map(Some),
    }
}

pub fn read_many<T>(name: &str, object: &mut JsonObject) -> Result<Vec<T>, FieldError>
where
    T: DeserializeOwned,
{
    let Some(value) = object.remove(name) else {
        return Ok(Vec::new());
    };
    single_or_vec(not_null(name, value)?)
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if item.is_null() {
                return Err(FieldError::new(
                    name,
                    format!("entry {} is null", index),
                ));
            }
            decode(name, item)
        })
        .collect()
}

fn decode<T>(name: &str, value: Value) -> Result<T, FieldError>
where
    T: DeserializeOwned,
{
    T::deserialize(value).map_err(|err| FieldError::new(name, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Pair {
        a: u8,
    }

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_read_one_rejects_array() {
        let mut obj = object(json!({"pair": [{"a": 1}]}));
        let err = read_one::<Pair>("pair", &mut obj).unwrap_err();
        assert!(err.message().contains("array"));
    }

    #[test]
    fn test_read_many_accepts_single_object() {
        let mut obj = object(json!({"pair": {"a": 4}}));
        let pairs = read_many::<Pair>("pair", &mut obj).unwrap();
        assert_eq!(pairs, vec![Pair { a: 4 }]);
    }

    #[test]
    fn test_read_many_rejects_null_entry() {
        let mut obj = object(json!({"pair": [{"a": 4}, null]}));
        assert!(read_many::<Pair>("pair", &mut obj).is_err());
    }

    #[test]
    fn test_null_element_is_rejected() {
        let mut one = object(json!({"pair": null}));
        assert!(read_one::<Pair>("pair", &mut one).is_err());

        let mut many = object(json!({"pair": null}));
        let err = read_many::<Pair>("pair", &mut many).unwrap_err();
        assert!(err.message().contains("null"));
    }

    #[test]
    fn test_decode_error_names_field() {
        let mut obj = object(json!({"pair": {"a": "x"}}));
        let err = read_one::<Pair>("pair", &mut obj).unwrap_err();
        assert_eq!(err.field(), "pair");
    }
}
