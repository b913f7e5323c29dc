//! Split-primitive codec.
//!
//! In FHIR JSON a primitive and its metadata travel as two parallel keys:
//!
//! ```json
//! {
//!   "status": "active",
//!   "_status": { "id": "status-1", "extension": [...] }
//! }
//! ```
//!
//! Repeating primitives use index-aligned arrays where `null` fills the
//! slots that have no counterpart:
//!
//! ```json
//! { "synonym": ["Tylenol", null], "_synonym": [null, {"id": "s2"}] }
//! ```
//!
//! The XML reader in `medknow-serde` hands primitives over already merged, as
//! `{"id": .., "value": "..", "extension": [..]}`. [`read_one`] and
//! [`read_many`] accept that shape only inside [`with_xml_primitives`],
//! parsing the `value` text lexically. Plain JSON must use scalars.

use crate::{FieldError, JsonObject, not_null, single_or_vec};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde_json::Value;
use std::cell::Cell;

thread_local! {
    static XML_PRIMITIVES: Cell<bool> = const { Cell::new(false) };
}

/// Runs `decode` with merged XML primitives accepted on this thread.
///
/// The XML reader wraps its final `serde_json::from_value` call in this, so
/// `{"value": "true"}` reads as a boolean there and is an error everywhere
/// else. The previous setting is restored on return and on unwind.
pub fn with_xml_primitives<T>(decode: impl FnOnce() -> T) -> T {
    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            XML_PRIMITIVES.with(|flag| flag.set(self.0));
        }
    }

    let _restore = Restore(XML_PRIMITIVES.with(|flag| flag.replace(true)));
    decode()
}

fn xml_primitives() -> bool {
    XML_PRIMITIVES.with(Cell::get)
}

/// A primitive value type (`bool`, `i32`, `u32`, `String`, decimals).
pub trait PrimitiveValue: Sized + Serialize {
    /// Parses a JSON scalar; types must match exactly.
    fn from_json(value: &Value) -> Result<Self, String>;

    /// Parses the lexical form carried by an XML `value` attribute.
    fn from_lexical(text: &str) -> Result<Self, String>;
}

/// A primitive element: optional id, optional extensions, optional value.
pub trait PrimitiveElement: Sized {
    type Value: PrimitiveValue;
    type Extension: Serialize + DeserializeOwned;

    fn id(&self) -> Option<&str>;
    fn extension(&self) -> Option<&[Self::Extension]>;
    fn value(&self) -> Option<&Self::Value>;

    /// Builds the element, applying any value constraint of the FHIR type.
    fn from_parts(
        id: Option<String>,
        extension: Option<Vec<Self::Extension>>,
        value: Option<Self::Value>,
    ) -> Result<Self, String>;
}

/// The `_name` sidecar written next to a primitive value.
#[derive(Serialize)]
pub struct IdAndExtensionHelper<'a, E> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<&'a [E]>,
}

impl<'a, E> IdAndExtensionHelper<'a, E> {
    fn of<P>(element: &'a P) -> Option<Self>
    where
        P: PrimitiveElement<Extension = E>,
    {
        let id = element.id();
        let extension = element.extension().filter(|ext| !ext.is_empty());
        if id.is_none() && extension.is_none() {
            return None;
        }
        Some(Self { id, extension })
    }
}

/// Checks if a primitive has nothing to write.
pub fn is_empty<P>(element: &P) -> bool
where
    P: PrimitiveElement,
{
    element.value().is_none() && IdAndExtensionHelper::of(element).is_none()
}

pub fn write_one<P, M>(element: &P, name: &str, map: &mut M) -> Result<(), M::Error>
where
    P: PrimitiveElement,
    M: SerializeMap,
{
    if let Some(value) = element.value() {
        map.serialize_entry(name, value)?;
    }
    if let Some(sidecar) = IdAndExtensionHelper::of(element) {
        map.serialize_entry(&format!("_{}", name), &sidecar)?;
    }
    Ok(())
}

pub fn write_many<P, M>(items: &[P], name: &str, map: &mut M) -> Result<(), M::Error>
where
    P: PrimitiveElement,
    M: SerializeMap,
{
    if items.iter().any(|item| item.value().is_some()) {
        let values: Vec<Option<&P::Value>> = items.iter().map(PrimitiveElement::value).collect();
        map.serialize_entry(name, &values)?;
    }
    let sidecars: Vec<Option<IdAndExtensionHelper<'_, P::Extension>>> =
        items.iter().map(IdAndExtensionHelper::of).collect();
    if sidecars.iter().any(Option::is_some) {
        map.serialize_entry(&format!("_{}", name), &sidecars)?;
    }
    Ok(())
}

pub fn read_one<P>(name: &str, object: &mut JsonObject) -> Result<Option<P>, FieldError>
where
    P: PrimitiveElement,
{
    let sidecar_name = format!("_{}", name);
    let main = object
        .remove(name)
        .map(|value| not_null(name, value))
        .transpose()?;
    let sidecar = object
        .remove(&sidecar_name)
        .map(|value| not_null(&sidecar_name, value))
        .transpose()?;
    if main.is_none() && sidecar.is_none() {
        return Ok(None);
    }
    if matches!(main, Some(Value::Array(_))) || matches!(sidecar, Some(Value::Array(_))) {
        return Err(FieldError::new(
            name,
            "expected a single element, found an array",
        ));
    }
    decode_slot(name, main.unwrap_or(Value::Null), sidecar.unwrap_or(Value::Null))
}

pub fn read_many<P>(name: &str, object: &mut JsonObject) -> Result<Vec<P>, FieldError>
where
    P: PrimitiveElement,
{
    let sidecar_name = format!("_{}", name);
    let main = match object.remove(name) {
        Some(value) => single_or_vec(not_null(name, value)?),
        None => Vec::new(),
    };
    let sidecar = match object.remove(&sidecar_name) {
        Some(value) => single_or_vec(not_null(&sidecar_name, value)?),
        None => Vec::new(),
    };
    if !sidecar.is_empty() && !main.is_empty() && sidecar.len() != main.len() {
        return Err(FieldError::new(
            name,
            format!(
                "value array has {} entries but `_{}` has {}",
                main.len(),
                name,
                sidecar.len()
            ),
        ));
    }

    let len = main.len().max(sidecar.len());
    let mut main = main.into_iter();
    let mut sidecar = sidecar.into_iter();
    let mut items = Vec::with_capacity(len);
    for index in 0..len {
        let value = main.next().unwrap_or(Value::Null);
        let meta = sidecar.next().unwrap_or(Value::Null);
        match decode_slot::<P>(name, value, meta)? {
            Some(item) => items.push(item),
            None => {
                return Err(FieldError::new(
                    name,
                    format!("entry {} is null in both the value and `_{}` arrays", index, name),
                ));
            }
        }
    }
    Ok(items)
}

/// Decodes one primitive from its value half and its sidecar half.
fn decode_slot<P>(name: &str, main: Value, sidecar: Value) -> Result<Option<P>, FieldError>
where
    P: PrimitiveElement,
{
    let mut id = None;
    let mut extension = None;
    let value = match main {
        Value::Null => None,
        Value::Object(mut element) if xml_primitives() => {
            let (element_id, element_extension) = take_metadata::<P::Extension>(name, &mut element)?;
            id = element_id;
            extension = element_extension;
            let value = match element.remove("value") {
                None | Some(Value::Null) => None,
                Some(Value::String(text)) => {
                    Some(P::Value::from_lexical(&text).map_err(|msg| FieldError::new(name, msg))?)
                }
                Some(other) => {
                    Some(P::Value::from_json(&other).map_err(|msg| FieldError::new(name, msg))?)
                }
            };
            if let Some(key) = element.keys().next() {
                return Err(FieldError::new(
                    name,
                    format!("unexpected `{}` on a primitive element", key),
                ));
            }
            value
        }
        Value::Object(_) => {
            return Err(FieldError::new(
                name,
                format!("expected a JSON scalar, found an object; metadata belongs in `_{}`", name),
            ));
        }
        Value::Array(_) => {
            return Err(FieldError::new(name, "nested arrays are not allowed"));
        }
        scalar => Some(P::Value::from_json(&scalar).map_err(|msg| FieldError::new(name, msg))?),
    };

    match sidecar {
        Value::Null => {}
        Value::Object(meta) if meta.is_empty() => {
            return Err(FieldError::new(
                name,
                format!("`_{}` is empty; use null for a missing entry", name),
            ));
        }
        Value::Object(mut meta) => {
            let (meta_id, meta_extension) = take_metadata::<P::Extension>(name, &mut meta)?;
            id = id.or(meta_id);
            extension = match (extension, meta_extension) {
                (Some(mut inline), Some(more)) => {
                    inline.extend(more);
                    Some(inline)
                }
                (inline, more) => inline.or(more),
            };
            if let Some(key) = meta.keys().next() {
                return Err(FieldError::new(
                    name,
                    format!("unexpected `{}` in `_{}`", key, name),
                ));
            }
        }
        other => {
            return Err(FieldError::new(
                name,
                format!("`_{}` must be an object, found {}", name, other),
            ));
        }
    }

    if value.is_none() && id.is_none() && extension.is_none() {
        return Ok(None);
    }
    P::from_parts(id, extension, value)
        .map(Some)
        .map_err(|msg| FieldError::new(name, msg))
}

type Metadata<E> = (Option<String>, Option<Vec<E>>);

fn take_metadata<E>(name: &str, object: &mut JsonObject) -> Result<Metadata<E>, FieldError>
where
    E: DeserializeOwned,
{
    let id = match object.remove("id") {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) => Some(id),
        Some(other) => {
            return Err(FieldError::new(
                name,
                format!("element id must be a string, found {}", other),
            ));
        }
    };
    let extension = match object.remove("extension") {
        None => None,
        Some(value) => {
            let decoded = single_or_vec(not_null("extension", value)?)
                .into_iter()
                .map(|item| E::deserialize(item).map_err(|err| FieldError::new(name, err)))
                .collect::<Result<Vec<E>, FieldError>>()?;
            if decoded.is_empty() { None } else { Some(decoded) }
        }
    };
    Ok((id, extension))
}

impl PrimitiveValue for bool {
    fn from_json(value: &Value) -> Result<Self, String> {
        value
            .as_bool()
            .ok_or_else(|| format!("expected a boolean, found {}", value))
    }

    fn from_lexical(text: &str) -> Result<Self, String> {
        match text {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(format!("`{}` is not a boolean", other)),
        }
    }
}

impl PrimitiveValue for i32 {
    fn from_json(value: &Value) -> Result<Self, String> {
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| format!("expected a 32-bit integer, found {}", value))
    }

    fn from_lexical(text: &str) -> Result<Self, String> {
        text.parse()
            .map_err(|_| format!("`{}` is not a 32-bit integer", text))
    }
}

impl PrimitiveValue for u32 {
    fn from_json(value: &Value) -> Result<Self, String> {
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| format!("expected an unsigned 32-bit integer, found {}", value))
    }

    fn from_lexical(text: &str) -> Result<Self, String> {
        text.parse()
            .map_err(|_| format!("`{}` is not an unsigned 32-bit integer", text))
    }
}

impl PrimitiveValue for String {
    fn from_json(value: &Value) -> Result<Self, String> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| format!("expected a string, found {}", value))
    }

    fn from_lexical(text: &str) -> Result<Self, String> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ext {
        url: String,
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Flag {
        id: Option<String>,
        extension: Option<Vec<Ext>>,
        value: Option<bool>,
    }

    impl PrimitiveElement for Flag {
        type Value = bool;
        type Extension = Ext;

        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
        fn extension(&self) -> Option<&[Ext]> {
            self.extension.as_deref()
        }
        fn value(&self) -> Option<&bool> {
            self.value.as_ref()
        }
        fn from_parts(
            id: Option<String>,
            extension: Option<Vec<Ext>>,
            value: Option<bool>,
        ) -> Result<Self, String> {
            Ok(Self { id, extension, value })
        }
    }

    struct Collect<'a>(&'a mut JsonObject);

    impl SerializeMap for Collect<'_> {
        type Ok = ();
        type Error = serde_json::Error;

        fn serialize_key<T: ?Sized + Serialize>(&mut self, _key: &T) -> Result<(), Self::Error> {
            unreachable!("entries are written with serialize_entry")
        }
        fn serialize_value<T: ?Sized + Serialize>(&mut self, _value: &T) -> Result<(), Self::Error> {
            unreachable!("entries are written with serialize_entry")
        }
        fn serialize_entry<K, V>(&mut self, key: &K, value: &V) -> Result<(), Self::Error>
        where
            K: ?Sized + Serialize,
            V: ?Sized + Serialize,
        {
            let key = match serde_json::to_value(key)? {
                Value::String(key) => key,
                other => panic!("non-string key {other}"),
            };
            self.0.insert(key, serde_json::to_value(value)?);
            Ok(())
        }
        fn end(self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn written(write: impl FnOnce(&mut Collect<'_>) -> Result<(), serde_json::Error>) -> Value {
        let mut object = JsonObject::new();
        write(&mut Collect(&mut object)).unwrap();
        Value::Object(object)
    }

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_write_one_splits_value_and_metadata() {
        let flag = Flag {
            id: Some("f1".to_string()),
            extension: None,
            value: Some(true),
        };
        let out = written(|map| write_one(&flag, "isActive", map));
        assert_eq!(out, json!({"isActive": true, "_isActive": {"id": "f1"}}));
    }

    #[test]
    fn test_write_one_skips_empty_extension_list() {
        let flag = Flag {
            id: None,
            extension: Some(vec![]),
            value: Some(false),
        };
        let out = written(|map| write_one(&flag, "allowed", map));
        assert_eq!(out, json!({"allowed": false}));
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Flag::default()));
        assert!(is_empty(&Flag { extension: Some(vec![]), ..Default::default() }));
        assert!(!is_empty(&Flag { id: Some("f".to_string()), ..Default::default() }));
        assert!(!is_empty(&Flag { value: Some(false), ..Default::default() }));
    }

    #[test]
    fn test_write_many_aligns_arrays_with_nulls() {
        let items = vec![
            Flag { value: Some(true), ..Default::default() },
            Flag { id: Some("b".to_string()), ..Default::default() },
        ];
        let out = written(|map| write_many(&items, "flag", map));
        assert_eq!(
            out,
            json!({"flag": [true, null], "_flag": [null, {"id": "b"}]})
        );
    }

    #[test]
    fn test_read_one_merges_json_halves() {
        let mut obj = object(json!({
            "allowed": true,
            "_allowed": {"extension": [{"url": "http://example.org/a"}]}
        }));
        let flag: Flag = read_one("allowed", &mut obj).unwrap().unwrap();
        assert_eq!(flag.value, Some(true));
        assert_eq!(flag.extension.unwrap()[0].url, "http://example.org/a");
        assert!(obj.is_empty());
    }

    #[test]
    fn test_read_one_accepts_xml_shape_when_enabled() {
        let mut obj = object(json!({"allowed": {"id": "x", "value": "false"}}));
        let flag: Flag = with_xml_primitives(|| read_one("allowed", &mut obj))
            .unwrap()
            .unwrap();
        assert_eq!(flag.id.as_deref(), Some("x"));
        assert_eq!(flag.value, Some(false));
        assert!(!xml_primitives());
    }

    #[test]
    fn test_read_one_rejects_xml_shape_in_json() {
        let mut obj = object(json!({"allowed": {"value": "true"}}));
        let err = read_one::<Flag>("allowed", &mut obj).unwrap_err();
        assert!(err.message().contains("_allowed"));

        let mut typed = object(json!({"allowed": {"value": true}}));
        assert!(read_one::<Flag>("allowed", &mut typed).is_err());
    }

    #[test]
    fn test_read_one_rejects_null_and_empty_sidecar() {
        let mut null = object(json!({"allowed": null}));
        assert!(read_one::<Flag>("allowed", &mut null).is_err());

        let mut null_sidecar = object(json!({"allowed": true, "_allowed": null}));
        let err = read_one::<Flag>("allowed", &mut null_sidecar).unwrap_err();
        assert_eq!(err.field(), "_allowed");

        let mut empty = object(json!({"_allowed": {}}));
        let err = read_one::<Flag>("allowed", &mut empty).unwrap_err();
        assert!(err.message().contains("empty"));
    }

    #[test]
    fn test_xml_flag_is_restored_after_panic() {
        fn failing_decode() -> bool {
            assert!(xml_primitives());
            panic!("decode failed")
        }
        let result = std::panic::catch_unwind(|| with_xml_primitives(failing_decode));
        assert!(result.is_err());
        assert!(!xml_primitives());
    }

    #[test]
    fn test_read_one_is_strict_for_json_scalars() {
        let mut obj = object(json!({"allowed": "true"}));
        assert!(read_one::<Flag>("allowed", &mut obj).is_err());
    }

    #[test]
    fn test_read_many_pairs_sidecars_by_index() {
        let mut obj = object(json!({"flag": [true, null], "_flag": [null, {"id": "b"}]}));
        let flags: Vec<Flag> = read_many("flag", &mut obj).unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].value, Some(true));
        assert_eq!(flags[1].id.as_deref(), Some("b"));
        assert_eq!(flags[1].value, None);
    }

    #[test]
    fn test_read_many_rejects_double_null() {
        let mut obj = object(json!({"flag": [true, null], "_flag": [null, null]}));
        assert!(read_many::<Flag>("flag", &mut obj).is_err());
    }

    #[test]
    fn test_read_many_rejects_null_array() {
        let mut obj = object(json!({"flag": null}));
        assert!(read_many::<Flag>("flag", &mut obj).is_err());
    }

    #[test]
    fn test_read_many_rejects_empty_sidecar_entry() {
        let mut obj = object(json!({"flag": [true, false], "_flag": [null, {}]}));
        assert!(read_many::<Flag>("flag", &mut obj).is_err());
    }

    #[test]
    fn test_read_many_rejects_length_mismatch() {
        let mut obj = object(json!({"flag": [true, false], "_flag": [null]}));
        assert!(read_many::<Flag>("flag", &mut obj).is_err());
    }

    #[test]
    fn test_read_many_accepts_repeated_xml_elements() {
        let mut obj = object(json!({"flag": [{"value": "true"}, {"value": "false"}]}));
        let flags: Vec<Flag> = with_xml_primitives(|| read_many("flag", &mut obj)).unwrap();
        assert_eq!(
            flags.iter().map(|f| f.value).collect::<Vec<_>>(),
            vec![Some(true), Some(false)]
        );
    }

    #[test]
    fn test_integer_parsing() {
        assert_eq!(i32::from_json(&json!(-4)).unwrap(), -4);
        assert!(i32::from_json(&json!(1.5)).is_err());
        assert!(u32::from_json(&json!(-1)).is_err());
        assert_eq!(u32::from_lexical("12").unwrap(), 12);
        assert!(i32::from_lexical("twelve").is_err());
    }
}
