//! JSON entry points.
//!
//! Thin wrappers around `serde_json`. The FHIR JSON shape itself (split
//! primitives, choice keys, `resourceType`) comes from the `FhirSerde`
//! derives on the model types, so these functions only map errors into
//! [`SerdeError`](crate::SerdeError).
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Deserialize a FHIR resource from a JSON string.
///
/// # Examples
///
/// ```
/// use medknow_fhir::r4b::MedicationKnowledge;
/// use medknow_serde::json::from_json_str;
///
/// let json = r#"{"resourceType": "MedicationKnowledge", "id": "example"}"#;
/// let med: MedicationKnowledge = from_json_str(json)?;
/// assert_eq!(med.id.and_then(|id| id.value).as_deref(), Some("example"));
/// # Ok::<(), medknow_serde::SerdeError>(())
/// ```
pub fn from_json_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    Ok(serde_json::from_str(s)?)
}

/// Deserialize a FHIR resource from a JSON byte slice.
pub fn from_json_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    Ok(serde_json::from_slice(v)?)
}

/// Deserialize a FHIR resource from a `serde_json::Value`.
pub fn from_json_value<T>(value: serde_json::Value) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    Ok(serde_json::from_value(value)?)
}

/// Deserialize a FHIR resource from a reader. The reader is not buffered.
pub fn from_json_reader<R, T>(reader: R) -> Result<T>
where
    R: Read,
    T: serde::de::DeserializeOwned,
{
    Ok(serde_json::from_reader(reader)?)
}

/// Serialize a FHIR resource to a compact JSON string.
///
/// # Examples
///
/// ```
/// use medknow_fhir::r4b::{Code, MedicationKnowledge};
/// use medknow_serde::json::to_json_string;
///
/// let med = MedicationKnowledge {
///     status: Some(Code::new("active")),
///     ..Default::default()
/// };
/// assert_eq!(
///     to_json_string(&med)?,
///     r#"{"resourceType":"MedicationKnowledge","status":"active"}"#
/// );
/// # Ok::<(), medknow_serde::SerdeError>(())
/// ```
pub fn to_json_string<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string(value)?)
}

/// Serialize a FHIR resource to a pretty-printed JSON string.
pub fn to_json_string_pretty<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serialize a FHIR resource to a JSON byte vector.
pub fn to_json_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_vec(value)?)
}

/// Serialize a FHIR resource to a `serde_json::Value`.
pub fn to_json_value<T>(value: &T) -> Result<serde_json::Value>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_value(value)?)
}

/// Serialize a FHIR resource into a writer, optionally pretty-printed.
pub fn to_json_writer<T, W>(value: &T, writer: W, pretty: bool) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    if pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}
