//! XML serialization.
//!
//! The value is first serialized to its FHIR JSON shape, which the model
//! derives already produce, and that tree is then written as FHIR XML:
//!
//! * object keys become child elements in the order they were serialized;
//! * scalars become `<name value=".."/>`, merged with their `_name` sidecar
//!   into `id` attributes and `extension` children;
//! * arrays become repeated elements, index-aligned with the sidecar array;
//! * element ids and extension urls become attributes;
//! * resources nested in other elements are wrapped in their type element;
//! * narrative `div` strings are copied as markup.

use crate::error::{Result, SerdeError};
use crate::xml::utils;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;
use tracing::{debug, trace};

/// Serialize a FHIR resource to an XML string.
///
/// # Examples
///
/// ```
/// use medknow_fhir::r4b::{Code, MedicationKnowledge};
/// use medknow_serde::xml::to_xml_string;
///
/// let med = MedicationKnowledge {
///     status: Some(Code::new("active")),
///     ..Default::default()
/// };
/// let xml = to_xml_string(&med)?;
/// assert!(xml.contains(r#"<MedicationKnowledge xmlns="http://hl7.org/fhir">"#));
/// assert!(xml.contains(r#"<status value="active"/>"#));
/// # Ok::<(), medknow_serde::SerdeError>(())
/// ```
pub fn to_xml_string<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    Ok(String::from_utf8(to_xml_vec(value)?)?)
}

/// Serialize a FHIR resource to an indented XML string.
pub fn to_xml_string_pretty<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    to_xml_writer_pretty(value, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Serialize a FHIR resource to an XML byte vector.
pub fn to_xml_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    to_xml_writer(value, &mut buffer)?;
    Ok(buffer)
}

/// Serialize a FHIR resource to an XML writer.
pub fn to_xml_writer<T, W>(value: &T, writer: W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let tree = serde_json::to_value(value)?;
    XmlSerializer::new(Writer::new(writer)).write_document(&tree)
}

/// Serialize a FHIR resource to an XML writer, indenting by two spaces.
pub fn to_xml_writer_pretty<T, W>(value: &T, writer: W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let tree = serde_json::to_value(value)?;
    XmlSerializer::new(Writer::new_with_indent(writer, b' ', 2)).write_document(&tree)
}

/// Writes a FHIR JSON tree as FHIR XML events.
struct XmlSerializer<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlSerializer<W> {
    fn new(writer: Writer<W>) -> Self {
        Self { writer }
    }

    fn write_document(mut self, tree: &Value) -> Result<()> {
        let resource = match tree {
            Value::Object(object) if object.contains_key("resourceType") => object,
            _ => {
                return Err(SerdeError::Custom(
                    "XML output needs a resource object with a `resourceType`".to_string(),
                ));
            }
        };

        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.write_resource(resource, true)?;
        self.writer.get_mut().flush()?;
        Ok(())
    }

    /// Writes `<Type>..</Type>` for a resource object.
    fn write_resource(&mut self, resource: &Map<String, Value>, root: bool) -> Result<()> {
        let name = match resource.get("resourceType") {
            Some(Value::String(name)) => name.as_str(),
            _ => {
                return Err(SerdeError::Custom(
                    "`resourceType` must be a string".to_string(),
                ));
            }
        };
        if root {
            debug!(resource_type = name, "writing XML resource");
        } else {
            trace!(resource_type = name, "writing contained resource");
        }

        let mut start = BytesStart::new(name);
        if root {
            start.push_attribute(("xmlns", utils::FHIR_NAMESPACE));
        }
        self.writer.write_event(Event::Start(start))?;
        self.write_children(resource, name, true)?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes a complex element: attributes first, then one child per key.
    fn write_complex(&mut self, name: &str, object: &Map<String, Value>) -> Result<()> {
        let mut start = BytesStart::new(name);
        let mut attributes = 0;
        if let Some(Value::String(id)) = object.get("id") {
            start.push_attribute(("id", id.as_str()));
            attributes += 1;
        }
        if utils::has_url_attribute(name) {
            if let Some(Value::String(url)) = object.get("url") {
                start.push_attribute(("url", url.as_str()));
                attributes += 1;
            }
        }

        if object.len() == attributes {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }
        self.writer.write_event(Event::Start(start))?;
        self.write_children(object, name, false)?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn write_children(
        &mut self,
        object: &Map<String, Value>,
        element: &str,
        resource: bool,
    ) -> Result<()> {
        for (key, value) in object {
            if key == "resourceType" && resource {
                continue;
            }
            if !resource && is_attribute(element, key, value) {
                continue;
            }
            if utils::is_sidecar_key(key) {
                let base = utils::strip_underscore(key);
                if !object.contains_key(base) {
                    self.write_field(base, &Value::Null, Some(value))?;
                }
                continue;
            }
            let sidecar = object.get(&format!("_{}", key));
            self.write_field(key, value, sidecar)?;
        }
        Ok(())
    }

    /// Writes every occurrence of a field, pairing values with sidecars.
    fn write_field(&mut self, name: &str, value: &Value, sidecar: Option<&Value>) -> Result<()> {
        let values = occurrences(value);
        let sidecars = sidecar.map(occurrences).unwrap_or_default();
        if !values.is_empty() && !sidecars.is_empty() && values.len() != sidecars.len() {
            return Err(SerdeError::Custom(format!(
                "`{}` has {} values but `_{}` has {}",
                name,
                values.len(),
                name,
                sidecars.len()
            )));
        }

        for index in 0..values.len().max(sidecars.len()) {
            let value = values.get(index).copied().unwrap_or(&Value::Null);
            let sidecar = sidecars.get(index).copied();
            self.write_element(name, value, sidecar)?;
        }
        Ok(())
    }

    fn write_element(&mut self, name: &str, value: &Value, sidecar: Option<&Value>) -> Result<()> {
        match value {
            Value::Object(object) if object.contains_key("resourceType") => {
                self.writer.write_event(Event::Start(BytesStart::new(name)))?;
                self.write_resource(object, false)?;
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
                Ok(())
            }
            Value::Object(object) => self.write_complex(name, object),
            Value::Array(_) => Err(SerdeError::Custom(format!(
                "`{}` contains a nested array",
                name
            ))),
            Value::String(markup) if utils::is_div_element(name) => self.write_div(markup),
            Value::Null => match sidecar {
                Some(sidecar) if !sidecar.is_null() => self.write_primitive(name, None, sidecar),
                _ => Ok(()),
            },
            scalar => {
                let sidecar = sidecar.unwrap_or(&Value::Null);
                self.write_primitive(name, utils::lexical(scalar), sidecar)
            }
        }
    }

    /// Writes `<name id=".." value="..">` with sidecar extensions as children.
    fn write_primitive(&mut self, name: &str, value: Option<String>, sidecar: &Value) -> Result<()> {
        let empty = Map::new();
        let meta = match sidecar {
            Value::Object(meta) => meta,
            Value::Null => &empty,
            other => {
                return Err(SerdeError::Custom(format!(
                    "`_{}` must be an object, found {}",
                    name, other
                )));
            }
        };

        let mut start = BytesStart::new(name);
        if let Some(Value::String(id)) = meta.get("id") {
            start.push_attribute(("id", id.as_str()));
        }
        if let Some(value) = &value {
            start.push_attribute(("value", value.as_str()));
        }

        match meta.get("extension") {
            Some(extensions) if !occurrences(extensions).is_empty() => {
                self.writer.write_event(Event::Start(start))?;
                self.write_field("extension", extensions, None)?;
                self.writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            _ => self.writer.write_event(Event::Empty(start))?,
        }
        Ok(())
    }

    /// Copies narrative XHTML into the output as markup.
    fn write_div(&mut self, markup: &str) -> Result<()> {
        let mut reader = Reader::from_str(markup);
        reader.config_mut().trim_text(false);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(Event::Decl(_)) => {}
                Ok(event) => self.writer.write_event(event)?,
                Err(e) => {
                    return Err(SerdeError::Custom(format!(
                        "narrative div is not well-formed XHTML: {}",
                        e
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Keys rendered as attributes of a non-resource element.
fn is_attribute(element: &str, key: &str, value: &Value) -> bool {
    value.is_string() && (key == "id" || (key == "url" && utils::has_url_attribute(element)))
}

fn occurrences(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
