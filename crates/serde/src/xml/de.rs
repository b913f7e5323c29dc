//! XML deserialization.
//!
//! quick-xml events are folded into the FHIR JSON shape that the model
//! derives decode:
//!
//! * the root element name becomes `resourceType`;
//! * attributes (`id`, `value`, `url`) become string entries of the
//!   element's object, so `<status value="active"/>` reads as
//!   `{"status": {"value": "active"}}`, which primitive decoders accept
//!   while [`with_xml_primitives`] is in effect;
//! * namespace declarations and other prefixed attributes
//!   (`xsi:schemaLocation`) are skipped;
//! * a child name seen once maps to an object, a repeated one to an array;
//! * an element holding a resource (`<contained><MedicationKnowledge>`)
//!   becomes that resource object;
//! * narrative `div` elements are captured as raw XHTML strings.
//!
//! Elements may nest at most [`MAX_DEPTH`] levels deep.

use crate::error::{Result, SerdeError};
use crate::xml::utils;
use quick_xml::Reader;
use quick_xml::Writer;
use medknow_fhir::serde_support::with_xml_primitives;
use quick_xml::events::{BytesStart, BytesText, Event};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io::BufRead;
use tracing::{debug, trace};

/// Deepest element nesting the reader accepts, matching serde_json's
/// recursion limit.
pub const MAX_DEPTH: usize = 128;

/// Deserialize a FHIR resource from an XML string.
///
/// # Examples
///
/// ```
/// use medknow_fhir::r4b::MedicationKnowledge;
/// use medknow_serde::xml::from_xml_str;
///
/// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
/// <MedicationKnowledge xmlns="http://hl7.org/fhir">
///   <id value="example"/>
///   <status value="active"/>
/// </MedicationKnowledge>"#;
/// let med: MedicationKnowledge = from_xml_str(xml)?;
/// assert_eq!(med.status.and_then(|s| s.value).as_deref(), Some("active"));
/// # Ok::<(), medknow_serde::SerdeError>(())
/// ```
pub fn from_xml_str<T>(xml: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_xml_reader(xml.as_bytes())
}

/// Deserialize a FHIR resource from XML bytes.
pub fn from_xml_slice<T>(xml: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let xml = std::str::from_utf8(xml)?;
    from_xml_str(xml)
}

/// Deserialize a FHIR resource from an XML reader.
pub fn from_xml_reader<R, T>(reader: R) -> Result<T>
where
    R: BufRead,
    T: DeserializeOwned,
{
    let tree = XmlDeserializer::new(reader).read_document()?;
    with_xml_primitives(|| serde_json::from_value(tree))
        .map_err(|err| SerdeError::Custom(format!("invalid FHIR XML: {}", err)))
}

/// Reads quick-xml events into a FHIR JSON tree.
struct XmlDeserializer<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    depth: usize,
}

impl<R: BufRead> XmlDeserializer<R> {
    fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        // Narrative text needs its surrounding whitespace.
        reader.config_mut().trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            depth: 0,
        }
    }

    fn next_event(&mut self) -> Result<Event<'static>> {
        self.buf.clear();
        Ok(self.reader.read_event_into(&mut self.buf)?.into_owned())
    }

    fn read_document(&mut self) -> Result<Value> {
        let (start, empty) = loop {
            match self.next_event()? {
                Event::Start(start) => break (start, false),
                Event::Empty(start) => break (start, true),
                Event::Text(text) if is_whitespace_text(&text) => {}
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => {
                    return Err(SerdeError::Custom(
                        "XML document has no root element".to_string(),
                    ));
                }
                other => {
                    return Err(SerdeError::Custom(format!(
                        "unexpected {:?} before the root element",
                        other
                    )));
                }
            }
        };

        let name = element_name(&start)?;
        if !utils::is_resource_name(&name) {
            return Err(SerdeError::Custom(format!(
                "root element <{}> is not a resource",
                name
            )));
        }
        debug!(resource_type = %name, "reading XML resource");
        let resource = self.read_resource(&start, empty)?;

        loop {
            match self.next_event()? {
                Event::Eof => break,
                Event::Text(text) if is_whitespace_text(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                other => {
                    return Err(SerdeError::Custom(format!(
                        "unexpected {:?} after the root element",
                        other
                    )));
                }
            }
        }
        Ok(resource)
    }

    /// Reads `<Type>..</Type>` into an object led by `resourceType`.
    fn read_resource(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<Value> {
        let name = element_name(start)?;
        let body = match self.read_element(start, empty)? {
            Value::Object(body) => body,
            _ => {
                return Err(SerdeError::Custom(format!(
                    "<{}> cannot directly hold another resource",
                    name
                )));
            }
        };

        let mut resource = Map::new();
        resource.insert("resourceType".to_string(), Value::String(name));
        resource.extend(body);
        Ok(Value::Object(resource))
    }

    /// Reads the attributes and children of an element whose start tag has
    /// already been consumed.
    fn read_element(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<Value> {
        if self.depth >= MAX_DEPTH {
            return Err(SerdeError::Custom(format!(
                "elements are nested more than {} levels deep",
                MAX_DEPTH
            )));
        }
        self.depth += 1;
        let value = self.read_element_content(start, empty)?;
        self.depth -= 1;
        Ok(value)
    }

    fn read_element_content(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<Value> {
        let mut object = Map::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            if utils::is_foreign_attribute(&key) {
                if !utils::is_namespace_attribute(&key) {
                    trace!(attribute = %key, "skipping foreign attribute");
                }
                continue;
            }
            let value = attr
                .decode_and_unescape_value(self.reader.decoder())?
                .into_owned();
            object.insert(key, Value::String(value));
        }
        if empty {
            return Ok(Value::Object(object));
        }

        let name = element_name(start)?;
        let mut resource = None;
        loop {
            let (child, child_empty) = match self.next_event()? {
                Event::Start(child) => (child, false),
                Event::Empty(child) => (child, true),
                Event::End(_) => break,
                Event::Text(text) if is_whitespace_text(&text) => continue,
                Event::Comment(_) | Event::PI(_) => continue,
                Event::Eof => {
                    return Err(SerdeError::Custom(format!(
                        "unexpected end of input inside <{}>",
                        name
                    )));
                }
                other => {
                    return Err(SerdeError::Custom(format!(
                        "unexpected {:?} inside <{}>",
                        other, name
                    )));
                }
            };

            let child_name = element_name(&child)?;
            if utils::is_div_element(&child_name) {
                let markup = self.read_xhtml(child, child_empty)?;
                insert_child(&mut object, child_name, Value::String(markup));
            } else if utils::is_resource_name(&child_name) {
                if resource.is_some() {
                    return Err(SerdeError::Custom(format!(
                        "<{}> holds more than one resource",
                        name
                    )));
                }
                trace!(resource_type = %child_name, container = %name, "reading nested resource");
                resource = Some(self.read_resource(&child, child_empty)?);
            } else {
                let value = self.read_element(&child, child_empty)?;
                insert_child(&mut object, child_name, value);
            }
        }

        match resource {
            Some(_) if !object.is_empty() => Err(SerdeError::Custom(format!(
                "<{}> mixes a resource with other content",
                name
            ))),
            Some(resource) => Ok(resource),
            None => Ok(Value::Object(object)),
        }
    }

    /// Copies a `div` element and its content back out as markup.
    fn read_xhtml(&mut self, start: BytesStart<'static>, empty: bool) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        if empty {
            writer.write_event(Event::Empty(start))?;
            return Ok(String::from_utf8(writer.into_inner())?);
        }

        writer.write_event(Event::Start(start))?;
        let mut depth = 1usize;
        while depth > 0 {
            let event = self.next_event()?;
            match &event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => {
                    return Err(SerdeError::Custom(
                        "unexpected end of input inside narrative div".to_string(),
                    ));
                }
                _ => {}
            }
            writer.write_event(event)?;
        }
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

/// Adds a child value, turning repeated names into arrays.
fn insert_child(object: &mut Map<String, Value>, name: String, value: Value) {
    match object.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            object.insert(name, value);
        }
    }
}

fn element_name(start: &BytesStart<'_>) -> Result<String> {
    Ok(std::str::from_utf8(start.name().as_ref())?.to_string())
}

fn is_whitespace_text(text: &BytesText<'_>) -> bool {
    text.as_ref()
        .iter()
        .all(|b| matches!(b, b' ' | b'\n' | b'\r' | b'\t'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(xml: &str) -> Value {
        XmlDeserializer::new(xml.as_bytes()).read_document().unwrap()
    }

    #[test]
    fn test_root_becomes_resource_type() {
        let value = tree(
            r#"<?xml version="1.0"?>
            <MedicationKnowledge xmlns="http://hl7.org/fhir">
              <id value="m1"/>
            </MedicationKnowledge>"#,
        );
        assert_eq!(
            value,
            json!({"resourceType": "MedicationKnowledge", "id": {"value": "m1"}})
        );
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["resourceType", "id"]);
    }

    #[test]
    fn test_attributes_and_extension_children() {
        let value = tree(
            r#"<MedicationKnowledge xmlns="http://hl7.org/fhir">
              <status id="s1" value="active">
                <extension url="http://example.org/x"><valueBoolean value="true"/></extension>
              </status>
            </MedicationKnowledge>"#,
        );
        assert_eq!(
            value["status"],
            json!({
                "id": "s1",
                "value": "active",
                "extension": {
                    "url": "http://example.org/x",
                    "valueBoolean": {"value": "true"}
                }
            })
        );
    }

    #[test]
    fn test_repeated_elements_become_arrays() {
        let value = tree(
            r#"<MedicationKnowledge xmlns="http://hl7.org/fhir">
              <synonym value="a"/>
              <synonym id="s2"/>
              <doseForm/>
            </MedicationKnowledge>"#,
        );
        assert_eq!(value["synonym"], json!([{"value": "a"}, {"id": "s2"}]));
        assert_eq!(value["doseForm"], json!({}));
    }

    #[test]
    fn test_contained_unwraps_to_resource() {
        let value = tree(
            r#"<MedicationKnowledge xmlns="http://hl7.org/fhir">
              <contained>
                <MedicationKnowledge><id value="inner"/></MedicationKnowledge>
              </contained>
            </MedicationKnowledge>"#,
        );
        assert_eq!(
            value["contained"],
            json!({"resourceType": "MedicationKnowledge", "id": {"value": "inner"}})
        );
    }

    #[test]
    fn test_div_is_captured_verbatim() {
        let value = tree(concat!(
            r#"<MedicationKnowledge xmlns="http://hl7.org/fhir"><text>"#,
            r#"<status value="generated"/>"#,
            r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>Tylenol <b>500</b> &amp; co</p></div>"#,
            "</text></MedicationKnowledge>"
        ));
        assert_eq!(
            value["text"]["div"],
            json!(r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>Tylenol <b>500</b> &amp; co</p></div>"#)
        );
    }

    #[test]
    fn test_attribute_entities_are_unescaped() {
        let value = tree(
            r#"<MedicationKnowledge><synonym value="A &amp; B"/></MedicationKnowledge>"#,
        );
        assert_eq!(value["synonym"], json!({"value": "A & B"}));
    }

    #[test]
    fn test_text_outside_div_is_rejected() {
        let err = XmlDeserializer::new(
            "<MedicationKnowledge><status>active</status></MedicationKnowledge>".as_bytes(),
        )
        .read_document()
        .unwrap_err();
        assert!(err.to_string().contains("inside <status>"));
    }

    #[test]
    fn test_root_must_be_a_resource() {
        let err = XmlDeserializer::new(r#"<status value="x"/>"#.as_bytes())
            .read_document()
            .unwrap_err();
        assert!(err.to_string().contains("not a resource"));
    }

    #[test]
    fn test_prefixed_root_attributes_are_skipped() {
        let value = tree(concat!(
            r#"<MedicationKnowledge xmlns="http://hl7.org/fhir" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
            r#"xsi:schemaLocation="http://hl7.org/fhir ../../schema/medicationknowledge.xsd">"#,
            r#"<status value="active"/></MedicationKnowledge>"#
        ));
        assert_eq!(
            value,
            json!({"resourceType": "MedicationKnowledge", "status": {"value": "active"}})
        );
    }

    #[test]
    fn test_nesting_depth_is_limited() {
        let nested = |levels: usize| {
            format!(
                "<MedicationKnowledge>{}{}</MedicationKnowledge>",
                "<code>".repeat(levels),
                "</code>".repeat(levels)
            )
        };
        assert!(
            XmlDeserializer::new(nested(MAX_DEPTH - 1).as_bytes())
                .read_document()
                .is_ok()
        );

        let deep = nested(200_000);
        let err = XmlDeserializer::new(deep.as_bytes())
            .read_document()
            .unwrap_err();
        assert!(err.to_string().contains("nested more than 128 levels"));
    }

    #[test]
    fn test_unclosed_document_is_an_error() {
        assert!(
            XmlDeserializer::new("<MedicationKnowledge><code>".as_bytes())
                .read_document()
                .is_err()
        );
    }
}
