//! Names and constants shared by the XML writer and reader.

use serde_json::Value;

/// FHIR namespace URI, declared on the root resource element.
pub const FHIR_NAMESPACE: &str = "http://hl7.org/fhir";

/// Checks if a JSON key is a primitive sidecar (`_birthDate`).
pub fn is_sidecar_key(key: &str) -> bool {
    key.starts_with('_')
}

/// Strips the underscore prefix from a sidecar key.
pub fn strip_underscore(key: &str) -> &str {
    key.strip_prefix('_').unwrap_or(key)
}

/// Resource elements are the only ones whose names start uppercase.
pub fn is_resource_name(name: &str) -> bool {
    name.chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

/// Checks if an element name is the narrative XHTML `div`.
pub fn is_div_element(name: &str) -> bool {
    name == "div"
}

/// Elements that carry `url` as an attribute rather than a child.
pub fn has_url_attribute(element: &str) -> bool {
    matches!(element, "extension" | "modifierExtension")
}

/// Namespace declarations (`xmlns`, `xmlns:xsi`).
pub fn is_namespace_attribute(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

/// Attributes that are not FHIR content: namespace declarations and any
/// prefixed attribute such as `xsi:schemaLocation`.
pub fn is_foreign_attribute(key: &str) -> bool {
    is_namespace_attribute(key) || key.contains(':')
}

/// Converts a Rust boolean to its string representation for XML.
pub fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Renders a JSON scalar as the text of a `value` attribute.
///
/// Numbers keep their original lexical form.
pub fn lexical(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(b) => Some(bool_to_string(*b).to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_sidecar_key() {
        assert!(is_sidecar_key("_status"));
        assert!(is_sidecar_key("_synonym"));
        assert!(!is_sidecar_key("status"));
    }

    #[test]
    fn test_strip_underscore() {
        assert_eq!(strip_underscore("_status"), "status");
        assert_eq!(strip_underscore("status"), "status");
    }

    #[test]
    fn test_is_resource_name() {
        assert!(is_resource_name("MedicationKnowledge"));
        assert!(!is_resource_name("contained"));
        assert!(!is_resource_name(""));
    }

    #[test]
    fn test_is_div_element() {
        assert!(is_div_element("div"));
        assert!(!is_div_element("DIV"));
        assert!(!is_div_element("text"));
    }

    #[test]
    fn test_url_attribute_owners() {
        assert!(has_url_attribute("extension"));
        assert!(has_url_attribute("modifierExtension"));
        assert!(!has_url_attribute("monitoringProgram"));
    }

    #[test]
    fn test_foreign_attributes() {
        assert!(is_namespace_attribute("xmlns"));
        assert!(is_namespace_attribute("xmlns:xhtml"));
        assert!(!is_namespace_attribute("xsi:schemaLocation"));
        assert!(is_foreign_attribute("xsi:schemaLocation"));
        assert!(is_foreign_attribute("xmlns:xsi"));
        assert!(!is_foreign_attribute("value"));
        assert!(!is_foreign_attribute("url"));
    }

    #[test]
    fn test_lexical_keeps_number_text() {
        let value: Value = serde_json::from_str("4.50").unwrap();
        assert_eq!(lexical(&value).as_deref(), Some("4.50"));
        assert_eq!(lexical(&json!(true)).as_deref(), Some("true"));
        assert_eq!(lexical(&json!("active")).as_deref(), Some("active"));
        assert_eq!(lexical(&json!({})), None);
    }
}
