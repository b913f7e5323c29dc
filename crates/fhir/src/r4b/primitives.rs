//! FHIR primitive elements.
//!
//! Each primitive is an element of its own: a value plus an optional element
//! id and extensions. In JSON the value and the metadata travel as separate
//! `name` / `_name` keys; see [`medknow_serde_support::primitive`].

use super::Extension;
use crate::{MemSize, PreciseDecimal};
use medknow_fhirpath_support::{
    ClassInfo, ClassInfoElement, Reflect, StaticTypeInfo, SystemValue, TypeInfo, TypeSpecifier,
    matches, push_many, push_optional,
};
use medknow_serde_support::{FhirJson, FieldError, JsonObject, PrimitiveElement, primitive};
use serde::ser::SerializeMap;
use std::fmt;

macro_rules! primitive_element {
    (
        $(#[$meta:meta])*
        $name:ident($value:ty) as $fhir:literal => $system:literal, $convert:expr
        $(, check = $check:path)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            pub id: Option<std::string::String>,
            pub extension: Option<Vec<Extension>>,
            pub value: Option<$value>,
        }

        impl $name {
            pub fn new(value: impl Into<$value>) -> Self {
                Self {
                    id: None,
                    extension: None,
                    value: Some(value.into()),
                }
            }
        }

        impl From<$value> for $name {
            fn from(value: $value) -> Self {
                Self::new(value)
            }
        }

        impl PrimitiveElement for $name {
            type Value = $value;
            type Extension = Extension;

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn extension(&self) -> Option<&[Extension]> {
                self.extension.as_deref()
            }

            fn value(&self) -> Option<&$value> {
                self.value.as_ref()
            }

            fn from_parts(
                id: Option<std::string::String>,
                extension: Option<Vec<Extension>>,
                value: Option<$value>,
            ) -> Result<Self, std::string::String> {
                $(
                    if let Some(value) = &value {
                        $check(value)?;
                    }
                )?
                Ok(Self { id, extension, value })
            }
        }

        impl FhirJson for $name {
            fn write_one<M>(&self, name: &str, map: &mut M) -> Result<(), M::Error>
            where
                M: SerializeMap,
            {
                primitive::write_one(self, name, map)
            }

            fn write_many<M>(items: &[Self], name: &str, map: &mut M) -> Result<(), M::Error>
            where
                M: SerializeMap,
            {
                primitive::write_many(items, name, map)
            }

            fn read_one(name: &str, object: &mut JsonObject) -> Result<Option<Self>, FieldError> {
                primitive::read_one(name, object)
            }

            fn read_many(name: &str, object: &mut JsonObject) -> Result<Vec<Self>, FieldError> {
                primitive::read_many(name, object)
            }

            fn is_empty_element(&self) -> bool {
                primitive::is_empty(self)
            }
        }

        impl StaticTypeInfo for $name {
            fn type_specifier() -> TypeSpecifier {
                TypeSpecifier::fhir($fhir)
            }
        }

        impl Reflect for $name {
            fn type_info(&self) -> TypeInfo {
                TypeInfo::Class(ClassInfo::new(
                    $fhir,
                    "Element",
                    vec![
                        ClassInfoElement::new("id", TypeSpecifier::system("String"), false),
                        ClassInfoElement::new("extension", TypeSpecifier::fhir("Extension"), true),
                        ClassInfoElement::new("value", TypeSpecifier::system($system), false),
                    ],
                ))
            }

            fn children(&self, name: Option<&str>) -> Vec<&dyn Reflect> {
                let mut out: Vec<&dyn Reflect> = Vec::new();
                if matches(name, "id") {
                    push_optional(&mut out, &self.id);
                }
                if let Some(extension) = &self.extension {
                    if matches(name, "extension") {
                        push_many(&mut out, extension);
                    }
                }
                out
            }

            fn system_value(&self) -> Option<SystemValue> {
                let convert: fn(&$value) -> Option<SystemValue> = $convert;
                self.value.as_ref().and_then(convert)
            }
        }

        impl MemSize for $name {
            fn heap_size(&self) -> usize {
                self.id.heap_size() + self.extension.heap_size() + self.value.heap_size()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let text = match &self.value {
                    Some(value) => serde_json::to_string(value).map_err(|_| fmt::Error)?,
                    None => "null".to_string(),
                };
                f.write_str(&text)
            }
        }
    };
}

primitive_element! {
    Boolean(bool) as "boolean" => "Boolean", |v| Some(SystemValue::Boolean(*v))
}

primitive_element! {
    Integer(i32) as "integer" => "Integer", |v| Some(SystemValue::Integer(i64::from(*v)))
}

primitive_element! {
    UnsignedInt(u32) as "unsignedInt" => "Integer", |v| Some(SystemValue::Integer(i64::from(*v)))
}

primitive_element! {
    PositiveInt(u32) as "positiveInt" => "Integer", |v| Some(SystemValue::Integer(i64::from(*v))),
    check = check_positive
}

primitive_element! {
    Decimal(PreciseDecimal) as "decimal" => "Decimal", |v| v.value().map(SystemValue::Decimal)
}

primitive_element! {
    String(std::string::String) as "string" => "String", |v| Some(SystemValue::String(v.clone()))
}

primitive_element! {
    Code(std::string::String) as "code" => "String", |v| Some(SystemValue::String(v.clone()))
}

primitive_element! {
    Markdown(std::string::String) as "markdown" => "String", |v| Some(SystemValue::String(v.clone()))
}

primitive_element! {
    Id(std::string::String) as "id" => "String", |v| Some(SystemValue::String(v.clone())),
    check = check_id
}

primitive_element! {
    Uri(std::string::String) as "uri" => "String", |v| Some(SystemValue::String(v.clone()))
}

primitive_element! {
    Url(std::string::String) as "url" => "String", |v| Some(SystemValue::String(v.clone()))
}

primitive_element! {
    Canonical(std::string::String) as "canonical" => "String", |v| Some(SystemValue::String(v.clone()))
}

primitive_element! {
    Base64Binary(std::string::String) as "base64Binary" => "String", |v| Some(SystemValue::String(v.clone()))
}

primitive_element! {
    /// Partial dates are allowed: `2024`, `2024-03`, `2024-03-01`.
    Date(std::string::String) as "date" => "Date", |v| Some(SystemValue::Date(v.clone()))
}

primitive_element! {
    DateTime(std::string::String) as "dateTime" => "DateTime", |v| Some(SystemValue::DateTime(v.clone()))
}

primitive_element! {
    Instant(std::string::String) as "instant" => "DateTime", |v| Some(SystemValue::DateTime(v.clone()))
}

primitive_element! {
    Time(std::string::String) as "time" => "Time", |v| Some(SystemValue::Time(v.clone()))
}

primitive_element! {
    /// Narrative XHTML, kept as text. The XML writer emits it as markup.
    Xhtml(std::string::String) as "xhtml" => "String", |v| Some(SystemValue::String(v.clone()))
}

fn check_positive(value: &u32) -> Result<(), std::string::String> {
    if *value == 0 {
        return Err("positiveInt must be 1 or greater".to_string());
    }
    Ok(())
}

fn check_id(value: &std::string::String) -> Result<(), std::string::String> {
    let valid_chars = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if value.is_empty() || value.len() > 64 || !valid_chars {
        return Err(format!(
            "`{}` is not a valid id (1-64 characters of A-Z, a-z, 0-9, '-', '.')",
            value
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn object(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_positive_int_rejects_zero() {
        let mut obj = object(json!({"count": 0}));
        let err = PositiveInt::read_one("count", &mut obj).unwrap_err();
        assert!(err.message().contains("1 or greater"));

        let mut obj = object(json!({"count": 3}));
        assert_eq!(
            PositiveInt::read_one("count", &mut obj).unwrap(),
            Some(PositiveInt::new(3u32))
        );
    }

    #[test]
    fn test_id_validation() {
        let mut ok = object(json!({"id": "med-1.a"}));
        assert!(Id::read_one("id", &mut ok).unwrap().is_some());

        let mut bad = object(json!({"id": "has space"}));
        assert!(Id::read_one("id", &mut bad).is_err());

        let long = "x".repeat(65);
        let mut too_long = object(json!({ "id": long }));
        assert!(Id::read_one("id", &mut too_long).is_err());
    }

    #[test]
    fn test_boolean_is_strict_in_json() {
        let mut obj = object(json!({"allowed": "true"}));
        assert!(Boolean::read_one("allowed", &mut obj).is_err());
    }

    #[test]
    fn test_system_values() {
        assert_eq!(
            Boolean::new(true).system_value(),
            Some(SystemValue::Boolean(true))
        );
        assert_eq!(
            UnsignedInt::new(4u32).system_value(),
            Some(SystemValue::Integer(4))
        );
        let d = Decimal::new(PreciseDecimal::from(dec!(2.50)));
        assert_eq!(d.system_value(), Some(SystemValue::Decimal(dec!(2.50))));
        assert_eq!(
            Date::new("2024-03").system_value(),
            Some(SystemValue::Date("2024-03".to_string()))
        );
        assert_eq!(String::default().system_value(), None);
    }

    #[test]
    fn test_children_expose_metadata() {
        let code = Code {
            id: Some("c1".to_string()),
            extension: Some(vec![Extension {
                url: "http://example.org/ext".to_string(),
                ..Default::default()
            }]),
            value: Some("active".to_string()),
        };
        assert_eq!(code.children(None).len(), 2);
        assert_eq!(code.children(Some("extension")).len(), 1);
        assert_eq!(code.type_info().qualified_name(), "FHIR.code");
    }

    #[test]
    fn test_display_renders_json_value() {
        assert_eq!(Code::new("active").to_string(), "\"active\"");
        assert_eq!(Integer::new(-2).to_string(), "-2");
        assert_eq!(Boolean::default().to_string(), "null");
    }

    #[test]
    fn test_mem_size_counts_owned_strings() {
        let s = String::new(std::string::String::with_capacity(16));
        assert_eq!(s.heap_size(), 16);
        assert!(s.mem_size() >= 16 + std::mem::size_of::<String>());
    }
}
