//! Type-info model exposed to the FHIRPath layer.
//!
//! The shapes follow the CQL/FHIRPath `ModelInfo` vocabulary: a type is
//! either a simple (system) type or a class with named elements, and every
//! element refers to its type through a [`TypeSpecifier`].

use std::fmt;

/// Namespace of FHIR model types (`FHIR.Coding`).
pub const FHIR_NAMESPACE: &str = "FHIR";

/// Namespace of FHIRPath system types (`System.String`).
pub const SYSTEM_NAMESPACE: &str = "System";

/// Reference to a type from an element definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpecifier {
    /// A single named type such as `FHIR.CodeableConcept`.
    Named { namespace: String, name: String },
    /// A repeating element of the inner type.
    List(Box<TypeSpecifier>),
    /// A choice element (`value[x]`) and its permitted alternatives.
    Choice(Vec<TypeSpecifier>),
}

impl TypeSpecifier {
    pub fn named(namespace: &str, name: &str) -> Self {
        TypeSpecifier::Named {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    pub fn fhir(name: &str) -> Self {
        Self::named(FHIR_NAMESPACE, name)
    }

    pub fn system(name: &str) -> Self {
        Self::named(SYSTEM_NAMESPACE, name)
    }

    pub fn list(self) -> Self {
        TypeSpecifier::List(Box::new(self))
    }

    /// `Namespace.Name` for named types, `None` for lists and choices.
    pub fn qualified_name(&self) -> Option<String> {
        match self {
            TypeSpecifier::Named { namespace, name } => Some(format!("{}.{}", namespace, name)),
            _ => None,
        }
    }

    /// Alternatives of a choice; a named type is its own single alternative.
    pub fn alternatives(&self) -> Vec<&TypeSpecifier> {
        match self {
            TypeSpecifier::Choice(options) => options.iter().collect(),
            TypeSpecifier::List(inner) => inner.alternatives(),
            named => vec![named],
        }
    }
}

impl fmt::Display for TypeSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpecifier::Named { namespace, name } => write!(f, "{}.{}", namespace, name),
            TypeSpecifier::List(inner) => write!(f, "List<{}>", inner),
            TypeSpecifier::Choice(options) => {
                write!(f, "Choice<")?;
                for (index, option) in options.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", option)?;
                }
                write!(f, ">")
            }
        }
    }
}

/// One element of a [`ClassInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfoElement {
    pub name: String,
    /// Element type, without the list wrapper.
    pub type_specifier: TypeSpecifier,
    pub is_list: bool,
}

impl ClassInfoElement {
    pub fn new(name: &str, type_specifier: TypeSpecifier, is_list: bool) -> Self {
        Self {
            name: name.to_string(),
            type_specifier,
            is_list,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.type_specifier, TypeSpecifier::Choice(_))
    }

    /// Element type with the list wrapper applied when the element repeats.
    pub fn full_type(&self) -> TypeSpecifier {
        if self.is_list {
            self.type_specifier.clone().list()
        } else {
            self.type_specifier.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub namespace: String,
    pub name: String,
    pub base_type: String,
    pub elements: Vec<ClassInfoElement>,
}

impl ClassInfo {
    pub fn new(name: &str, base_type: &str, elements: Vec<ClassInfoElement>) -> Self {
        Self {
            namespace: FHIR_NAMESPACE.to_string(),
            name: name.to_string(),
            base_type: base_type.to_string(),
            elements,
        }
    }

    pub fn element(&self, name: &str) -> Option<&ClassInfoElement> {
        self.elements.iter().find(|element| element.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTypeInfo {
    pub namespace: String,
    pub name: String,
    pub base_type: Option<String>,
}

impl SimpleTypeInfo {
    pub fn system(name: &str) -> Self {
        Self {
            namespace: SYSTEM_NAMESPACE.to_string(),
            name: name.to_string(),
            base_type: Some("System.Any".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeInfo {
    Simple(SimpleTypeInfo),
    Class(ClassInfo),
}

impl TypeInfo {
    pub fn name(&self) -> &str {
        match self {
            TypeInfo::Simple(info) => &info.name,
            TypeInfo::Class(info) => &info.name,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            TypeInfo::Simple(info) => &info.namespace,
            TypeInfo::Class(info) => &info.namespace,
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace(), self.name())
    }

    pub fn as_class(&self) -> Option<&ClassInfo> {
        match self {
            TypeInfo::Class(info) => Some(info),
            TypeInfo::Simple(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_specifier_display() {
        assert_eq!(TypeSpecifier::fhir("Coding").to_string(), "FHIR.Coding");
        assert_eq!(
            TypeSpecifier::fhir("Coding").list().to_string(),
            "List<FHIR.Coding>"
        );
        let choice = TypeSpecifier::Choice(vec![
            TypeSpecifier::fhir("CodeableConcept"),
            TypeSpecifier::fhir("Reference"),
        ]);
        assert_eq!(
            choice.to_string(),
            "Choice<FHIR.CodeableConcept, FHIR.Reference>"
        );
        assert_eq!(choice.qualified_name(), None);
        assert_eq!(choice.alternatives().len(), 2);
    }

    #[test]
    fn test_class_info_lookup() {
        let info = ClassInfo::new(
            "Coding",
            "Element",
            vec![
                ClassInfoElement::new("system", TypeSpecifier::fhir("uri"), false),
                ClassInfoElement::new("code", TypeSpecifier::fhir("code"), false),
            ],
        );
        assert_eq!(info.namespace, "FHIR");
        assert!(info.element("code").is_some());
        assert!(info.element("display").is_none());

        let wrapped = TypeInfo::Class(info);
        assert_eq!(wrapped.qualified_name(), "FHIR.Coding");
        assert!(wrapped.as_class().is_some());
    }

    #[test]
    fn test_list_element_full_type() {
        let element = ClassInfoElement::new("synonym", TypeSpecifier::fhir("string"), true);
        assert_eq!(element.full_type().to_string(), "List<FHIR.string>");
        assert!(!element.is_choice());
    }
}
