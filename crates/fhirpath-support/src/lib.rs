//! Bridge between the MedicationKnowledge model and a FHIRPath evaluator.
//!
//! The evaluator itself lives elsewhere. What it needs from the model is
//! captured by two traits:
//!
//! * [`Reflect`]: runtime access to a node's type, its children and, for
//!   primitives, its system value.
//! * [`StaticTypeInfo`]: the type specifier of a Rust type without a value,
//!   used to describe elements that are absent.
//!
//! [`select`] walks a dotted member path (`code.coding.code`) over
//! [`Reflect::children`]; it understands member access only.

mod type_info;
mod value;

pub use type_info::{
    ClassInfo, ClassInfoElement, FHIR_NAMESPACE, SYSTEM_NAMESPACE, SimpleTypeInfo, TypeInfo,
    TypeSpecifier,
};
pub use value::SystemValue;

/// Runtime view of a model node.
pub trait Reflect {
    fn type_info(&self) -> TypeInfo;

    /// Child nodes, in element order. With `Some(name)` only children of
    /// that element are returned; repeating elements yield one node per item.
    fn children(&self, name: Option<&str>) -> Vec<&dyn Reflect>;

    /// The primitive value, for primitives that carry one.
    fn system_value(&self) -> Option<SystemValue> {
        None
    }

    /// Type suffix of the active variant when the node is a choice value
    /// (`CodeableConcept` for `indicationCodeableConcept`).
    fn choice_suffix(&self) -> Option<&'static str> {
        None
    }
}

/// Type specifier of a Rust type, available without a value.
pub trait StaticTypeInfo {
    fn type_specifier() -> TypeSpecifier;
}

/// Whether an element called `name` passes a children filter.
pub fn matches(filter: Option<&str>, name: &str) -> bool {
    filter.is_none_or(|wanted| wanted == name)
}

/// Choice elements answer to their base name and to their typed name.
pub fn matches_choice(filter: Option<&str>, base: &str, suffix: &str) -> bool {
    match filter {
        None => true,
        Some(wanted) => {
            wanted == base
                || (wanted.len() == base.len() + suffix.len()
                    && wanted.starts_with(base)
                    && wanted.ends_with(suffix))
        }
    }
}

/// Like [`matches`], but lets a choice value answer to its typed name too.
pub fn matches_node<T: Reflect + ?Sized>(filter: Option<&str>, name: &str, node: &T) -> bool {
    match node.choice_suffix() {
        Some(suffix) => matches_choice(filter, name, suffix),
        None => matches(filter, name),
    }
}

pub fn push_one<'a, T: Reflect>(out: &mut Vec<&'a dyn Reflect>, value: &'a T) {
    out.push(value);
}

pub fn push_optional<'a, T: Reflect>(out: &mut Vec<&'a dyn Reflect>, value: &'a Option<T>) {
    if let Some(value) = value {
        out.push(value);
    }
}

pub fn push_many<'a, T: Reflect>(out: &mut Vec<&'a dyn Reflect>, values: &'a [T]) {
    out.extend(values.iter().map(|value| value as &dyn Reflect));
}

/// Evaluates a dotted member path against `root`.
///
/// A leading segment equal to the root's type name is skipped, so both
/// `MedicationKnowledge.code` and `code` select the same nodes.
pub fn select<'a>(root: &'a dyn Reflect, path: &str) -> Vec<&'a dyn Reflect> {
    let mut segments = path
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .peekable();
    let root_type = root.type_info();
    if segments.peek() == Some(&root_type.name()) {
        segments.next();
    }

    let mut current = vec![root];
    for segment in segments {
        current = current
            .into_iter()
            .flat_map(|node| node.children(Some(segment)))
            .collect();
        if current.is_empty() {
            break;
        }
    }
    current
}

impl Reflect for String {
    fn type_info(&self) -> TypeInfo {
        TypeInfo::Simple(SimpleTypeInfo::system("String"))
    }

    fn children(&self, _name: Option<&str>) -> Vec<&dyn Reflect> {
        Vec::new()
    }

    fn system_value(&self) -> Option<SystemValue> {
        Some(SystemValue::String(self.clone()))
    }
}

impl StaticTypeInfo for String {
    fn type_specifier() -> TypeSpecifier {
        TypeSpecifier::system("String")
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn type_info(&self) -> TypeInfo {
        (**self).type_info()
    }

    fn children(&self, name: Option<&str>) -> Vec<&dyn Reflect> {
        (**self).children(name)
    }

    fn system_value(&self) -> Option<SystemValue> {
        (**self).system_value()
    }

    fn choice_suffix(&self) -> Option<&'static str> {
        (**self).choice_suffix()
    }
}

impl<T: StaticTypeInfo> StaticTypeInfo for Box<T> {
    fn type_specifier() -> TypeSpecifier {
        T::type_specifier()
    }
}
