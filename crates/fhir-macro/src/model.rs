//! Parsed view of a type the derives are applied to.
//!
//! Element cardinality is read off the Rust field type:
//!
//! | field type          | FHIR cardinality |
//! |---------------------|------------------|
//! | `T` / `Box<T>`      | `1..1`           |
//! | `Option<T>` / `Option<Box<T>>` | `0..1` |
//! | `Vec<T>`            | `1..*`           |
//! | `Option<Vec<T>>`    | `0..*`           |

use heck::ToLowerCamelCase;
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Fields, GenericArgument, Ident, LitStr, PathArguments, Type,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Required,
    Optional,
    Many,
    OptionalMany,
}

impl Cardinality {
    pub fn is_list(self) -> bool {
        matches!(self, Cardinality::Many | Cardinality::OptionalMany)
    }
}

pub struct Field {
    pub ident: Ident,
    pub json_name: String,
    /// Element type with `Option`, `Vec` and `Box` peeled off.
    pub elem_ty: Type,
    pub cardinality: Cardinality,
    pub boxed: bool,
}

pub struct Variant {
    pub ident: Ident,
    /// Appended to the element name to form the JSON key (`valueQuantity`).
    pub suffix: String,
    pub elem_ty: Type,
    pub boxed: bool,
}

pub enum Shape {
    Struct(Vec<Field>),
    Choice(Vec<Variant>),
}

pub struct Model {
    pub ident: Ident,
    pub type_name: String,
    pub base_type: String,
    pub resource_type: Option<String>,
    pub shape: Shape,
}

#[derive(Default)]
struct SerdeAttrs {
    rename: Option<String>,
    resource_type: Option<String>,
}

#[derive(Default)]
struct PathAttrs {
    type_name: Option<String>,
    base: Option<String>,
}

impl Model {
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "FHIR model types cannot be generic",
            ));
        }

        let serde_attrs = serde_attrs(&input.attrs)?;
        let path_attrs = path_attrs(&input.attrs)?;

        let shape = match &input.data {
            Data::Struct(data) => Shape::Struct(parse_fields(&data.fields)?),
            Data::Enum(data) => {
                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    variants.push(parse_variant(variant)?);
                }
                Shape::Choice(variants)
            }
            Data::Union(data) => {
                return Err(syn::Error::new_spanned(
                    data.union_token,
                    "unions are not supported",
                ));
            }
        };

        let base_type = match (path_attrs.base, &serde_attrs.resource_type) {
            (Some(base), _) => base,
            (None, Some(_)) => "DomainResource".to_string(),
            (None, None) => "Element".to_string(),
        };

        Ok(Model {
            ident: input.ident.clone(),
            type_name: path_attrs
                .type_name
                .unwrap_or_else(|| input.ident.to_string()),
            base_type,
            resource_type: serde_attrs.resource_type,
            shape,
        })
    }
}

fn parse_fields(fields: &Fields) -> syn::Result<Vec<Field>> {
    let Fields::Named(named) = fields else {
        return Err(syn::Error::new_spanned(
            fields,
            "FHIR elements must be structs with named fields",
        ));
    };

    let mut out = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let attrs = serde_attrs(&field.attrs)?;
        let json_name = attrs
            .rename
            .unwrap_or_else(|| ident.unraw().to_string().to_lower_camel_case());
        let (cardinality, boxed, elem_ty) = classify(&field.ty);
        out.push(Field {
            ident,
            json_name,
            elem_ty,
            cardinality,
            boxed,
        });
    }
    Ok(out)
}

fn parse_variant(variant: &syn::Variant) -> syn::Result<Variant> {
    let Fields::Unnamed(unnamed) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "choice variants must wrap exactly one type",
        ));
    };
    if unnamed.unnamed.len() != 1 {
        return Err(syn::Error::new_spanned(
            variant,
            "choice variants must wrap exactly one type",
        ));
    }
    let attrs = serde_attrs(&variant.attrs)?;
    let ty = &unnamed.unnamed[0].ty;
    let (elem_ty, boxed) = match unwrap_generic(ty, "Box") {
        Some(inner) => (inner.clone(), true),
        None => (ty.clone(), false),
    };
    Ok(Variant {
        ident: variant.ident.clone(),
        suffix: attrs
            .rename
            .unwrap_or_else(|| variant.ident.unraw().to_string()),
        elem_ty,
        boxed,
    })
}

/// Splits a field type into cardinality, boxing and element type.
fn classify(ty: &Type) -> (Cardinality, bool, Type) {
    if let Some(inner) = unwrap_generic(ty, "Option") {
        if let Some(item) = unwrap_generic(inner, "Vec") {
            return (Cardinality::OptionalMany, false, item.clone());
        }
        if let Some(item) = unwrap_generic(inner, "Box") {
            return (Cardinality::Optional, true, item.clone());
        }
        return (Cardinality::Optional, false, inner.clone());
    }
    if let Some(item) = unwrap_generic(ty, "Vec") {
        return (Cardinality::Many, false, item.clone());
    }
    if let Some(item) = unwrap_generic(ty, "Box") {
        return (Cardinality::Required, true, item.clone());
    }
    (Cardinality::Required, false, ty.clone())
}

fn unwrap_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn serde_attrs(attrs: &[Attribute]) -> syn::Result<SerdeAttrs> {
    let mut out = SerdeAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("fhir_serde") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                out.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else if meta.path.is_ident("resource_type") {
                out.resource_type = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(meta.error("unsupported fhir_serde attribute"))
            }
        })?;
    }
    Ok(out)
}

fn path_attrs(attrs: &[Attribute]) -> syn::Result<PathAttrs> {
    let mut out = PathAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("fhir_path") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("type_name") {
                out.type_name = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else if meta.path.is_ident("base") {
                out.base = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(meta.error("unsupported fhir_path attribute"))
            }
        })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;
    use syn::parse_quote;

    fn type_string(ty: &Type) -> String {
        ty.to_token_stream().to_string().replace(' ', "")
    }

    #[test]
    fn test_classify_cardinalities() {
        let cases: Vec<(Type, Cardinality, bool, &str)> = vec![
            (parse_quote!(CodeableConcept), Cardinality::Required, false, "CodeableConcept"),
            (parse_quote!(Option<Code>), Cardinality::Optional, false, "Code"),
            (parse_quote!(Vec<Reference>), Cardinality::Many, false, "Reference"),
            (parse_quote!(Option<Vec<String>>), Cardinality::OptionalMany, false, "String"),
            (parse_quote!(Option<Box<Reference>>), Cardinality::Optional, true, "Reference"),
            (parse_quote!(Box<Quantity>), Cardinality::Required, true, "Quantity"),
        ];
        for (ty, cardinality, boxed, elem) in cases {
            let (found, found_boxed, elem_ty) = classify(&ty);
            assert_eq!(found, cardinality);
            assert_eq!(found_boxed, boxed);
            assert_eq!(type_string(&elem_ty), elem);
        }
    }

    #[test]
    fn test_struct_model_names() {
        let input: DeriveInput = parse_quote! {
            #[fhir_serde(resource_type = "MedicationKnowledge")]
            struct MedicationKnowledge {
                implicit_rules: Option<Uri>,
                r#type: Option<CodeableConcept>,
                lethal_dose50: Option<Vec<Quantity>>,
                #[fhir_serde(rename = "valueSet")]
                values: Option<Canonical>,
            }
        };
        let model = Model::from_input(&input).unwrap();
        assert_eq!(model.type_name, "MedicationKnowledge");
        assert_eq!(model.base_type, "DomainResource");
        assert_eq!(model.resource_type.as_deref(), Some("MedicationKnowledge"));
        let Shape::Struct(fields) = model.shape else {
            panic!("expected struct shape");
        };
        let names: Vec<_> = fields.iter().map(|f| f.json_name.as_str()).collect();
        assert_eq!(names, vec!["implicitRules", "type", "lethalDose50", "valueSet"]);
    }

    #[test]
    fn test_choice_model_suffixes() {
        let input: DeriveInput = parse_quote! {
            enum DrugCharacteristicValue {
                CodeableConcept(CodeableConcept),
                #[fhir_serde(rename = "Base64Binary")]
                Binary(Base64Binary),
                Quantity(Box<Quantity>),
            }
        };
        let model = Model::from_input(&input).unwrap();
        assert_eq!(model.base_type, "Element");
        let Shape::Choice(variants) = model.shape else {
            panic!("expected choice shape");
        };
        let suffixes: Vec<_> = variants.iter().map(|v| v.suffix.as_str()).collect();
        assert_eq!(suffixes, vec!["CodeableConcept", "Base64Binary", "Quantity"]);
        assert!(variants[2].boxed);
    }

    #[test]
    fn test_rejects_generics_and_unit_variants() {
        let generic: DeriveInput = parse_quote! { struct Wrapper<T> { value: T } };
        assert!(Model::from_input(&generic).is_err());

        let unit: DeriveInput = parse_quote! { enum Choice { Empty } };
        assert!(Model::from_input(&unit).is_err());

        let bad_attr: DeriveInput = parse_quote! {
            struct Coding { #[fhir_serde(flatten)] code: Option<Code> }
        };
        assert!(Model::from_input(&bad_attr).is_err());
    }
}
