use crate::model::{Cardinality, Field, Model, Shape, Variant};
use proc_macro2::TokenStream;
use quote::quote;

pub fn expand(model: &Model) -> TokenStream {
    match &model.shape {
        Shape::Struct(fields) => expand_struct(model, fields),
        Shape::Choice(variants) => expand_choice(model, variants),
    }
}

fn expand_struct(model: &Model, fields: &[Field]) -> TokenStream {
    let ident = &model.ident;
    let type_name = &model.type_name;
    let base_type = &model.base_type;

    let elements = fields.iter().map(|field| {
        let ty = &field.elem_ty;
        let name = &field.json_name;
        let is_list = field.cardinality.is_list();
        quote! {
            ::medknow_fhirpath_support::ClassInfoElement::new(
                #name,
                <#ty as ::medknow_fhirpath_support::StaticTypeInfo>::type_specifier(),
                #is_list,
            )
        }
    });

    let pushes = fields.iter().map(push_field);

    quote! {
        impl ::medknow_fhirpath_support::StaticTypeInfo for #ident {
            fn type_specifier() -> ::medknow_fhirpath_support::TypeSpecifier {
                ::medknow_fhirpath_support::TypeSpecifier::fhir(#type_name)
            }
        }

        impl ::medknow_fhirpath_support::Reflect for #ident {
            fn type_info(&self) -> ::medknow_fhirpath_support::TypeInfo {
                ::medknow_fhirpath_support::TypeInfo::Class(::medknow_fhirpath_support::ClassInfo::new(
                    #type_name,
                    #base_type,
                    ::std::vec![#(#elements),*],
                ))
            }

            fn children(
                &self,
                name: ::std::option::Option<&str>,
            ) -> ::std::vec::Vec<&dyn ::medknow_fhirpath_support::Reflect> {
                let mut out: ::std::vec::Vec<&dyn ::medknow_fhirpath_support::Reflect> = ::std::vec::Vec::new();
                #(#pushes)*
                out
            }
        }
    }
}

fn push_field(field: &Field) -> TokenStream {
    let ident = &field.ident;
    let name = &field.json_name;
    match field.cardinality {
        Cardinality::Required => quote! {
            if ::medknow_fhirpath_support::matches_node(name, #name, &self.#ident) {
                ::medknow_fhirpath_support::push_one(&mut out, &self.#ident);
            }
        },
        Cardinality::Optional => quote! {
            if let ::std::option::Option::Some(value) = &self.#ident {
                if ::medknow_fhirpath_support::matches_node(name, #name, value) {
                    ::medknow_fhirpath_support::push_one(&mut out, value);
                }
            }
        },
        Cardinality::Many => quote! {
            if ::medknow_fhirpath_support::matches(name, #name) {
                ::medknow_fhirpath_support::push_many(&mut out, &self.#ident);
            }
        },
        Cardinality::OptionalMany => quote! {
            if let ::std::option::Option::Some(items) = &self.#ident {
                if ::medknow_fhirpath_support::matches(name, #name) {
                    ::medknow_fhirpath_support::push_many(&mut out, items);
                }
            }
        },
    }
}

fn expand_choice(model: &Model, variants: &[Variant]) -> TokenStream {
    let ident = &model.ident;
    let specifiers = variants.iter().map(|variant| {
        let ty = &variant.elem_ty;
        quote! { <#ty as ::medknow_fhirpath_support::StaticTypeInfo>::type_specifier() }
    });
    let variant_idents: Vec<_> = variants.iter().map(|variant| &variant.ident).collect();
    let suffixes = variants.iter().map(|variant| &variant.suffix);

    quote! {
        impl ::medknow_fhirpath_support::StaticTypeInfo for #ident {
            fn type_specifier() -> ::medknow_fhirpath_support::TypeSpecifier {
                ::medknow_fhirpath_support::TypeSpecifier::Choice(::std::vec![#(#specifiers),*])
            }
        }

        impl ::medknow_fhirpath_support::Reflect for #ident {
            fn type_info(&self) -> ::medknow_fhirpath_support::TypeInfo {
                match self {
                    #(#ident::#variant_idents(value) => ::medknow_fhirpath_support::Reflect::type_info(value),)*
                }
            }

            fn children(
                &self,
                name: ::std::option::Option<&str>,
            ) -> ::std::vec::Vec<&dyn ::medknow_fhirpath_support::Reflect> {
                match self {
                    #(#ident::#variant_idents(value) => ::medknow_fhirpath_support::Reflect::children(value, name),)*
                }
            }

            fn system_value(&self) -> ::std::option::Option<::medknow_fhirpath_support::SystemValue> {
                match self {
                    #(#ident::#variant_idents(value) => ::medknow_fhirpath_support::Reflect::system_value(value),)*
                }
            }

            fn choice_suffix(&self) -> ::std::option::Option<&'static str> {
                ::std::option::Option::Some(match self {
                    #(#ident::#variant_idents(_) => #suffixes,)*
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{DeriveInput, parse_quote};

    #[test]
    fn test_struct_reflection_lists_elements() {
        let input: DeriveInput = parse_quote! {
            #[fhir_path(base = "BackboneElement")]
            struct MedicationKnowledgeKinetics {
                area_under_curve: Option<Vec<Quantity>>,
                half_life_period: Option<Duration>,
            }
        };
        let model = Model::from_input(&input).unwrap();
        let out = expand(&model).to_string();
        assert!(out.contains("\"areaUnderCurve\""));
        assert!(out.contains("\"halfLifePeriod\""));
        assert!(out.contains("\"BackboneElement\""));
        assert!(out.contains("push_many"));
        assert!(out.contains("matches_node"));
    }

    #[test]
    fn test_choice_reflection_reports_suffixes() {
        let input: DeriveInput = parse_quote! {
            enum MedicationKnowledgeIngredientItem {
                CodeableConcept(CodeableConcept),
                Reference(Reference),
            }
        };
        let model = Model::from_input(&input).unwrap();
        let out = expand(&model).to_string();
        assert!(out.contains("choice_suffix"));
        assert!(out.contains("TypeSpecifier :: Choice"));
    }
}
