use crate::model::{Cardinality, Field, Model, Shape, Variant};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;

pub fn expand(model: &Model) -> TokenStream {
    match &model.shape {
        Shape::Struct(fields) => expand_struct(model, fields),
        Shape::Choice(variants) => expand_choice(model, variants),
    }
}

fn expand_struct(model: &Model, fields: &[Field]) -> TokenStream {
    let ident = &model.ident;
    let type_name = &model.type_name;

    let write_resource_type = model.resource_type.as_ref().map(|resource_type| {
        quote! {
            ::serde::ser::SerializeMap::serialize_entry(&mut map, "resourceType", #resource_type)?;
        }
    });
    let check_resource_type = model.resource_type.as_ref().map(|resource_type| {
        quote! {
            ::medknow_serde_support::expect_resource_type(object, #resource_type)?;
        }
    });

    let writes = fields.iter().map(write_field);
    let reads = fields.iter().map(read_field);
    let field_idents = fields.iter().map(|field| &field.ident);
    let locals = fields.iter().map(local_ident);

    quote! {
        impl ::serde::Serialize for #ident {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                let mut map = serializer.serialize_map(::std::option::Option::None)?;
                #write_resource_type
                #(#writes)*
                ::serde::ser::SerializeMap::end(map)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for #ident {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                fn read(
                    object: &mut ::medknow_serde_support::JsonObject,
                ) -> ::std::result::Result<#ident, ::medknow_serde_support::FieldError> {
                    #check_resource_type
                    #(#reads)*
                    ::medknow_serde_support::deny_unknown_fields(object, #type_name)?;
                    ::std::result::Result::Ok(#ident {
                        #(#field_idents: #locals,)*
                    })
                }

                let mut object =
                    <::medknow_serde_support::JsonObject as ::serde::Deserialize>::deserialize(deserializer)?;
                read(&mut object).map_err(<D::Error as ::serde::de::Error>::custom)
            }
        }

        impl ::medknow_serde_support::FhirJson for #ident {
            fn write_one<M>(&self, name: &str, map: &mut M) -> ::std::result::Result<(), M::Error>
            where
                M: ::serde::ser::SerializeMap,
            {
                ::medknow_serde_support::complex::write_one(self, name, map)
            }

            fn write_many<M>(items: &[Self], name: &str, map: &mut M) -> ::std::result::Result<(), M::Error>
            where
                M: ::serde::ser::SerializeMap,
            {
                ::medknow_serde_support::complex::write_many(items, name, map)
            }

            fn read_one(
                name: &str,
                object: &mut ::medknow_serde_support::JsonObject,
            ) -> ::std::result::Result<::std::option::Option<Self>, ::medknow_serde_support::FieldError> {
                ::medknow_serde_support::complex::read_one(name, object)
            }

            fn read_many(
                name: &str,
                object: &mut ::medknow_serde_support::JsonObject,
            ) -> ::std::result::Result<::std::vec::Vec<Self>, ::medknow_serde_support::FieldError> {
                ::medknow_serde_support::complex::read_many(name, object)
            }
        }
    }
}

fn local_ident(field: &Field) -> syn::Ident {
    format_ident!("__{}", field.ident.unraw())
}

fn write_field(field: &Field) -> TokenStream {
    let ident = &field.ident;
    let ty = &field.elem_ty;
    let name = &field.json_name;
    match (field.cardinality, field.boxed) {
        (Cardinality::Required, false) => quote! {
            <#ty as ::medknow_serde_support::FhirJson>::write_one(&self.#ident, #name, &mut map)?;
        },
        (Cardinality::Required, true) => quote! {
            <#ty as ::medknow_serde_support::FhirJson>::write_one(&*self.#ident, #name, &mut map)?;
        },
        (Cardinality::Optional, false) => quote! {
            if let ::std::option::Option::Some(value) = &self.#ident {
                <#ty as ::medknow_serde_support::FhirJson>::write_one(value, #name, &mut map)?;
            }
        },
        (Cardinality::Optional, true) => quote! {
            if let ::std::option::Option::Some(value) = &self.#ident {
                <#ty as ::medknow_serde_support::FhirJson>::write_one(&**value, #name, &mut map)?;
            }
        },
        (Cardinality::Many, _) => quote! {
            <#ty as ::medknow_serde_support::FhirJson>::write_many(&self.#ident, #name, &mut map)?;
        },
        (Cardinality::OptionalMany, _) => quote! {
            if let ::std::option::Option::Some(items) = &self.#ident {
                <#ty as ::medknow_serde_support::FhirJson>::write_many(items, #name, &mut map)?;
            }
        },
    }
}

fn read_field(field: &Field) -> TokenStream {
    let local = local_ident(field);
    let ty = &field.elem_ty;
    let name = &field.json_name;
    let read_one = quote! { <#ty as ::medknow_serde_support::FhirJson>::read_one(#name, object) };
    let read_many = quote! { <#ty as ::medknow_serde_support::FhirJson>::read_many(#name, object) };
    match (field.cardinality, field.boxed) {
        (Cardinality::Required, false) => quote! {
            let #local = ::medknow_serde_support::required(#read_one, #name)?;
        },
        (Cardinality::Required, true) => quote! {
            let #local = ::std::boxed::Box::new(::medknow_serde_support::required(#read_one, #name)?);
        },
        (Cardinality::Optional, false) => quote! {
            let #local = #read_one?;
        },
        (Cardinality::Optional, true) => quote! {
            let #local = #read_one?.map(::std::boxed::Box::new);
        },
        (Cardinality::Many, _) => quote! {
            let #local = ::medknow_serde_support::at_least_one(#read_many, #name)?;
        },
        (Cardinality::OptionalMany, _) => quote! {
            let #local = ::medknow_serde_support::non_empty(#read_many)?;
        },
    }
}

fn expand_choice(model: &Model, variants: &[Variant]) -> TokenStream {
    let ident = &model.ident;

    let write_arms = variants.iter().map(|variant| {
        let variant_ident = &variant.ident;
        let ty = &variant.elem_ty;
        let suffix = &variant.suffix;
        let value = if variant.boxed {
            quote! { &**value }
        } else {
            quote! { value }
        };
        quote! {
            #ident::#variant_ident(value) => {
                let key = ::std::format!("{}{}", name, #suffix);
                if <#ty as ::medknow_serde_support::FhirJson>::is_empty_element(#value) {
                    return ::std::result::Result::Err(<M::Error as ::serde::ser::Error>::custom(
                        ::std::format!("{}: choice value has no value, id or extension", key),
                    ));
                }
                <#ty as ::medknow_serde_support::FhirJson>::write_one(#value, &key, map)
            }
        }
    });

    let probes = variants.iter().map(|variant| {
        let variant_ident = &variant.ident;
        let ty = &variant.elem_ty;
        let suffix = &variant.suffix;
        let wrap = if variant.boxed {
            quote! { #ident::#variant_ident(::std::boxed::Box::new(value)) }
        } else {
            quote! { #ident::#variant_ident(value) }
        };
        quote! {
            if let ::std::option::Option::Some(value) = <#ty as ::medknow_serde_support::FhirJson>::read_one(
                &::std::format!("{}{}", name, #suffix),
                object,
            )? {
                if found.is_some() {
                    return ::std::result::Result::Err(::medknow_serde_support::FieldError::new(
                        name,
                        "more than one choice type is present",
                    ));
                }
                found = ::std::option::Option::Some(#wrap);
            }
        }
    });

    quote! {
        impl ::medknow_serde_support::FhirJson for #ident {
            fn write_one<M>(&self, name: &str, map: &mut M) -> ::std::result::Result<(), M::Error>
            where
                M: ::serde::ser::SerializeMap,
            {
                match self {
                    #(#write_arms)*
                }
            }

            fn write_many<M>(items: &[Self], name: &str, _map: &mut M) -> ::std::result::Result<(), M::Error>
            where
                M: ::serde::ser::SerializeMap,
            {
                if items.is_empty() {
                    return ::std::result::Result::Ok(());
                }
                ::std::result::Result::Err(<M::Error as ::serde::ser::Error>::custom(
                    ::std::format!("{}[x]: choice elements cannot repeat", name),
                ))
            }

            fn read_one(
                name: &str,
                object: &mut ::medknow_serde_support::JsonObject,
            ) -> ::std::result::Result<::std::option::Option<Self>, ::medknow_serde_support::FieldError> {
                let mut found: ::std::option::Option<Self> = ::std::option::Option::None;
                #(#probes)*
                ::std::result::Result::Ok(found)
            }

            fn read_many(
                name: &str,
                object: &mut ::medknow_serde_support::JsonObject,
            ) -> ::std::result::Result<::std::vec::Vec<Self>, ::medknow_serde_support::FieldError> {
                match Self::read_one(name, object)? {
                    ::std::option::Option::None => ::std::result::Result::Ok(::std::vec::Vec::new()),
                    ::std::option::Option::Some(_) => ::std::result::Result::Err(
                        ::medknow_serde_support::FieldError::new(name, "choice elements cannot repeat"),
                    ),
                }
            }
        }
    }
}
