//! Derive macros for the MedicationKnowledge model.
//!
//! Each model type derives four impls:
//!
//! * `FhirSerde`: `serde::Serialize`/`Deserialize` producing FHIR JSON, plus
//!   the `FhirJson` field codec. On an enum it derives a choice (`[x]`) codec.
//! * `FhirPath`: `Reflect` and `StaticTypeInfo` for the FHIRPath bridge.
//! * `MemSize`: heap accounting over all fields.
//! * `FhirDisplay`: `Display` as pretty-printed FHIR JSON.
//!
//! Attributes:
//!
//! * `#[fhir_serde(resource_type = "...")]` on a struct marks it as a resource.
//! * `#[fhir_serde(rename = "...")]` overrides a field's JSON name or a
//!   variant's type suffix.
//! * `#[fhir_path(type_name = "...", base = "...")]` sets the reported type
//!   name and base type (`Element` by default, `DomainResource` for resources).

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod display;
mod json;
mod mem;
mod model;
mod path;

use model::Model;

#[proc_macro_derive(FhirSerde, attributes(fhir_serde, fhir_path))]
pub fn fhir_serde_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    Model::from_input(&input)
        .map(|model| json::expand(&model))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(FhirPath, attributes(fhir_serde, fhir_path))]
pub fn fhir_path_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    Model::from_input(&input)
        .map(|model| path::expand(&model))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(MemSize, attributes(fhir_serde, fhir_path))]
pub fn mem_size_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    Model::from_input(&input)
        .map(|model| mem::expand(&model))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(FhirDisplay, attributes(fhir_serde, fhir_path))]
pub fn fhir_display_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    Model::from_input(&input)
        .map(|model| display::expand(&model))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
