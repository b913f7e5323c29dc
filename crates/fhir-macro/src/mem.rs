use crate::model::{Model, Shape};
use proc_macro2::TokenStream;
use quote::quote;

pub fn expand(model: &Model) -> TokenStream {
    let ident = &model.ident;
    let body = match &model.shape {
        Shape::Struct(fields) => {
            let idents = fields.iter().map(|field| &field.ident);
            quote! {
                0 #(+ ::medknow_fhir::MemSize::heap_size(&self.#idents))*
            }
        }
        Shape::Choice(variants) => {
            let idents = variants.iter().map(|variant| &variant.ident);
            quote! {
                match self {
                    #(#ident::#idents(value) => ::medknow_fhir::MemSize::heap_size(value),)*
                }
            }
        }
    };

    quote! {
        impl ::medknow_fhir::MemSize for #ident {
            fn heap_size(&self) -> usize {
                #body
            }
        }
    }
}
