use crate::model::{Model, Shape};
use proc_macro2::TokenStream;
use quote::quote;

/// Structs render as pretty FHIR JSON; choice values render their variant.
pub fn expand(model: &Model) -> TokenStream {
    let ident = &model.ident;
    let body = match &model.shape {
        Shape::Struct(_) => quote! {
            let text = ::serde_json::to_string_pretty(self).map_err(|_| ::std::fmt::Error)?;
            f.write_str(&text)
        },
        Shape::Choice(variants) => {
            let idents = variants.iter().map(|variant| &variant.ident);
            quote! {
                match self {
                    #(#ident::#idents(value) => ::std::fmt::Display::fmt(value, f),)*
                }
            }
        }
    };

    quote! {
        impl ::std::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                #body
            }
        }
    }
}
