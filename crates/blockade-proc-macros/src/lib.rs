// blockade/blockade-proc-macros
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use proc_macro::TokenStream;

use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields};

/// Implements `From<&AppDependencies>` for an app service.
///
/// Fields marked with `#[inject]` are cloned from the field of the same name in
/// `AppDependencies`, all other fields are initialized via `Default::default()`.
#[proc_macro_derive(InjectDependencies, attributes(inject))]
pub fn inject_deps(stream: TokenStream) -> TokenStream {
    let input = parse_macro_input!(stream as DeriveInput);

    let fields = match named_fields(&input) {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let field_initialization = fields
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let is_injected = field
                .attrs
                .iter()
                .any(|attr| attr.path().is_ident("inject"));

            if is_injected {
                Some(quote! { #ident: deps.#ident.clone() })
            } else {
                Some(quote! { #ident: Default::default() })
            }
        })
        .collect::<Vec<_>>();

    let name = &input.ident;
    let expanded = quote! {
        impl From<&crate::app::deps::AppDependencies> for #name {
            fn from(deps: &crate::app::deps::AppDependencies) -> Self {
                Self {
                    #(#field_initialization,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Generates a public `<Name>Dependencies` struct mirroring the fields of a domain service
/// together with a `From` conversion, so that the service can be constructed from outside
/// of its module without exposing its fields.
#[proc_macro_derive(DependenciesStruct)]
pub fn dependencies_struct(stream: TokenStream) -> TokenStream {
    let input = parse_macro_input!(stream as DeriveInput);

    let fields = match named_fields(&input) {
        Ok(fields) => fields,
        Err(err) => return err.to_compile_error().into(),
    };

    let name = &input.ident;
    let dependencies_struct_name = format_ident!("{}Dependencies", name);

    let struct_fields = fields.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let field_type = &field.ty;
        Some(quote! { pub #ident: #field_type })
    });

    let field_initialization = fields.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        Some(quote! { #ident: deps.#ident })
    });

    let expanded = quote! {
        pub struct #dependencies_struct_name {
            #(#struct_fields,)*
        }

        impl From<#dependencies_struct_name> for #name {
            fn from(deps: #dependencies_struct_name) -> Self {
                Self {
                    #(#field_initialization,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

fn named_fields(input: &DeriveInput) -> syn::Result<&Punctuated<Field, Comma>> {
    let Data::Struct(struct_data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "This macro only supports structs.",
        ));
    };

    let Fields::Named(fields) = &struct_data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "This macro only supports structs with named fields.",
        ));
    };

    Ok(&fields.named)
}
