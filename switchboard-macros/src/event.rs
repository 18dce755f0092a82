//! Message and event derives.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Ident, parse_macro_input, spanned::Spanned};

/// Implementation of `#[derive(Message)]`.
pub fn derive_message_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::switchboard::Message for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

/// Implementation of `#[derive(Event)]`.
pub fn derive_event_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_event(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_event(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let id_field = find_id_field(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::switchboard::Message for #name #ty_generics #where_clause {}

        impl #impl_generics ::switchboard::Event for #name #ty_generics #where_clause {
            fn event_id(&self) -> ::switchboard::EventId {
                ::core::convert::From::from(self.#id_field)
            }
        }
    })
}

fn find_id_field(input: &DeriveInput) -> syn::Result<Ident> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "`Event` can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "`Event` can only be derived for structs",
            ));
        }
    };

    let mut marked = Vec::new();
    for field in fields {
        if is_marked_id(field)? {
            marked.push(field);
        }
    }

    let field = match marked.as_slice() {
        [field] => *field,
        [] => fields
            .iter()
            .find(|field| field.ident.as_ref().is_some_and(|ident| ident == "id"))
            .ok_or_else(|| {
                syn::Error::new(
                    input.ident.span(),
                    "no event id field: mark one with `#[event(id)]` or name it `id`",
                )
            })?,
        [_, second, ..] => {
            return Err(syn::Error::new(
                second.span(),
                "only one field can be marked `#[event(id)]`",
            ));
        }
    };

    field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new(field.span(), "event id field must be named"))
}

fn is_marked_id(field: &Field) -> syn::Result<bool> {
    let mut marked = false;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("event")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                marked = true;
                Ok(())
            } else {
                Err(meta.error("unknown event attribute, expected `id`"))
            }
        })?;
    }
    Ok(marked)
}
