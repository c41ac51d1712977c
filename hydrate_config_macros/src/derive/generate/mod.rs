//! Token generation for the `HydrateStruct` and `Hydrate` impls.
//!
//! Field metadata becomes a `const` table of `FieldSpec` values whose shapes
//! are read from each field type's `Hydrate::SHAPE`, so the runtime can pick
//! the absent-key fallback without touching the field itself.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Generics, parse_quote};

use super::crate_path;
use super::parse::{ParsedField, ParsedInput};

/// Generate both trait impls for a parsed struct.
pub(crate) fn generate_hydrate_impls(input: &ParsedInput) -> TokenStream {
    let krate = crate_path::resolve(input.struct_attrs.crate_path.as_ref());
    let ident = &input.ident;
    let name = ident.unraw().to_string();
    let generics = bounded_generics(input, &krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields: Vec<&ParsedField> = input.hydrated_fields().collect();
    let specs = fields.iter().map(|field| field_spec(field, &krate));
    let arms = fields.iter().enumerate().map(|(index, field)| {
        let member = &field.ident;
        quote! { #index => #krate::set_value(raw, &mut self.#member), }
    });
    let raw = if fields.is_empty() {
        quote! { _raw }
    } else {
        quote! { raw }
    };

    quote! {
        impl #impl_generics #krate::HydrateStruct for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;

            const FIELDS: &'static [#krate::FieldSpec] = &[ #(#specs),* ];

            fn hydrate_field(
                &mut self,
                index: usize,
                #raw: &#krate::RawValue,
            ) -> #krate::HydrateResult<()> {
                match index {
                    #(#arms)*
                    _ => ::core::result::Result::Ok(()),
                }
            }
        }

        impl #impl_generics #krate::Hydrate for #ident #ty_generics #where_clause {
            const SHAPE: #krate::Shape = #krate::Shape::Struct { name: #name };

            fn hydrate(&mut self, raw: &#krate::RawValue) -> #krate::HydrateResult<()> {
                #krate::set_struct(raw, self)
            }
        }
    }
}

/// Generic structs need every hydrated field type to implement `Hydrate`.
fn bounded_generics(input: &ParsedInput, krate: &TokenStream) -> Generics {
    let mut generics = input.generics.clone();
    if generics.params.is_empty() {
        return generics;
    }
    let predicates = &mut generics.make_where_clause().predicates;
    for field in input.hydrated_fields() {
        let ty = &field.ty;
        predicates.push(parse_quote! { #ty: #krate::Hydrate });
    }
    generics
}

fn field_spec(field: &ParsedField, krate: &TokenStream) -> TokenStream {
    let name = field.ident.unraw().to_string();
    let rename = optional_str(field.serialized_name.as_deref());
    let default = optional_str(field.attrs.default.as_deref());
    let required = field.attrs.required;
    let ty = &field.ty;
    quote! {
        #krate::FieldSpec {
            name: #name,
            rename: #rename,
            default: #default,
            required: #required,
            shape: <#ty as #krate::Hydrate>::SHAPE,
        }
    }
}

fn optional_str(value: Option<&str>) -> TokenStream {
    value.map_or_else(
        || quote! { ::core::option::Option::None },
        |text| quote! { ::core::option::Option::Some(#text) },
    )
}
