//! Input parsing for the `Hydrate` derive macro.
//!
//! This module gathers the struct identifier, generics, fields and attribute
//! metadata in one pass so expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields, Generics, Ident, Type};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs, serialized_name};

/// A named field with its parsed attributes.
pub(crate) struct ParsedField {
    pub ident: Ident,
    pub ty: Type,
    pub attrs: FieldAttrs,
    /// `hydrate(rename)`, else the serde rename.
    pub serialized_name: Option<String>,
}

/// Everything the generator needs from the derive input.
pub(crate) struct ParsedInput {
    pub ident: Ident,
    pub generics: Generics,
    pub struct_attrs: StructAttrs,
    pub fields: Vec<ParsedField>,
}

impl ParsedInput {
    /// Fields that take part in hydration, in declaration order.
    pub(crate) fn hydrated_fields(&self) -> impl Iterator<Item = &ParsedField> {
        self.fields.iter().filter(|field| !field.attrs.skip)
    }
}

/// Gathers information from the user-provided struct.
///
/// Enums, unions, tuple structs and unit structs are rejected.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Hydrate requires named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Hydrate can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        let serialized_name = serialized_name(&attrs, &field.attrs)?;
        fields.push(ParsedField {
            ident,
            ty: field.ty.clone(),
            attrs,
            serialized_name,
        });
    }

    Ok(ParsedInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        struct_attrs,
        fields,
    })
}
