//! Attribute parsing for `#[derive(Hydrate)]`.

use syn::parenthesized;
use syn::{Attribute, Token};

mod input;
mod literals;
mod serde_attrs;

pub(crate) use input::{ParsedField, ParsedInput, parse_input};
use literals::{default_literal, lit_bool, lit_str};
use serde_attrs::serde_field_rename;

/// Struct-level attributes recognised by `#[derive(Hydrate)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[hydrate(crate = "my_alias")]`, generated code
    /// references items through `my_alias::` instead of `hydrate_config::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Hydrate)]`.
///
/// - `rename` is the serialized-name candidate tried after the case variants.
/// - `default` holds the textual form of the default literal; `default = ""`
///   declares no default.
/// - `required` fails hydration when the key is absent and no default exists.
/// - `skip` leaves the field out of the field table entirely.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub rename: Option<String>,
    pub default: Option<String>,
    pub required: bool,
    pub skip: bool,
}

/// Iterate all `#[hydrate(...)]` attributes once and apply a callback.
fn parse_hydrate<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("hydrate")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
///
/// Only the key's own value is consumed; keys after the next `,` are still
/// parsed.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Reads a bare flag (`key`) or an explicit `key = bool`.
fn flag(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<bool> {
    if meta.input.peek(Token![=]) {
        lit_bool(meta, key)
    } else {
        Ok(true)
    }
}

/// Extracts `#[hydrate(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised; unknown keys are ignored.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_hydrate(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            return Ok(());
        }
        discard_unknown(meta)
    })?;
    Ok(out)
}

/// Parses field-level `#[hydrate(...)]` attributes.
///
/// Recognised keys are `rename`, `default`, `required` and `skip`. Unknown
/// keys are ignored, matching [`parse_struct_attrs`].
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_hydrate(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("rename") => out.rename = Some(lit_str(meta, "rename")?.value()),
            Some("default") => {
                out.default = Some(default_literal(meta)?).filter(|text| !text.is_empty());
            }
            Some("required") => out.required = flag(meta, "required")?,
            Some("skip") => out.skip = flag(meta, "skip")?,
            _ => discard_unknown(meta)?,
        }
        Ok(())
    })?;
    Ok(out)
}

/// Serialized-name override for a field: `hydrate(rename)` wins over serde.
pub(crate) fn serialized_name(
    field_attrs: &FieldAttrs,
    attrs: &[Attribute],
) -> syn::Result<Option<String>> {
    match &field_attrs.rename {
        Some(rename) => Ok(Some(rename.clone())),
        None => serde_field_rename(attrs),
    }
}
