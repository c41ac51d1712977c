//! Serde attribute fallback for serialized names.
//!
//! Structs that already carry `#[serde(rename = "...")]` for their wire
//! format get the same key as a hydration candidate without repeating it in
//! `#[hydrate(rename)]`.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token};

/// Parse the serialized name from `#[serde(rename = "...")]` or
/// `#[serde(rename(deserialize = "...", serialize = "..."))]`.
///
/// Hydration reads input, so the `deserialize` name wins over `serialize`
/// when both are given.
pub(crate) fn serde_field_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut out = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename") {
                return super::discard_unknown(&meta);
            }
            if meta.input.peek(Token![=]) {
                out = Some(meta.value()?.parse::<LitStr>()?.value());
                return Ok(());
            }
            if meta.input.peek(syn::token::Paren) {
                let mut directions = RenameDirections::default();
                meta.parse_nested_meta(|nested| directions.apply(&nested))?;
                if let Some(name) = directions.preferred() {
                    out = Some(name);
                }
            }
            Ok(())
        })?;
    }
    Ok(out)
}

#[derive(Default)]
struct RenameDirections {
    deserialize: Option<String>,
    serialize: Option<String>,
}

impl RenameDirections {
    fn apply(&mut self, nested: &ParseNestedMeta) -> syn::Result<()> {
        let slot = if nested.path.is_ident("deserialize") {
            &mut self.deserialize
        } else if nested.path.is_ident("serialize") {
            &mut self.serialize
        } else {
            return super::discard_unknown(nested);
        };
        *slot = Some(nested.value()?.parse::<LitStr>()?.value());
        Ok(())
    }

    fn preferred(self) -> Option<String> {
        self.deserialize.or(self.serialize)
    }
}
