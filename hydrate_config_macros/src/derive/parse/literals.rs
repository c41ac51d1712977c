//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr, Token};

/// Parses a literal from a field attribute using `extractor`.
fn parse_lit<T, F>(
    meta: &syn::meta::ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> Result<T, syn::Error>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a string literal from a field attribute.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

pub(crate) fn lit_bool(meta: &syn::meta::ParseNestedMeta, key: &str) -> Result<bool, syn::Error> {
    parse_lit(meta, key, "boolean", |lit| match lit {
        Lit::Bool(b) => Some(b.value),
        _ => None,
    })
}

/// Parses `default = <literal>` into the text the runtime casts at
/// hydration time.
///
/// Strings are taken verbatim. Integers and floats keep their digits without
/// any type suffix and may carry a leading `-`. Booleans become `true` or
/// `false`.
pub(crate) fn default_literal(meta: &syn::meta::ParseNestedMeta) -> Result<String, syn::Error> {
    let input = meta.value()?;
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }
    let literal = input.parse::<Lit>()?;
    let sign = if negative { "-" } else { "" };
    match literal {
        Lit::Int(int) => Ok(format!("{sign}{}", int.base10_digits())),
        Lit::Float(float) => Ok(format!("{sign}{}", float.base10_digits())),
        Lit::Str(s) if !negative => Ok(s.value()),
        Lit::Bool(b) if !negative => Ok(b.value.to_string()),
        other => Err(syn::Error::new(
            other.span(),
            "default must be a string, integer, float or boolean literal",
        )),
    }
}
