//! Procedural macros for `hydrate_config`.
//!
//! `#[derive(Hydrate)]` describes a struct with named fields to the runtime
//! crate: it emits the static field table (names, serialized-name
//! overrides, default literals, required flags and each field's shape) and a
//! per-field setter, then routes whole-struct hydration through
//! `hydrate_config::set_struct`.
//!
//! Field attributes: `rename = "key"`, `default = <literal>`, `required`
//! (or `required = bool`) and `skip`. `#[serde(rename = "...")]` is honoured
//! when no `hydrate(rename)` is given. The struct attribute
//! `#[hydrate(crate = "path")]` points generated code at a renamed
//! dependency.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;
#[cfg(test)]
mod tests;

/// Derive macro for `hydrate_config::Hydrate` and
/// `hydrate_config::HydrateStruct`.
#[proc_macro_derive(Hydrate, attributes(hydrate))]
pub fn derive_hydrate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
