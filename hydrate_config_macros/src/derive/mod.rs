//! Expansion pipeline for `#[derive(Hydrate)]`: parse, then generate.

use proc_macro2::TokenStream;
use syn::DeriveInput;

pub(crate) mod crate_path;
pub(crate) mod generate;
pub(crate) mod parse;

/// Expand a derive input into the `HydrateStruct` and `Hydrate` impls.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    Ok(generate::generate_hydrate_impls(&parsed))
}
