//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[hydrate(crate = "...")]` attribute value into the
//! tokens that prefix every runtime path in generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `hydrate_config`. The default has no leading `::` so the
/// runtime crate can name itself through `extern crate self`.
///
/// # Examples
///
/// ```rust,ignore
/// let default = resolve(None);
/// assert_eq!(default.to_string(), "hydrate_config");
/// ```
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { hydrate_config }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Unit tests for crate path resolution with default and custom paths.

    use super::*;
    use anyhow::{Context, Result, ensure};
    use rstest::rstest;

    #[rstest]
    #[case::default(None, "hydrate_config")]
    #[case::custom(Some("config_rt"), "config_rt")]
    #[case::absolute(Some("::vendored::hydrate_config"), ":: vendored :: hydrate_config")]
    fn resolve_produces_expected_tokens(
        #[case] input: Option<&str>,
        #[case] expected: &str,
    ) -> Result<()> {
        let parsed = input
            .map(syn::parse_str::<syn::Path>)
            .transpose()
            .context("fixture path must parse")?;
        let tokens = resolve(parsed.as_ref()).to_string();
        ensure!(tokens == expected, "resolved {tokens}, expected {expected}");
        Ok(())
    }
}
