//! Unit tests for the derive expansion.

use crate::derive::expand;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

fn expand_to_string(input: &DeriveInput) -> Result<String> {
    expand(input)
        .map(|tokens| tokens.to_string())
        .map_err(|err| anyhow!("expansion failed: {err}"))
}

/// Token streams render with spaces between tokens; compare without them.
fn squash(tokens: &str) -> String {
    tokens.chars().filter(|c| !c.is_whitespace()).collect()
}

#[rstest]
fn emits_field_table_in_declaration_order() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct PluginConfig {
            #[hydrate(required)]
            brokers: Vec<String>,
            #[hydrate(default = "10s")]
            produce_timeout: Duration,
            #[serde(rename = "forceFlushAfterProduce")]
            flush_after_produce: bool,
        }
    };
    let code = squash(&expand_to_string(&input)?);
    let brokers = code
        .find("name:\"brokers\"")
        .ok_or_else(|| anyhow!("missing brokers entry in {code}"))?;
    let timeout = code
        .find("name:\"produce_timeout\"")
        .ok_or_else(|| anyhow!("missing produce_timeout entry in {code}"))?;
    ensure!(brokers < timeout, "fields must keep declaration order");
    ensure!(code.contains("default:::core::option::Option::Some(\"10s\")"));
    ensure!(code.contains("rename:::core::option::Option::Some(\"forceFlushAfterProduce\")"));
    ensure!(code.contains("required:true"));
    ensure!(code.contains("shape:<Vec<String>ashydrate_config::Hydrate>::SHAPE"));
    Ok(())
}

#[rstest]
fn routes_field_indices_to_members() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Endpoint {
            host: String,
            #[hydrate(skip)]
            resolved: Vec<u8>,
            port: u16,
        }
    };
    let code = squash(&expand_to_string(&input)?);
    ensure!(code.contains("0usize=>hydrate_config::set_value(raw,&mutself.host)"));
    ensure!(code.contains("1usize=>hydrate_config::set_value(raw,&mutself.port)"));
    ensure!(!code.contains("resolved"), "skipped fields must not appear: {code}");
    Ok(())
}

#[rstest]
fn struct_shape_names_the_type_without_raw_prefix() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct r#Config { r#type: String }
    };
    let code = squash(&expand_to_string(&input)?);
    ensure!(code.contains("hydrate_config::Shape::Struct{name:\"Config\"}"));
    ensure!(code.contains("name:\"type\""));
    ensure!(code.contains("&mutself.r#type"));
    Ok(())
}

#[rstest]
fn crate_attribute_replaces_the_runtime_path() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[hydrate(crate = "config_rt")]
        struct Settings { level: u8 }
    };
    let code = squash(&expand_to_string(&input)?);
    ensure!(code.contains("implconfig_rt::HydrateStructforSettings"));
    ensure!(!code.contains("hydrate_config::"), "default path leaked: {code}");
    Ok(())
}

#[rstest]
fn generic_structs_bound_their_field_types() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Wrapper<T> where T: Clone { inner: T, items: Vec<T> }
    };
    let code = squash(&expand_to_string(&input)?);
    ensure!(code.contains("whereT:Clone,T:hydrate_config::Hydrate,Vec<T>:hydrate_config::Hydrate"));
    Ok(())
}

#[rstest]
fn empty_structs_ignore_the_raw_value() -> Result<()> {
    let input: DeriveInput = parse_quote! { struct Empty {} };
    let code = squash(&expand_to_string(&input)?);
    ensure!(code.contains("_raw:&hydrate_config::RawValue"));
    ensure!(code.contains("constFIELDS:&'static[hydrate_config::FieldSpec]=&[];"));
    Ok(())
}

#[rstest]
#[case(parse_quote!(enum Mode { Fast }))]
#[case(parse_quote!(struct Pair(u8, u8);))]
fn unsupported_inputs_fail_expansion(#[case] input: DeriveInput) {
    assert!(expand(&input).is_err());
}
