//! Public entry points: JSON payloads, alternate formats and raw trees.

use anyhow::{Result, anyhow, ensure};
use hydrate_config::{
    Hydrate, HydrateErrorKind, PayloadFormat, hydrate_from_slice, hydrate_from_str,
    hydrate_with_format,
};
use rstest::{fixture, rstest};
use std::time::Duration;

#[derive(Debug, Default, Hydrate)]
struct BrokerConfig {
    disabled: bool,
    #[hydrate(required)]
    brokers: Vec<String>,
    #[hydrate(default = "10s")]
    produce_timeout: Duration,
    #[hydrate(default = 3)]
    record_retries: u32,
}

#[fixture]
fn payload() -> &'static str {
    r#"{"disabled": "false", "brokers": ["a:9092", "b:9092"], "record_retries": "5"}"#
}

#[rstest]
fn string_payloads_are_cast(payload: &str) -> Result<()> {
    let config: BrokerConfig = hydrate_from_str(payload)?;
    ensure!(!config.disabled);
    ensure!(config.brokers.len() == 2);
    ensure!(config.produce_timeout == Duration::from_secs(10));
    ensure!(config.record_retries == 5);
    Ok(())
}

#[rstest]
fn slice_and_json_format_agree(payload: &str) -> Result<()> {
    let from_slice: BrokerConfig = hydrate_from_slice(payload.as_bytes())?;
    let from_format: BrokerConfig = hydrate_with_format(payload.as_bytes(), PayloadFormat::Json)?;
    ensure!(from_slice.brokers == from_format.brokers);
    ensure!(from_slice.record_retries == from_format.record_retries);
    Ok(())
}

#[rstest]
#[case::truncated(b"{\"brokers\": [".as_slice())]
#[case::not_json(b"brokers=a".as_slice())]
#[case::invalid_utf8(b"\xff".as_slice())]
fn malformed_payloads_fail_to_decode(#[case] payload: &[u8]) -> Result<()> {
    let err = hydrate_from_slice::<BrokerConfig>(payload)
        .err()
        .ok_or_else(|| anyhow!("payload should not decode"))?;
    ensure!(matches!(
        err.kind(),
        HydrateErrorKind::Decode {
            format: PayloadFormat::Json,
            ..
        }
    ));
    ensure!(err.path_string().is_empty());
    Ok(())
}

#[test]
fn hydration_errors_are_not_decode_errors() -> Result<()> {
    let err = hydrate_from_str::<BrokerConfig>(r#"{"brokers": ["a"], "record_retries": "-1"}"#)
        .err()
        .ok_or_else(|| anyhow!("negative retries should fail"))?;
    ensure!(
        err.to_string() == r#"at `record_retries`: cannot cast "-1" to u32: -1 is out of range"#,
        "unexpected message: {err}"
    );
    Ok(())
}

#[cfg(feature = "toml")]
#[test]
fn toml_payloads_hydrate() -> Result<()> {
    let payload = b"brokers = [\"a:9092\"]\nproduce_timeout = \"2m\"\n";
    let config: BrokerConfig = hydrate_with_format(payload, PayloadFormat::Toml)?;
    ensure!(config.produce_timeout == Duration::from_secs(120));
    Ok(())
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_payloads_hydrate() -> Result<()> {
    let payload = b"brokers:\n  - a:9092\ndisabled: \"true\"\n";
    let config: BrokerConfig = hydrate_with_format(payload, PayloadFormat::Yaml)?;
    ensure!(config.disabled);
    Ok(())
}

#[cfg(feature = "json5")]
#[test]
fn json5_payloads_hydrate() -> Result<()> {
    let payload = b"{ brokers: ['a:9092'], record_retries: 0x10 }";
    let config: BrokerConfig = hydrate_with_format(payload, PayloadFormat::Json5)?;
    ensure!(config.record_retries == 16);
    Ok(())
}
