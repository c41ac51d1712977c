//! Broker plugin configuration and its bootstrap from the host payload.
//!
//! The host hands the plugin a single JSON object whose leaves are all
//! strings. [`load`] turns that payload into a [`PluginConfig`] once, at
//! start-up; any failure is fatal to the plugin.

use std::env::{self, VarError};
use std::io::{self, Read};
use std::time::Duration;

use hydrate_config::{Hydrate, HydrateError, hydrate_from_slice};
use thiserror::Error;
use tracing::debug;

/// Variable consulted before falling back to standard input.
pub const PAYLOAD_VAR: &str = "PLUGIN_CONFIG";

/// Message broker plugin settings.
#[derive(Default, Hydrate)]
pub struct PluginConfig {
    /// Turns the plugin into a pass-through.
    pub disabled: bool,
    /// Host used for broker DNS lookups.
    pub dns_host: String,
    /// SASL user name; empty disables authentication.
    pub username: String,
    /// SASL password.
    pub password: String,
    /// Seed broker addresses.
    #[hydrate(required)]
    pub brokers: Vec<String>,
    /// Upper bound on a single produce call.
    pub produce_timeout: Duration,
    /// Retries per record before giving up.
    pub record_retries: i64,
    /// Refresh topic metadata before each produce.
    pub update_metadata_before_produce: bool,
    /// Flush the producer after every produce call.
    #[hydrate(rename = "forceFlushAfterProduce")]
    pub flush_after_produce: bool,
}

impl PluginConfig {
    /// Whether SASL credentials were supplied.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

/// Bootstrap failures.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The payload variable holds non-Unicode data.
    #[error("{PAYLOAD_VAR} is not valid unicode")]
    NonUnicodeVar,
    /// Standard input could not be read.
    #[error("failed to read the configuration payload from stdin: {0}")]
    Stdin(#[source] io::Error),
    /// The payload did not hydrate into [`PluginConfig`].
    #[error("invalid plugin configuration: {0}")]
    Hydrate(#[from] HydrateError),
}

/// Read the raw payload from [`PAYLOAD_VAR`], or from stdin when unset.
///
/// # Errors
///
/// Returns [`BootstrapError::NonUnicodeVar`] or [`BootstrapError::Stdin`].
pub fn read_payload() -> Result<Vec<u8>, BootstrapError> {
    match env::var(PAYLOAD_VAR) {
        Ok(payload) => {
            debug!(source = PAYLOAD_VAR, "reading payload from the environment");
            Ok(payload.into_bytes())
        }
        Err(VarError::NotPresent) => {
            debug!(source = "stdin", "reading payload from standard input");
            let mut payload = Vec::new();
            io::stdin()
                .read_to_end(&mut payload)
                .map_err(BootstrapError::Stdin)?;
            Ok(payload)
        }
        Err(VarError::NotUnicode(_)) => Err(BootstrapError::NonUnicodeVar),
    }
}

/// Hydrate the plugin configuration from `payload`.
///
/// # Errors
///
/// Returns [`BootstrapError::Hydrate`] for malformed payloads, missing
/// brokers or values that cannot be cast.
pub fn load(payload: &[u8]) -> Result<PluginConfig, BootstrapError> {
    Ok(hydrate_from_slice(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn host_payload_hydrates_every_field() -> Result<()> {
        let payload = json!({
            "disabled": "false",
            "dnsHost": "kafka.svc",
            "username": "svc",
            "password": "secret",
            "brokers": ["kafka-0:9092", "kafka-1:9092"],
            "produceTimeout": "5s",
            "recordRetries": "3",
            "updateMetadataBeforeProduce": "true",
            "forceFlushAfterProduce": "1",
        });
        let config = load(payload.to_string().as_bytes())?;
        ensure!(config.dns_host == "kafka.svc");
        ensure!(config.brokers.len() == 2);
        ensure!(config.produce_timeout == Duration::from_secs(5));
        ensure!(config.record_retries == 3);
        ensure!(config.update_metadata_before_produce && config.flush_after_produce);
        ensure!(config.has_credentials() && config.password == "secret");
        ensure!(!config.disabled);
        Ok(())
    }

    #[rstest]
    #[case::missing_brokers(r#"{"dnsHost": "kafka.svc"}"#, "required field `brokers` missing")]
    #[case::bad_timeout(r#"{"brokers": [], "produceTimeout": "soon"}"#, "produce_timeout")]
    #[case::not_json("brokers: a", "failed to decode json payload")]
    fn invalid_payloads_are_fatal(#[case] payload: &str, #[case] needle: &str) -> Result<()> {
        let err = load(payload.as_bytes())
            .err()
            .ok_or_else(|| anyhow!("payload should be rejected"))?;
        ensure!(matches!(err, BootstrapError::Hydrate(_)));
        ensure!(err.to_string().contains(needle), "unexpected message: {err}");
        Ok(())
    }
}
