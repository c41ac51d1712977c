//! Plugin start-up: hydrate the configuration once and abort on failure.

use plugin_bootstrap::{load, read_payload};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = read_payload()
        .and_then(|payload| load(&payload))
        .inspect_err(|err| error!(%err, "plugin configuration rejected"))?;

    info!(
        disabled = config.disabled,
        brokers = config.brokers.len(),
        dns_host = %config.dns_host,
        authenticated = config.has_credentials(),
        produce_timeout = ?config.produce_timeout,
        record_retries = config.record_retries,
        "plugin configuration loaded"
    );
    Ok(())
}
