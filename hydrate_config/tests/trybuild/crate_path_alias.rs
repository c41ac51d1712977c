use hydrate_config::{Hydrate, HydrateResult, hydrate_from_str};

/// Verifies that `#[hydrate(crate = "hydrate_config")]` is accepted. Uses the
/// real crate name as a self-referential alias so no workspace
/// reconfiguration is needed.
#[derive(Debug, Default, Hydrate)]
#[hydrate(crate = "hydrate_config")]
struct CratePathConfig {
    value: String,
    #[hydrate(default = 1)]
    count: u32,
}

fn main() {
    let result: HydrateResult<CratePathConfig> = hydrate_from_str(r#"{"value": "hello"}"#);
    let _ = result.map(|config| (config.value, config.count));
}
