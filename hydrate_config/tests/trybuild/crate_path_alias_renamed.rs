//! Trybuild fixture verifying `#[hydrate(crate = "...")]` works with a
//! dependency renamed through `use ... as`.

use hydrate_config as my_cfg;
use my_cfg::Hydrate;

/// Generated code must reach the runtime through `my_cfg` only.
#[derive(Debug, Default, Hydrate)]
#[hydrate(crate = "my_cfg")]
struct AliasedConfig {
    value: String,
    #[hydrate(default = 1)]
    count: u32,
}

fn main() {
    let result: my_cfg::HydrateResult<AliasedConfig> = my_cfg::hydrate_from_str("{}");
    let _ = result.map(|config| (config.value, config.count));
}
