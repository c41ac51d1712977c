//! Environment variables as a raw value source.
//!
//! Wraps `figment::providers::Env` for key selection (prefix stripping,
//! nesting separators, case folding) but keeps every value as a string leaf,
//! so the lenient casters see exactly what the environment holds.

use figment::providers::Env;
use serde_json::Map;
use tracing::debug;

use crate::{Hydrate, HydrateResult, RawValue, hydrate_from_value};

/// Environment source producing a nested raw object.
///
/// Keys containing `.` (which [`EnvSource::split`] produces from the chosen
/// separator) become nested objects. When a key is both a leaf and the parent
/// of other keys, the nested object is kept.
#[derive(Clone)]
pub struct EnvSource {
    inner: Env,
}

impl EnvSource {
    /// Read every environment variable.
    #[must_use]
    pub fn raw() -> Self {
        Env::raw().into()
    }

    /// Read variables starting with `prefix`, with the prefix removed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use hydrate_config::{EnvSource, Hydrate, hydrate_from_env};
    ///
    /// #[derive(Default, Hydrate)]
    /// struct Retry {
    ///     #[hydrate(default = 3)]
    ///     max_attempts: u8,
    /// }
    ///
    /// #[derive(Default, Hydrate)]
    /// struct Plugin {
    ///     #[hydrate(required)]
    ///     dns_host: String,
    ///     retry: Retry,
    /// }
    ///
    /// // PLUGIN_DNS_HOST=kafka.svc PLUGIN_RETRY__MAX_ATTEMPTS=5
    /// let plugin: Plugin = hydrate_from_env(&EnvSource::prefixed("PLUGIN_").split("__"))?;
    /// assert_eq!(plugin.retry.max_attempts, 5);
    /// # Ok::<(), hydrate_config::HydrateError>(())
    /// ```
    #[must_use]
    pub fn prefixed(prefix: &str) -> Self {
        Env::prefixed(prefix).into()
    }

    /// Treat `pattern` in a key as a nesting separator.
    #[must_use]
    pub fn split(self, pattern: &str) -> Self {
        self.inner.split(pattern).into()
    }

    /// Whether keys are lower-cased before use. Enabled by default.
    #[must_use]
    pub fn lowercase(self, lowercase: bool) -> Self {
        self.inner.lowercase(lowercase).into()
    }

    /// Collect the selected variables into a raw object of string leaves.
    #[must_use]
    pub fn to_raw_value(&self) -> RawValue {
        let mut root = Map::new();
        for (key, value) in self.inner.iter() {
            insert_nested(&mut root, key.as_str(), value);
        }
        debug!(keys = root.len(), "collected environment variables");
        RawValue::Object(root)
    }
}

impl From<Env> for EnvSource {
    fn from(inner: Env) -> Self {
        Self { inner }
    }
}

fn insert_nested(table: &mut Map<String, RawValue>, key: &str, value: String) {
    match key.split_once('.') {
        None => {
            if !table.get(key).is_some_and(RawValue::is_object) {
                table.insert(key.to_owned(), RawValue::String(value));
            }
        }
        Some((head, rest)) => {
            let child = table
                .entry(head)
                .or_insert_with(|| RawValue::Object(Map::new()));
            if !child.is_object() {
                *child = RawValue::Object(Map::new());
            }
            if let RawValue::Object(nested) = child {
                insert_nested(nested, rest, value);
            }
        }
    }
}

/// Hydrate a fresh `T` from the variables selected by `source`.
///
/// # Errors
///
/// Returns the first hydration error with its full field path.
pub fn hydrate_from_env<T: Hydrate + Default>(source: &EnvSource) -> HydrateResult<T> {
    hydrate_from_value(&source.to_raw_value())
}
