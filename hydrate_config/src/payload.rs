//! Payload formats understood by the entry points.
//!
//! JSON is always available. JSON5, TOML and YAML are enabled with the
//! `json5`, `toml` and `yaml` cargo features respectively.

use std::fmt;

use tracing::debug;

use crate::{Hydrate, HydrateError, HydrateResult, RawValue, hydrate_from_value};

/// Encoding of a raw configuration payload.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadFormat {
    /// Strict JSON.
    #[default]
    Json,
    /// JSON5, a JSON superset with comments and unquoted keys.
    #[cfg(feature = "json5")]
    Json5,
    /// TOML documents.
    #[cfg(feature = "toml")]
    Toml,
    /// YAML 1.2 documents, parsed with strict booleans.
    #[cfg(feature = "yaml")]
    Yaml,
}

impl PayloadFormat {
    /// Pick a format from a file extension, ignoring ASCII case.
    ///
    /// Returns `None` for unknown extensions and for formats whose feature is
    /// disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use hydrate_config::PayloadFormat;
    ///
    /// assert_eq!(PayloadFormat::from_extension("JSON"), Some(PayloadFormat::Json));
    /// assert_eq!(PayloadFormat::from_extension("ini"), None);
    /// ```
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            #[cfg(feature = "json5")]
            "json5" => Some(Self::Json5),
            #[cfg(feature = "toml")]
            "toml" => Some(Self::Toml),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Lower-case format name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            #[cfg(feature = "json5")]
            Self::Json5 => "json5",
            #[cfg(feature = "toml")]
            Self::Toml => "toml",
            #[cfg(feature = "yaml")]
            Self::Yaml => "yaml",
        }
    }

    /// Decode `payload` into a raw value tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HydrateErrorKind::Decode`] when the payload is not
    /// valid in this format.
    pub fn decode(self, payload: &[u8]) -> HydrateResult<RawValue> {
        match self {
            Self::Json => serde_json::from_slice(payload).map_err(|e| HydrateError::decode(self, e)),
            #[cfg(feature = "json5")]
            Self::Json5 => json5::from_str(self.text(payload)?).map_err(|e| HydrateError::decode(self, e)),
            #[cfg(feature = "toml")]
            Self::Toml => toml::from_str(self.text(payload)?).map_err(|e| HydrateError::decode(self, e)),
            #[cfg(feature = "yaml")]
            Self::Yaml => decode_yaml(self.text(payload)?).map_err(|e| HydrateError::decode(self, e)),
        }
    }

    #[cfg(any(feature = "json5", feature = "toml", feature = "yaml"))]
    fn text(self, payload: &[u8]) -> HydrateResult<&str> {
        std::str::from_utf8(payload).map_err(|e| HydrateError::decode(self, e))
    }
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "yaml")]
fn decode_yaml(text: &str) -> Result<RawValue, serde_saphyr::Error> {
    serde_saphyr::from_str_with_options(
        text,
        serde_saphyr::Options {
            strict_booleans: true,
            ..serde_saphyr::Options::default()
        },
    )
}

/// Decode `payload` as `format` and hydrate a fresh `T`.
///
/// # Errors
///
/// Returns [`crate::HydrateErrorKind::Decode`] for malformed payloads, or the
/// first hydration error.
///
/// # Examples
///
/// ```
/// use hydrate_config::{Hydrate, PayloadFormat, hydrate_with_format};
///
/// #[derive(Debug, Default, Hydrate)]
/// struct Listener {
///     #[hydrate(default = 8080)]
///     port: u16,
/// }
///
/// let listener: Listener = hydrate_with_format(b"{}", PayloadFormat::Json)?;
/// assert_eq!(listener.port, 8080);
/// # Ok::<(), hydrate_config::HydrateError>(())
/// ```
pub fn hydrate_with_format<T: Hydrate + Default>(
    payload: &[u8],
    format: PayloadFormat,
) -> HydrateResult<T> {
    let raw = format.decode(payload)?;
    debug!(%format, bytes = payload.len(), "decoded payload");
    hydrate_from_value(&raw)
}
