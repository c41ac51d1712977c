//! Primary error types for hydration.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use super::path::{PathSegment, Trail};
use crate::PayloadFormat;

/// What went wrong while hydrating a value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HydrateErrorKind {
    /// The payload is not well-formed structured data.
    #[error("failed to decode {format} payload: {source}")]
    Decode {
        /// Format the payload was decoded as.
        format: PayloadFormat,
        /// Underlying parser error.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The raw value's runtime shape does not fit the destination.
    #[error("expected {expected} but got {found}")]
    ShapeMismatch {
        /// Raw shape the destination requires.
        expected: &'static str,
        /// Raw shape that was supplied.
        found: &'static str,
    },

    /// A fixed-size array received a list of the wrong length.
    #[error("array length mismatch: expected {expected}, got {found}")]
    LengthMismatch {
        /// Length of the destination array.
        expected: usize,
        /// Length of the raw list.
        found: usize,
    },

    /// Map destinations only accept string-like keys.
    #[error("unsupported map key type: {key_type}")]
    UnsupportedKeyType {
        /// Rust type name of the rejected key.
        key_type: &'static str,
    },

    /// A required field was absent and had no default.
    #[error("required field `{field}` missing")]
    MissingRequiredField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A scalar could not be converted to the destination type.
    #[error("cannot cast {value} to {target}: {reason}")]
    Cast {
        /// Rendering of the offending raw value.
        value: String,
        /// Destination scalar type.
        target: &'static str,
        /// Why the conversion failed.
        reason: String,
    },
}

/// Error returned by every hydration operation.
///
/// Wraps a [`HydrateErrorKind`] together with the path from the destination
/// root to the value that failed, for example `retry_policy.backoff` or
/// `brokers[2]`.
#[derive(Debug)]
pub struct HydrateError {
    kind: HydrateErrorKind,
    trail: Trail,
}

impl HydrateError {
    /// Wrap `kind` with an empty path.
    #[must_use]
    pub fn new(kind: HydrateErrorKind) -> Self {
        Self {
            kind,
            trail: Trail::default(),
        }
    }

    /// The failure category.
    #[must_use]
    pub const fn kind(&self) -> &HydrateErrorKind {
        &self.kind
    }

    /// Consume the error, keeping only its category.
    #[must_use]
    pub fn into_kind(self) -> HydrateErrorKind {
        self.kind
    }

    /// Path segments ordered from the destination root to the failing value.
    pub fn path(&self) -> impl Iterator<Item = &PathSegment> {
        self.trail.iter()
    }

    /// Rendered path such as `retry_policy.hosts[1]`; empty at the root.
    #[must_use]
    pub fn path_string(&self) -> String {
        self.trail.to_string()
    }

    /// Prepend `segment` to the path. Called once per level while the error
    /// unwinds towards the root.
    #[must_use]
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.trail.prepend(segment);
        self
    }
}

impl From<HydrateErrorKind> for HydrateError {
    fn from(kind: HydrateErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for HydrateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.trail.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at `{}`: {}", self.trail, self.kind)
        }
    }
}

impl StdError for HydrateError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.kind.source()
    }
}
