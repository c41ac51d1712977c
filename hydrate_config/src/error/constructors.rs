//! Constructors for the common `HydrateError` categories.

use std::error::Error as StdError;

use super::{HydrateError, HydrateErrorKind};
use crate::{PayloadFormat, RawValue};

/// Upper bound on the rendered raw value kept in cast diagnostics.
const MAX_RENDERED_VALUE: usize = 64;

impl HydrateError {
    /// Payload decoding failed.
    #[must_use]
    pub fn decode(format: PayloadFormat, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(HydrateErrorKind::Decode {
            format,
            source: source.into(),
        })
    }

    /// `raw` does not have the raw shape `expected`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hydrate_config::{HydrateError, HydrateErrorKind};
    /// use serde_json::json;
    ///
    /// let err = HydrateError::shape_mismatch("object", &json!([1, 2]));
    /// assert!(matches!(
    ///     err.kind(),
    ///     HydrateErrorKind::ShapeMismatch { expected: "object", found: "list" }
    /// ));
    /// ```
    #[must_use]
    pub fn shape_mismatch(expected: &'static str, raw: &RawValue) -> Self {
        Self::new(HydrateErrorKind::ShapeMismatch {
            expected,
            found: raw_kind(raw),
        })
    }

    /// A fixed array of `expected` elements received `found`.
    #[must_use]
    pub fn length_mismatch(expected: usize, found: usize) -> Self {
        Self::new(HydrateErrorKind::LengthMismatch { expected, found })
    }

    /// Map key type `K` is not string-like.
    #[must_use]
    pub fn unsupported_key_type<K: ?Sized>() -> Self {
        Self::new(HydrateErrorKind::UnsupportedKeyType {
            key_type: std::any::type_name::<K>(),
        })
    }

    /// Required `field` was absent.
    #[must_use]
    pub fn missing_required_field(field: &'static str) -> Self {
        Self::new(HydrateErrorKind::MissingRequiredField { field })
    }

    /// `raw` could not be cast to `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hydrate_config::{HydrateError, HydrateErrorKind};
    /// use serde_json::json;
    ///
    /// let err = HydrateError::cast(&json!("999"), "u8", "out of range");
    /// assert_eq!(err.to_string(), r#"cannot cast "999" to u8: out of range"#);
    /// ```
    #[must_use]
    pub fn cast(raw: &RawValue, target: &'static str, reason: impl Into<String>) -> Self {
        Self::new(HydrateErrorKind::Cast {
            value: render_value(raw),
            target,
            reason: reason.into(),
        })
    }
}

/// Short name for a raw value's runtime shape.
pub(crate) const fn raw_kind(raw: &RawValue) -> &'static str {
    match raw {
        RawValue::Null => "null",
        RawValue::Bool(_) => "bool",
        RawValue::Number(_) => "number",
        RawValue::String(_) => "string",
        RawValue::Array(_) => "list",
        RawValue::Object(_) => "object",
    }
}

fn render_value(raw: &RawValue) -> String {
    let rendered = raw.to_string();
    if rendered.chars().count() <= MAX_RENDERED_VALUE {
        return rendered;
    }
    let mut shortened: String = rendered.chars().take(MAX_RENDERED_VALUE).collect();
    shortened.push('…');
    shortened
}
