//! Entry points that turn a payload into a hydrated destination.

use tracing::debug;

use crate::{Hydrate, HydrateResult, PayloadFormat, RawValue, set_value};

/// Decode a JSON payload and hydrate a fresh `T` from it.
///
/// # Errors
///
/// Returns [`crate::HydrateErrorKind::Decode`] when `payload` is not valid
/// JSON, or the first hydration error with its full field path.
///
/// # Examples
///
/// ```
/// use hydrate_config::{Hydrate, hydrate_from_slice};
///
/// #[derive(Debug, Default, Hydrate)]
/// struct Topic {
///     name: String,
///     partitions: u32,
/// }
///
/// let topic: Topic = hydrate_from_slice(br#"{"name": "audit", "partitions": "6"}"#)?;
/// assert_eq!(topic.partitions, 6);
/// # Ok::<(), hydrate_config::HydrateError>(())
/// ```
pub fn hydrate_from_slice<T: Hydrate + Default>(payload: &[u8]) -> HydrateResult<T> {
    let raw = PayloadFormat::Json.decode(payload)?;
    hydrate_from_value(&raw)
}

/// Decode JSON text and hydrate a fresh `T` from it.
///
/// # Errors
///
/// As for [`hydrate_from_slice`].
pub fn hydrate_from_str<T: Hydrate + Default>(payload: &str) -> HydrateResult<T> {
    hydrate_from_slice(payload.as_bytes())
}

/// Hydrate a fresh `T` from an already decoded raw value.
///
/// The value is built from `T::default()` and only returned when every field
/// succeeds, so callers never see a partially hydrated `T`.
///
/// # Errors
///
/// Returns the first hydration error with its full field path.
pub fn hydrate_from_value<T: Hydrate + Default>(raw: &RawValue) -> HydrateResult<T> {
    let mut dest = T::default();
    hydrate_into(raw, &mut dest)?;
    debug!(shape = %T::SHAPE, "hydrated destination");
    Ok(dest)
}

/// Hydrate an existing value in place.
///
/// Unlike the other entry points this is not atomic: when an error is
/// returned, struct fields and array elements processed before the failure
/// keep their new values.
///
/// # Errors
///
/// Returns the first hydration error with its full field path.
pub fn hydrate_into<T: Hydrate + ?Sized>(raw: &RawValue, dest: &mut T) -> HydrateResult<()> {
    set_value(raw, dest)
}
