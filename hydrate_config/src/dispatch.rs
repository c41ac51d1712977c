//! Recursive entry into a destination's hydration handler.

use tracing::trace;

use crate::{Hydrate, HydrateResult, RawValue, error::raw_kind};

/// Hydrate `dest` from `raw`.
///
/// Every handler recurses through this function for nested values, so it is
/// the single point where a destination's static [`crate::Shape`] selects
/// the handler. The raw value's runtime shape never influences the choice;
/// the selected handler validates it.
///
/// # Errors
///
/// Returns the first [`crate::HydrateError`] raised by the selected handler.
pub fn set_value<T: Hydrate + ?Sized>(raw: &RawValue, dest: &mut T) -> HydrateResult<()> {
    trace!(shape = %T::SHAPE, raw = raw_kind(raw), "hydrating value");
    dest.hydrate(raw)
}
